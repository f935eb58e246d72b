pub mod dir;
pub mod errors;
pub mod file;
pub mod overwrite;
pub mod path;
#[cfg(unix)]
pub mod pending;
pub mod replace;
pub mod storage;
#[cfg(unix)]
pub mod write;

/// Mode used for a fresh file when no permissions are supplied.
pub const DEFAULT_MODE: u32 = 0o600;

/// A single configuration mutation for a pending file. Opts are applied in the
/// order given over [`Options::default`], so later opts override earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opt {
    /// Use these mode bits for the new file. Disables any earlier
    /// [`Opt::ExistingPermissions`].
    Permissions(u32),
    /// Reuse the mode bits of the file currently at the destination. A fresh
    /// destination falls back to the explicit permissions.
    ExistingPermissions,
    /// Skip the fsync of the pending file before it is renamed into place.
    NoSync,
    /// Skip the fsync of the containing directory after the rename.
    NoDirSync,
}

/// Resolved configuration for a pending file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub permissions: u32,
    pub existing_permissions: bool,
    pub sync: bool,
    pub dir_sync: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            permissions: DEFAULT_MODE,
            existing_permissions: false,
            sync: true,
            dir_sync: true,
        }
    }
}

impl Options {
    pub fn from_opts(opts: &[Opt]) -> Self {
        opts.iter()
            .fold(Options::default(), |options, opt| options.apply(*opt))
    }

    pub fn apply(mut self, opt: Opt) -> Self {
        match opt {
            Opt::Permissions(mode) => {
                self.permissions = mode;
                self.existing_permissions = false;
            }
            Opt::ExistingPermissions => self.existing_permissions = true,
            Opt::NoSync => self.sync = false,
            Opt::NoDirSync => self.dir_sync = false,
        }
        self
    }
}
