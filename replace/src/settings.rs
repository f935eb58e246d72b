// internal crates
use crate::deserialize_warn;
use crate::filesys::{Opt, Options, DEFAULT_MODE};

// external crates
use serde::{Deserialize, Serialize};
use tracing::error;

/// Replacement settings as they appear in a configuration file. Missing fields
/// fall back to their defaults.
///
/// `permissions` is a plain integer, so JSON has no octal form: `420` is
/// `0o644` and `384` is `0o600`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Settings {
    pub permissions: u32,
    pub existing_permissions: bool,
    pub sync: bool,
    pub dir_sync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            permissions: DEFAULT_MODE,
            existing_permissions: true,
            sync: true,
            dir_sync: true,
        }
    }
}

impl Settings {
    /// The settings as options, in the order they are applied.
    pub fn opts(&self) -> Vec<Opt> {
        let mut opts = vec![Opt::Permissions(self.permissions)];
        if self.existing_permissions {
            opts.push(Opt::ExistingPermissions);
        }
        if !self.sync {
            opts.push(Opt::NoSync);
        }
        if !self.dir_sync {
            opts.push(Opt::NoDirSync);
        }
        opts
    }

    pub fn options(&self) -> Options {
        Options::from_opts(&self.opts())
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct DeserializeSettings {
            permissions: Option<u32>,
            existing_permissions: Option<bool>,
            sync: Option<bool>,
            dir_sync: Option<bool>,
        }

        let default = Settings::default();

        let result = match DeserializeSettings::deserialize(deserializer) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Error deserializing settings: {}", e);
                return Err(e);
            }
        };

        Ok(Settings {
            permissions: result
                .permissions
                .unwrap_or_else(|| deserialize_warn!("settings", "permissions", default.permissions)),
            existing_permissions: result.existing_permissions.unwrap_or_else(|| {
                deserialize_warn!(
                    "settings",
                    "existing_permissions",
                    default.existing_permissions
                )
            }),
            sync: result
                .sync
                .unwrap_or_else(|| deserialize_warn!("settings", "sync", default.sync)),
            dir_sync: result
                .dir_sync
                .unwrap_or_else(|| deserialize_warn!("settings", "dir_sync", default.dir_sync)),
        })
    }
}
