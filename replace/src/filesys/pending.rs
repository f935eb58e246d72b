//! Pending files: the temporary file a replacement is staged in before it is
//! renamed over its destination.
//!
//! A pending file lives in the same directory as its destination so the final
//! rename never crosses a filesystem boundary. Committing runs, in order, an
//! fsync of the pending file, the rename, and an fsync of the directory. Any
//! exit path that doesn't commit removes the pending file again, either through
//! [`PendingFile::cleanup`] or when the value is dropped.

// standard library
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

// internal crates
use crate::filesys::dir::Dir;
use crate::filesys::errors::{
    AlreadyFinalizedErr, CreatePendingFileErr, FileSysErr, IncompleteWriteErr,
    PathDoesNotExistErr, RemovePendingFileErr, RenamePendingFileErr, ResolvePermissionsErr,
    SetPermissionsErr, SyncDirErr, SyncPendingFileErr, UnknownFileNameErr, WritePendingFileErr,
};
use crate::filesys::file::File;
use crate::filesys::path::PathExt;
use crate::filesys::storage::{Os, Storage};
use crate::filesys::{Opt, Options};
use crate::trace;

// external crates
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Prefix shared by every pending file created for a destination named
/// `dest_name`. The random part of the name follows the prefix.
pub fn pending_prefix(dest_name: &OsStr) -> OsString {
    let mut prefix = OsString::from(".");
    prefix.push(dest_name);
    prefix
}

/// An in-flight replacement of `destination`.
///
/// Bytes written to a pending file are invisible at the destination until
/// [`commit`](PendingFile::commit) succeeds. Exactly one terminal operation
/// (commit or cleanup) is expected; writes and commits afterwards fail with
/// [`FileSysErr::AlreadyFinalizedErr`]. Cleanup itself may be called any number
/// of times. Once a write has failed the pending file can no longer be
/// committed, only cleaned up.
#[derive(Debug)]
pub struct PendingFile<S: Storage = Os> {
    dest: File,
    dir: Dir,
    pending: File,
    handle: Option<fs::File>,
    // whether a file created by us still sits at the pending path
    owns_pending: bool,
    // a write failed part way, so the content can't be trusted
    poisoned: bool,
    finalized: bool,
    mode: u32,
    sync: bool,
    dir_sync: bool,
    storage: S,
}

impl PendingFile<Os> {
    pub fn new<T: Into<PathBuf>>(path: T, opts: &[Opt]) -> Result<Self, FileSysErr> {
        Self::with_storage(path, opts, Os)
    }
}

impl<S: Storage> PendingFile<S> {
    /// Create a pending file for `path`, committing through `storage`.
    pub fn with_storage<T: Into<PathBuf>>(
        path: T,
        opts: &[Opt],
        storage: S,
    ) -> Result<Self, FileSysErr> {
        let dest = File::new(path);
        let options = Options::from_opts(opts);

        let name = match dest.path().file_name() {
            Some(name) => name.to_os_string(),
            None => {
                return Err(FileSysErr::UnknownFileNameErr(UnknownFileNameErr {
                    file: dest.clone(),
                    trace: trace!(),
                }));
            }
        };
        let dir = dest.parent()?;
        let mode = resolve_mode(&dest, &options)?;

        let prefix = pending_prefix(&name);
        let tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(dir.path())
            .map_err(|e| map_io_err_for_create(e, &dir))?;
        // from here on the pending file is removed by our own drop
        let (handle, tmp_path) = tmp.keep().map_err(|e| {
            FileSysErr::CreatePendingFileErr(CreatePendingFileErr {
                dir: dir.clone(),
                source: e.error,
                trace: trace!(),
            })
        })?;

        let pending_file = PendingFile {
            dest,
            dir,
            pending: File::new(tmp_path),
            handle: Some(handle),
            owns_pending: true,
            poisoned: false,
            finalized: false,
            mode,
            sync: options.sync,
            dir_sync: options.dir_sync,
            storage,
        };
        pending_file.apply_mode()?;

        debug!(
            "created pending file '{}' for '{}' with mode {:o}",
            pending_file.pending, pending_file.dest, mode
        );
        Ok(pending_file)
    }

    pub fn destination(&self) -> &File {
        &self.dest
    }

    pub fn pending_file(&self) -> &File {
        &self.pending
    }

    /// The mode bits the destination will have once committed.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Append all of `buf` to the pending file.
    pub fn append(&mut self, mut buf: &[u8]) -> Result<(), FileSysErr> {
        let handle = match self.handle.as_mut() {
            Some(handle) if !self.finalized => handle,
            _ => return Err(already_finalized(&self.dest)),
        };

        while !buf.is_empty() {
            match self.storage.write(handle, buf) {
                Ok(0) => {
                    self.poisoned = true;
                    return Err(FileSysErr::WritePendingFileErr(WritePendingFileErr {
                        file: self.pending.clone(),
                        source: io::Error::from(io::ErrorKind::WriteZero),
                        trace: trace!(),
                    }));
                }
                Ok(n) => buf = &buf[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.poisoned = true;
                    return Err(FileSysErr::WritePendingFileErr(WritePendingFileErr {
                        file: self.pending.clone(),
                        source: e,
                        trace: trace!(),
                    }));
                }
            }
        }
        Ok(())
    }

    /// Atomically replace the destination with the pending file.
    ///
    /// The pending file is synced before the rename and the directory after
    /// it, unless disabled with [`Opt::NoSync`] / [`Opt::NoDirSync`]. If the
    /// sync or the rename fails the destination is untouched and the pending
    /// file is left in place until [`cleanup`](PendingFile::cleanup) runs.
    /// After a failed write this returns [`FileSysErr::IncompleteWriteErr`]
    /// and leaves the destination alone.
    pub fn commit(&mut self) -> Result<(), FileSysErr> {
        if self.finalized {
            return Err(already_finalized(&self.dest));
        }
        if self.poisoned {
            return Err(FileSysErr::IncompleteWriteErr(IncompleteWriteErr {
                file: self.pending.clone(),
                trace: trace!(),
            }));
        }
        self.finalized = true;
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return Err(already_finalized(&self.dest)),
        };

        if self.sync {
            self.storage.sync_file(&handle).map_err(|e| {
                FileSysErr::SyncPendingFileErr(SyncPendingFileErr {
                    file: self.pending.clone(),
                    source: e,
                    trace: trace!(),
                })
            })?;
        }
        drop(handle);

        self.storage
            .rename(self.pending.path(), self.dest.path())
            .map_err(|e| {
                FileSysErr::RenamePendingFileErr(RenamePendingFileErr {
                    src_file: self.pending.clone(),
                    dest_file: self.dest.clone(),
                    source: e,
                    trace: trace!(),
                })
            })?;
        self.owns_pending = false;

        if self.dir_sync {
            self.storage.sync_dir(self.dir.path()).map_err(|e| {
                FileSysErr::SyncDirErr(SyncDirErr {
                    dir: self.dir.clone(),
                    source: e,
                    trace: trace!(),
                })
            })?;
        }

        debug!("replaced '{}' with '{}'", self.dest, self.pending);
        Ok(())
    }

    /// Remove the pending file if it is still around. A missing pending file is
    /// not an error, so this is safe to call after a successful commit and on
    /// every exit path.
    pub fn cleanup(&mut self) -> Result<(), FileSysErr> {
        self.finalized = true;
        self.handle = None;
        if !self.owns_pending {
            return Ok(());
        }

        match self.storage.remove_file(self.pending.path()) {
            Ok(()) => {
                debug!("removed pending file '{}'", self.pending);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!("unable to remove pending file '{}': {}", self.pending, e);
                return Err(FileSysErr::RemovePendingFileErr(RemovePendingFileErr {
                    file: self.pending.clone(),
                    source: e,
                    trace: trace!(),
                }));
            }
        }
        self.owns_pending = false;
        Ok(())
    }

    // the creation mode has been filtered through the umask (and possibly
    // directory defaults), so the resolved mode is applied on the open handle
    fn apply_mode(&self) -> Result<(), FileSysErr> {
        let handle = match self.handle.as_ref() {
            Some(handle) => handle,
            None => return Err(already_finalized(&self.dest)),
        };
        handle
            .set_permissions(fs::Permissions::from_mode(self.mode))
            .map_err(|e| {
                FileSysErr::SetPermissionsErr(SetPermissionsErr {
                    file: self.pending.clone(),
                    mode: self.mode,
                    source: e,
                    trace: trace!(),
                })
            })
    }
}

impl<S: Storage> Write for PendingFile<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.handle.as_mut() {
            Some(handle) if !self.finalized => {
                let result = self.storage.write(handle, buf);
                if matches!(&result, Err(e) if e.kind() != io::ErrorKind::Interrupted) {
                    self.poisoned = true;
                }
                result
            }
            _ => Err(io::Error::other(already_finalized(&self.dest))),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.handle.as_mut() {
            Some(handle) => handle.flush(),
            None => Ok(()),
        }
    }
}

impl<S: Storage> Drop for PendingFile<S> {
    fn drop(&mut self) {
        if self.owns_pending {
            debug!(
                "pending file '{}' dropped without commit, removing",
                self.pending
            );
        }
        // failures are already logged by cleanup
        let _ = self.cleanup();
    }
}

fn resolve_mode(dest: &File, options: &Options) -> Result<u32, FileSysErr> {
    if !options.existing_permissions {
        return Ok(options.permissions & 0o7777);
    }
    // only a regular file hands down its mode; a symlink or directory at the
    // destination is replaced, not written through
    match fs::symlink_metadata(dest.path()) {
        Ok(metadata) if metadata.is_file() => Ok(metadata.permissions().mode() & 0o7777),
        Ok(_) => Ok(options.permissions & 0o7777),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(options.permissions & 0o7777),
        Err(e) => Err(FileSysErr::ResolvePermissionsErr(ResolvePermissionsErr {
            file: dest.clone(),
            source: e,
            trace: trace!(),
        })),
    }
}

fn already_finalized(dest: &File) -> FileSysErr {
    FileSysErr::AlreadyFinalizedErr(AlreadyFinalizedErr {
        file: dest.clone(),
        trace: trace!(),
    })
}

fn map_io_err_for_create(e: io::Error, dir: &Dir) -> FileSysErr {
    if e.kind() == io::ErrorKind::NotFound {
        FileSysErr::PathDoesNotExistErr(PathDoesNotExistErr {
            path: dir.path().clone(),
            trace: trace!(),
        })
    } else {
        FileSysErr::CreatePendingFileErr(CreatePendingFileErr {
            dir: dir.clone(),
            source: e,
            trace: trace!(),
        })
    }
}
