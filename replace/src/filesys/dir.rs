// standard library
use std::fmt::Display;
use std::path::{Path, PathBuf};

// internal crates
use crate::filesys::{
    errors::{CreateDirErr, DeleteDirErr, FileSysErr, ReadDirErr},
    file::File,
    path::PathExt,
};
use crate::trace;

// external crates
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Dir struct for interacting with directories
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dir {
    path: PathBuf,
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl PathExt for Dir {
    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Dir {
    pub fn new<T: Into<PathBuf>>(path: T) -> Dir {
        Dir { path: path.into() }
    }

    /// Create a fresh, uniquely named directory under the system temp
    /// directory. The directory is not removed automatically.
    pub async fn create_temp_dir(prefix: &str) -> Result<Dir, FileSysErr> {
        let temp_dir = tempfile::Builder::new()
            .prefix(&format!("{prefix}_"))
            .tempdir()
            .map_err(|e| {
                FileSysErr::CreateDirErr(CreateDirErr {
                    source: e,
                    dir: Dir::new(std::env::temp_dir()),
                    trace: trace!(),
                })
            })?;
        Ok(Dir::new(temp_dir.keep()))
    }

    /// Create a new Dir instance using a relative path from this directory
    pub fn subdir<T: Into<PathBuf>>(&self, rel_path: T) -> Dir {
        let rel_path = rel_path.into();
        let rel_path_stripped = rel_path
            .strip_prefix(std::path::MAIN_SEPARATOR.to_string())
            .unwrap_or(&rel_path);
        Dir::new(self.path.join(rel_path_stripped))
    }

    /// Create a new File instance using a filename appended to this directory
    pub fn file(&self, file_name: &str) -> File {
        let file_name_path = Path::new(file_name);
        let file_name_stripped = file_name_path
            .strip_prefix(std::path::MAIN_SEPARATOR.to_string())
            .unwrap_or(file_name_path);
        File::new(self.path.join(file_name_stripped))
    }

    /// Create the directory and any missing parents. An existing directory is
    /// deleted first if overwrite is true, otherwise it is an error.
    pub async fn create(&self, overwrite: bool) -> Result<(), FileSysErr> {
        if !overwrite {
            self.assert_doesnt_exist()?;
        } else {
            self.delete().await?;
        }
        tokio::fs::create_dir_all(self.path()).await.map_err(|e| {
            FileSysErr::CreateDirErr(CreateDirErr {
                source: e,
                dir: self.clone(),
                trace: trace!(),
            })
        })?;
        Ok(())
    }

    pub async fn create_if_absent(&self) -> Result<(), FileSysErr> {
        if self.exists() {
            return Ok(());
        }
        self.create(false).await
    }

    /// Delete a directory and all its contents
    pub async fn delete(&self) -> Result<(), FileSysErr> {
        if !self.exists() {
            return Ok(());
        }
        tokio::fs::remove_dir_all(self.path()).await.map_err(|e| {
            FileSysErr::DeleteDirErr(DeleteDirErr {
                source: e,
                dir: self.clone(),
                trace: trace!(),
            })
        })?;
        Ok(())
    }

    // Return the files in this directory
    pub async fn files(&self) -> Result<Vec<File>, FileSysErr> {
        let read_dir_err = |e| {
            FileSysErr::ReadDirErr(ReadDirErr {
                source: e,
                dir: self.clone(),
                trace: trace!(),
            })
        };

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(self.path()).await.map_err(read_dir_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            if entry.path().is_file() {
                files.push(File::new(entry.path()));
            }
        }
        Ok(files)
    }

    /// Pending files in this directory that belong to a destination named
    /// `dest_name`, e.g. ones leaked by a crashed writer.
    #[cfg(unix)]
    pub async fn pending_files(&self, dest_name: &str) -> Result<Vec<File>, FileSysErr> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let prefix = crate::filesys::pending::pending_prefix(OsStr::new(dest_name));
        let files = self.files().await?;
        Ok(files
            .into_iter()
            .filter(|file| {
                file.path()
                    .file_name()
                    .is_some_and(|name| name.as_bytes().starts_with(prefix.as_bytes()))
            })
            .collect())
    }
}
