// standard library
use std::fmt::Display;
use std::io::Read;
use std::path::PathBuf;

// internal crates
use crate::filesys::dir::Dir;
use crate::filesys::errors::{
    ConvertUTF8Err, DeleteFileErr, FileMetadataErr, FileSysErr, JoinTaskErr, OpenFileErr,
    ParseJSONErr, PathDoesNotExistErr, ReadFileErr, SerializeJSONErr, UnknownFileNameErr,
    UnknownParentDirForFileErr,
};
use crate::filesys::path::PathExt;
#[cfg(unix)]
use crate::filesys::{pending::PendingFile, write, Opt};
use crate::trace;

// external crates
use serde::de::DeserializeOwned;
use tokio::fs::File as TokioFile;
use tokio::io::AsyncReadExt;
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// File struct for interacting with files
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl PathExt for File {
    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl File {
    pub fn new<T: Into<PathBuf>>(path: T) -> Self {
        File { path: path.into() }
    }

    pub fn name(&self) -> Result<&str, FileSysErr> {
        match self.path.file_name().and_then(|name| name.to_str()) {
            Some(name) => Ok(name),
            None => Err(FileSysErr::UnknownFileNameErr(UnknownFileNameErr {
                file: self.clone(),
                trace: trace!(),
            })),
        }
    }

    /// The directory containing this file. A bare file name resolves to the
    /// current directory.
    pub fn parent(&self) -> Result<Dir, FileSysErr> {
        let parent = self
            .path
            .parent()
            .ok_or(FileSysErr::UnknownParentDirForFileErr(
                UnknownParentDirForFileErr {
                    file: self.clone(),
                    trace: trace!(),
                },
            ))?;
        if parent.as_os_str().is_empty() {
            return Ok(Dir::new("."));
        }
        Ok(Dir::new(parent))
    }

    /// Start a replacement of this file.
    #[cfg(unix)]
    pub fn pending(&self, opts: &[Opt]) -> Result<PendingFile, FileSysErr> {
        PendingFile::new(self.path.clone(), opts)
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, FileSysErr> {
        let mut file = TokioFile::open(self.path())
            .await
            .map_err(|e| File::map_io_err_for_open(e, self))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.map_err(|e| {
            FileSysErr::ReadFileErr(ReadFileErr {
                source: e,
                file: self.clone(),
                trace: trace!(),
            })
        })?;
        Ok(buf)
    }

    pub async fn read_string(&self) -> Result<String, FileSysErr> {
        let bytes = self.read_bytes().await?;
        String::from_utf8(bytes).map_err(|e| {
            FileSysErr::ConvertUTF8Err(ConvertUTF8Err {
                source: e.utf8_error(),
                trace: trace!(),
            })
        })
    }

    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, FileSysErr> {
        let bytes = self.read_bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            FileSysErr::ParseJSONErr(ParseJSONErr {
                source: e,
                file: self.clone(),
                trace: trace!(),
            })
        })
    }

    /// Atomically replace this file with `buf`. See [`write::write_file`].
    #[cfg(unix)]
    pub async fn write_bytes(&self, buf: &[u8], perm: u32, opts: &[Opt]) -> Result<(), FileSysErr> {
        let path = self.path.clone();
        let buf = buf.to_vec();
        let opts = opts.to_vec();
        self.run_blocking(move || write::write_file(&path, &buf, perm, &opts))
            .await
    }

    #[cfg(unix)]
    pub async fn write_string(&self, s: &str, perm: u32, opts: &[Opt]) -> Result<(), FileSysErr> {
        self.write_bytes(s.as_bytes(), perm, opts).await
    }

    #[cfg(unix)]
    pub async fn write_json<T: serde::Serialize>(
        &self,
        obj: &T,
        perm: u32,
        opts: &[Opt],
    ) -> Result<(), FileSysErr> {
        let json_bytes = serde_json::to_vec_pretty(obj).map_err(|e| {
            FileSysErr::SerializeJSONErr(SerializeJSONErr {
                source: e,
                file: self.clone(),
                trace: trace!(),
            })
        })?;

        self.write_bytes(&json_bytes, perm, opts).await
    }

    /// Atomically replace this file with everything read from `reader`. See
    /// [`write::write_file_reader`].
    #[cfg(unix)]
    pub async fn write_reader<R>(
        &self,
        mut reader: R,
        perm: u32,
        opts: &[Opt],
    ) -> Result<u64, FileSysErr>
    where
        R: Read + Send + 'static,
    {
        let path = self.path.clone();
        let opts = opts.to_vec();
        self.run_blocking(move || write::write_file_reader(&path, &mut reader, perm, &opts))
            .await
    }

    pub async fn delete(&self) -> Result<(), FileSysErr> {
        match tokio::fs::remove_file(self.path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileSysErr::DeleteFileErr(DeleteFileErr {
                source: e,
                file: self.clone(),
                trace: trace!(),
            })),
        }
    }

    async fn metadata(&self) -> Result<std::fs::Metadata, FileSysErr> {
        tokio::fs::metadata(self.path()).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileSysErr::PathDoesNotExistErr(PathDoesNotExistErr {
                    path: self.path().clone(),
                    trace: trace!(),
                })
            } else {
                FileSysErr::FileMetadataErr(FileMetadataErr {
                    file: self.clone(),
                    source: e,
                    trace: trace!(),
                })
            }
        })
    }

    pub async fn permissions(&self) -> Result<std::fs::Permissions, FileSysErr> {
        Ok(self.metadata().await?.permissions())
    }

    /// Permission bits of the file, without the file type.
    #[cfg(unix)]
    pub async fn mode(&self) -> Result<u32, FileSysErr> {
        use std::os::unix::fs::PermissionsExt;
        Ok(self.permissions().await?.mode() & 0o7777)
    }

    pub async fn size(&self) -> Result<u64, FileSysErr> {
        Ok(self.metadata().await?.len())
    }

    #[cfg(unix)]
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, FileSysErr>
    where
        F: FnOnce() -> Result<T, FileSysErr> + Send + 'static,
        T: Send + 'static,
    {
        match tokio::task::spawn_blocking(f).await {
            Ok(result) => result,
            Err(e) => Err(FileSysErr::JoinTaskErr(JoinTaskErr {
                file: self.clone(),
                source: e,
                trace: trace!(),
            })),
        }
    }

    fn map_io_err_for_open(e: std::io::Error, file: &File) -> FileSysErr {
        if e.kind() == std::io::ErrorKind::NotFound {
            FileSysErr::PathDoesNotExistErr(PathDoesNotExistErr {
                path: file.path().clone(),
                trace: trace!(),
            })
        } else {
            FileSysErr::OpenFileErr(OpenFileErr {
                source: e,
                file: file.clone(),
                trace: trace!(),
            })
        }
    }
}
