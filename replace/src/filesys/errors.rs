// standard library
use std::io;
use std::path::PathBuf;

// internal crates
use crate::errors::{Code, Error, Trace};
use crate::filesys::{dir::Dir, file::File};

// ================================= SETUP ====================================== //
#[derive(Debug, thiserror::Error)]
#[error("unable to determine file name for file path: {file}")]
pub struct UnknownFileNameErr {
    pub file: File,
    pub trace: Box<Trace>,
}

impl Error for UnknownFileNameErr {
    fn code(&self) -> Code {
        Code::Setup
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unable to determine parent directory for file: {file}")]
pub struct UnknownParentDirForFileErr {
    pub file: File,
    pub trace: Box<Trace>,
}

impl Error for UnknownParentDirForFileErr {
    fn code(&self) -> Code {
        Code::Setup
    }
}

#[derive(Debug, thiserror::Error)]
#[error("path does not exist: {}", .path.display())]
pub struct PathDoesNotExistErr {
    pub path: PathBuf,
    pub trace: Box<Trace>,
}

impl Error for PathDoesNotExistErr {
    fn code(&self) -> Code {
        Code::Setup
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(io::ErrorKind::NotFound)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("path exists: {}", .path.display())]
pub struct PathExistsErr {
    pub path: PathBuf,
    pub trace: Box<Trace>,
}

impl Error for PathExistsErr {}

#[derive(Debug, thiserror::Error)]
#[error("failed to create pending file in directory '{dir}': {source}")]
pub struct CreatePendingFileErr {
    pub dir: Dir,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for CreatePendingFileErr {
    fn code(&self) -> Code {
        Code::Setup
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to resolve permissions from existing file '{file}': {source}")]
pub struct ResolvePermissionsErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for ResolvePermissionsErr {
    fn code(&self) -> Code {
        Code::Setup
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to set mode {mode:o} on file '{file}': {source}")]
pub struct SetPermissionsErr {
    pub file: File,
    pub mode: u32,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for SetPermissionsErr {
    fn code(&self) -> Code {
        Code::Setup
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

// ================================= WRITE ====================================== //
#[derive(Debug, thiserror::Error)]
#[error("failed to write to pending file '{file}': {source}")]
pub struct WritePendingFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for WritePendingFileErr {
    fn code(&self) -> Code {
        Code::Write
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read source stream for file '{file}': {source}")]
pub struct ReadStreamErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for ReadStreamErr {
    fn code(&self) -> Code {
        Code::Write
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write file '{file}': {source}")]
pub struct WriteFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for WriteFileErr {
    fn code(&self) -> Code {
        Code::Write
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("pending file '{file}' has an incomplete write and can only be cleaned up")]
pub struct IncompleteWriteErr {
    pub file: File,
    pub trace: Box<Trace>,
}

impl Error for IncompleteWriteErr {
    fn code(&self) -> Code {
        Code::Write
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to serialize json for file '{file}': {source}")]
pub struct SerializeJSONErr {
    pub file: File,
    pub source: serde_json::Error,
    pub trace: Box<Trace>,
}

impl Error for SerializeJSONErr {
    fn code(&self) -> Code {
        Code::Write
    }
}

// =============================== DURABILITY =================================== //
#[derive(Debug, thiserror::Error)]
#[error("write incomplete, failed to sync pending file '{file}': {source}")]
pub struct SyncPendingFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for SyncPendingFileErr {
    fn code(&self) -> Code {
        Code::Durability
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to sync directory '{dir}': {source}")]
pub struct SyncDirErr {
    pub dir: Dir,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for SyncDirErr {
    fn code(&self) -> Code {
        Code::Durability
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

// ================================= RENAME ===================================== //
#[derive(Debug, thiserror::Error)]
#[error("failed to rename pending file '{src_file}' to '{dest_file}': {source}")]
pub struct RenamePendingFileErr {
    pub src_file: File,
    pub dest_file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for RenamePendingFileErr {
    fn code(&self) -> Code {
        Code::Rename
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

// ================================ CLEANUP ===================================== //
#[derive(Debug, thiserror::Error)]
#[error("failed to remove pending file '{file}': {source}")]
pub struct RemovePendingFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for RemovePendingFileErr {
    fn code(&self) -> Code {
        Code::Cleanup
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("pending file for '{file}' has already been finalized")]
pub struct AlreadyFinalizedErr {
    pub file: File,
    pub trace: Box<Trace>,
}

impl Error for AlreadyFinalizedErr {
    fn code(&self) -> Code {
        Code::AlreadyFinalized
    }
}

// =============================== FILES & DIRS ================================= //
#[derive(Debug, thiserror::Error)]
#[error("failed to open file '{file}': {source}")]
pub struct OpenFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for OpenFileErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read file '{file}': {source}")]
pub struct ReadFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for ReadFileErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("UTF-8 conversion failed: {source}")]
pub struct ConvertUTF8Err {
    pub source: std::str::Utf8Error,
    pub trace: Box<Trace>,
}

impl Error for ConvertUTF8Err {}

#[derive(Debug, thiserror::Error)]
#[error("failed to parse json from file '{file}': {source}")]
pub struct ParseJSONErr {
    pub file: File,
    pub source: serde_json::Error,
    pub trace: Box<Trace>,
}

impl Error for ParseJSONErr {}

#[derive(Debug, thiserror::Error)]
#[error("failed to read metadata for file '{file}': {source}")]
pub struct FileMetadataErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for FileMetadataErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to delete file '{file}': {source}")]
pub struct DeleteFileErr {
    pub file: File,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for DeleteFileErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create directory '{dir}': {source}")]
pub struct CreateDirErr {
    pub dir: Dir,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for CreateDirErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to delete directory '{dir}': {source}")]
pub struct DeleteDirErr {
    pub dir: Dir,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for DeleteDirErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read directory '{dir}': {source}")]
pub struct ReadDirErr {
    pub dir: Dir,
    pub source: io::Error,
    pub trace: Box<Trace>,
}

impl Error for ReadDirErr {
    fn io_kind(&self) -> Option<io::ErrorKind> {
        Some(self.source.kind())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("blocking task for file '{file}' failed to complete: {source}")]
pub struct JoinTaskErr {
    pub file: File,
    pub source: tokio::task::JoinError,
    pub trace: Box<Trace>,
}

impl Error for JoinTaskErr {}

#[derive(Debug, thiserror::Error)]
pub enum FileSysErr {
    // setup errors
    #[error(transparent)]
    UnknownFileNameErr(UnknownFileNameErr),
    #[error(transparent)]
    UnknownParentDirForFileErr(UnknownParentDirForFileErr),
    #[error(transparent)]
    PathDoesNotExistErr(PathDoesNotExistErr),
    #[error(transparent)]
    PathExistsErr(PathExistsErr),
    #[error(transparent)]
    CreatePendingFileErr(CreatePendingFileErr),
    #[error(transparent)]
    ResolvePermissionsErr(ResolvePermissionsErr),
    #[error(transparent)]
    SetPermissionsErr(SetPermissionsErr),

    // write errors
    #[error(transparent)]
    WritePendingFileErr(WritePendingFileErr),
    #[error(transparent)]
    ReadStreamErr(ReadStreamErr),
    #[error(transparent)]
    WriteFileErr(WriteFileErr),
    #[error(transparent)]
    IncompleteWriteErr(IncompleteWriteErr),
    #[error(transparent)]
    SerializeJSONErr(SerializeJSONErr),

    // durability errors
    #[error(transparent)]
    SyncPendingFileErr(SyncPendingFileErr),
    #[error(transparent)]
    SyncDirErr(SyncDirErr),

    // rename errors
    #[error(transparent)]
    RenamePendingFileErr(RenamePendingFileErr),

    // cleanup errors
    #[error(transparent)]
    RemovePendingFileErr(RemovePendingFileErr),
    #[error(transparent)]
    AlreadyFinalizedErr(AlreadyFinalizedErr),

    // file & directory errors
    #[error(transparent)]
    OpenFileErr(OpenFileErr),
    #[error(transparent)]
    ReadFileErr(ReadFileErr),
    #[error(transparent)]
    ConvertUTF8Err(ConvertUTF8Err),
    #[error(transparent)]
    ParseJSONErr(ParseJSONErr),
    #[error(transparent)]
    FileMetadataErr(FileMetadataErr),
    #[error(transparent)]
    DeleteFileErr(DeleteFileErr),
    #[error(transparent)]
    CreateDirErr(CreateDirErr),
    #[error(transparent)]
    DeleteDirErr(DeleteDirErr),
    #[error(transparent)]
    ReadDirErr(ReadDirErr),
    #[error(transparent)]
    JoinTaskErr(JoinTaskErr),
}

crate::impl_error!(FileSysErr {
    UnknownFileNameErr,
    UnknownParentDirForFileErr,
    PathDoesNotExistErr,
    PathExistsErr,
    CreatePendingFileErr,
    ResolvePermissionsErr,
    SetPermissionsErr,
    WritePendingFileErr,
    ReadStreamErr,
    WriteFileErr,
    IncompleteWriteErr,
    SerializeJSONErr,
    SyncPendingFileErr,
    SyncDirErr,
    RenamePendingFileErr,
    RemovePendingFileErr,
    AlreadyFinalizedErr,
    OpenFileErr,
    ReadFileErr,
    ConvertUTF8Err,
    ParseJSONErr,
    FileMetadataErr,
    DeleteFileErr,
    CreateDirErr,
    DeleteDirErr,
    ReadDirErr,
    JoinTaskErr,
});
