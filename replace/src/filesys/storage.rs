// standard library
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// The primitive filesystem operations a pending file is committed and
/// cleaned up with. The default methods go straight to the operating system;
/// implementors override individual operations to observe or fail them.
pub trait Storage {
    fn write(&self, file: &mut fs::File, buf: &[u8]) -> io::Result<usize> {
        file.write(buf)
    }

    fn sync_file(&self, file: &fs::File) -> io::Result<()> {
        file.sync_all()
    }

    /// Must replace an existing `to` in a single step.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn sync_dir(&self, dir: &Path) -> io::Result<()> {
        fs::File::open(dir)?.sync_all()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Operating system storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct Os;

impl Storage for Os {}
