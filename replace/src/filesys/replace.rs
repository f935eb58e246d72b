// standard library
use std::io::Read;
use std::path::Path;

// internal crates
use crate::filesys::errors::FileSysErr;
use crate::filesys::{overwrite, Opt};

/// A way of replacing a whole file. Each platform gets exactly one
/// implementation, see [`Platform`].
pub trait Replace {
    /// Whether a reader of the destination can ever observe partial content.
    const ATOMIC: bool;

    fn write_file(path: &Path, data: &[u8], perm: u32, opts: &[Opt]) -> Result<(), FileSysErr>;

    fn write_file_reader<R: Read>(
        path: &Path,
        reader: &mut R,
        perm: u32,
        opts: &[Opt],
    ) -> Result<u64, FileSysErr>;
}

/// Replacement through a pending file and a rename.
#[cfg(unix)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Atomic;

#[cfg(unix)]
impl Replace for Atomic {
    const ATOMIC: bool = true;

    fn write_file(path: &Path, data: &[u8], perm: u32, opts: &[Opt]) -> Result<(), FileSysErr> {
        crate::filesys::write::write_file(path, data, perm, opts)
    }

    fn write_file_reader<R: Read>(
        path: &Path,
        reader: &mut R,
        perm: u32,
        opts: &[Opt],
    ) -> Result<u64, FileSysErr> {
        crate::filesys::write::write_file_reader(path, reader, perm, opts)
    }
}

/// In-place overwrite. `opts` are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overwrite;

impl Replace for Overwrite {
    const ATOMIC: bool = false;

    fn write_file(path: &Path, data: &[u8], perm: u32, _opts: &[Opt]) -> Result<(), FileSysErr> {
        overwrite::write_file(path, data, perm)
    }

    fn write_file_reader<R: Read>(
        path: &Path,
        reader: &mut R,
        perm: u32,
        _opts: &[Opt],
    ) -> Result<u64, FileSysErr> {
        overwrite::write_file_reader(path, reader, perm)
    }
}

#[cfg(unix)]
pub type Platform = Atomic;

// no atomic rename over an existing file outside of unix
#[cfg(not(unix))]
pub type Platform = Overwrite;
