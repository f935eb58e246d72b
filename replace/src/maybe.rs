//! Whole-file writes that are atomic where the platform allows it.
//!
//! On unix these are the same as [`crate::write_file`] and
//! [`crate::write_file_reader`]. Elsewhere they fall back to an in-place
//! overwrite, which is not atomic and ignores most permission bits. Prefer the
//! atomic functions if a partially written file is not acceptable; these exist
//! for callers that are fine with the weaker guarantee on such platforms.

// standard library
use std::io::Read;
use std::path::Path;

// internal crates
use crate::filesys::errors::FileSysErr;
use crate::filesys::replace::{Platform, Replace};
use crate::filesys::Opt;

/// Whether [`write_file`] and [`write_file_reader`] are atomic on this
/// platform.
pub const IS_ATOMIC: bool = <Platform as Replace>::ATOMIC;

pub fn write_file<P: AsRef<Path>>(
    path: P,
    data: &[u8],
    perm: u32,
    opts: &[Opt],
) -> Result<(), FileSysErr> {
    Platform::write_file(path.as_ref(), data, perm, opts)
}

pub fn write_file_reader<P: AsRef<Path>, R: Read>(
    path: P,
    reader: &mut R,
    perm: u32,
    opts: &[Opt],
) -> Result<u64, FileSysErr> {
    Platform::write_file_reader(path.as_ref(), reader, perm, opts)
}
