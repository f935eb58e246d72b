//! Non-atomic replacement for platforms that can't rename over an existing
//! file.
//!
//! The destination is truncated and rewritten in place. A crash part way
//! through can leave it empty, truncated, or mixed between old and new content,
//! and the mode of an existing file is not carried over. `perm` only applies to
//! a freshly created file (and only on unix). Durability options are ignored.

// standard library
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

// internal crates
use crate::filesys::errors::{FileSysErr, OpenFileErr, ReadStreamErr, WriteFileErr};
use crate::filesys::file::File;
use crate::filesys::path::PathExt;
use crate::trace;

// external crates
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Overwrite the file at `path` with `data`.
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8], perm: u32) -> Result<(), FileSysErr> {
    let file = File::new(path.as_ref());
    let mut handle = open(&file, perm)?;
    handle.write_all(data).map_err(|e| write_err(&file, e))?;
    debug!("overwrote '{}' in place", file);
    Ok(())
}

/// Overwrite the file at `path` with everything read from `reader`, returning
/// the number of bytes copied.
pub fn write_file_reader<P: AsRef<Path>, R: Read>(
    path: P,
    reader: &mut R,
    perm: u32,
) -> Result<u64, FileSysErr> {
    let file = File::new(path.as_ref());
    let mut handle = open(&file, perm)?;

    let mut buf = vec![0u8; 8 * 1024];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FileSysErr::ReadStreamErr(ReadStreamErr {
                    file,
                    source: e,
                    trace: trace!(),
                }));
            }
        };
        handle
            .write_all(&buf[..n])
            .map_err(|e| write_err(&file, e))?;
        written += n as u64;
    }
    debug!("overwrote '{}' in place ({} bytes)", file, written);
    Ok(written)
}

fn open(file: &File, perm: u32) -> Result<fs::File, FileSysErr> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;

    options.open(file.path()).map_err(|e| {
        FileSysErr::OpenFileErr(OpenFileErr {
            file: file.clone(),
            source: e,
            trace: trace!(),
        })
    })
}

fn write_err(file: &File, e: io::Error) -> FileSysErr {
    FileSysErr::WriteFileErr(WriteFileErr {
        file: file.clone(),
        source: e,
        trace: trace!(),
    })
}
