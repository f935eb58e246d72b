// standard library
use std::io::{self, Read};
use std::path::Path;

// internal crates
use crate::filesys::errors::{FileSysErr, ReadStreamErr};
use crate::filesys::pending::PendingFile;
use crate::filesys::Opt;
use crate::trace;

const COPY_BUF_SIZE: usize = 8 * 1024;

/// Atomically replace the file at `path` with `data`.
///
/// `perm` is used for a fresh file; an existing destination keeps its mode
/// unless `opts` override it. The pending file is removed on every exit path.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    data: &[u8],
    perm: u32,
    opts: &[Opt],
) -> Result<(), FileSysErr> {
    let mut pending = PendingFile::new(path.as_ref(), &with_defaults(perm, opts))?;
    let result = pending.append(data).and_then(|_| pending.commit());
    finish(&mut pending, result)
}

/// Atomically replace the file at `path` with everything read from `reader`,
/// returning the number of bytes copied. Permissions behave as in
/// [`write_file`].
pub fn write_file_reader<P: AsRef<Path>, R: Read>(
    path: P,
    reader: &mut R,
    perm: u32,
    opts: &[Opt],
) -> Result<u64, FileSysErr> {
    let mut pending = PendingFile::new(path.as_ref(), &with_defaults(perm, opts))?;
    let result = copy(reader, &mut pending).and_then(|written| {
        pending.commit()?;
        Ok(written)
    });
    finish(&mut pending, result)
}

fn with_defaults(perm: u32, opts: &[Opt]) -> Vec<Opt> {
    let mut all = vec![Opt::Permissions(perm), Opt::ExistingPermissions];
    all.extend_from_slice(opts);
    all
}

fn copy<R: Read>(reader: &mut R, pending: &mut PendingFile) -> Result<u64, FileSysErr> {
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(written),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FileSysErr::ReadStreamErr(ReadStreamErr {
                    file: pending.destination().clone(),
                    source: e,
                    trace: trace!(),
                }));
            }
        };
        pending.append(&buf[..n])?;
        written += n as u64;
    }
}

// the lifecycle error wins over a cleanup error, which has already been logged
fn finish<T>(pending: &mut PendingFile, result: Result<T, FileSysErr>) -> Result<T, FileSysErr> {
    let cleanup = pending.cleanup();
    let value = result?;
    cleanup?;
    Ok(value)
}
