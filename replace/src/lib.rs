//! Atomic, crash-consistent replacement of file contents.
//!
//! New content is staged in a [`PendingFile`] next to the destination and
//! renamed over it once complete, so readers of the destination see either the
//! old content or all of the new content. [`write_file`] and
//! [`write_file_reader`] run the whole lifecycle; [`maybe`] offers the same
//! calls on platforms without an atomic rename.

pub mod errors;
pub mod filesys;
pub mod maybe;
pub mod settings;

#[cfg(unix)]
pub use filesys::pending::PendingFile;
#[cfg(unix)]
pub use filesys::write::{write_file, write_file_reader};
pub use filesys::{errors::FileSysErr, Opt, Options};
