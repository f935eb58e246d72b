// standard library
use std::fs;
use std::io::Cursor;

// internal crates
use crate::mock::FailingReader;
use atomic_replace::filesys::replace::{Overwrite, Replace};
use atomic_replace::filesys::{dir::Dir, errors::FileSysErr, overwrite, path::PathExt, Opt};

pub mod write_file {
    use super::*;

    #[tokio::test]
    async fn creates_file() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.file("file.txt");

        overwrite::write_file(dest.path(), b"hello", 0o644).unwrap();
        assert_eq!(fs::read(dest.path()).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn truncates_longer_content() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.file("file.txt");
        fs::write(dest.path(), "a much longer old payload").unwrap();

        overwrite::write_file(dest.path(), b"short", 0o644).unwrap();
        assert_eq!(fs::read(dest.path()).unwrap(), b"short");
    }

    #[tokio::test]
    async fn missing_directory() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.subdir("missing").file("file.txt");

        let err = overwrite::write_file(dest.path(), b"hello", 0o644).unwrap_err();
        assert!(matches!(err, FileSysErr::OpenFileErr { .. }));
    }

    #[tokio::test]
    async fn ignores_opts() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.file("file.txt");

        Overwrite::write_file(dest.path(), b"hello", 0o644, &[Opt::NoSync]).unwrap();
        assert_eq!(fs::read(dest.path()).unwrap(), b"hello");
        assert!(!<Overwrite as Replace>::ATOMIC);
    }
}

pub mod write_file_reader {
    use super::*;

    #[tokio::test]
    async fn copies_stream() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.file("file.txt");
        fs::write(dest.path(), "old old old").unwrap();

        let mut reader = Cursor::new(b"new".to_vec());
        let written = overwrite::write_file_reader(dest.path(), &mut reader, 0o644).unwrap();
        assert_eq!(written, 3);
        assert_eq!(fs::read(dest.path()).unwrap(), b"new");
    }

    #[tokio::test]
    async fn stream_fails() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let dest = dir.file("file.txt");

        let mut reader = FailingReader::new(b"partial");
        let err = overwrite::write_file_reader(dest.path(), &mut reader, 0o644).unwrap_err();
        assert!(matches!(err, FileSysErr::ReadStreamErr { .. }));
        // not atomic: whatever was copied stays
        assert_eq!(fs::read(dest.path()).unwrap(), b"partial");
    }
}
