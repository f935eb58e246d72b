// standard library
use std::io::Cursor;

// internal crates
use crate::mock::FailingReader;
use atomic_replace::filesys::{dir::Dir, errors::FileSysErr, file::File, path::PathExt};
use atomic_replace::Opt;

// external crates
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    version: u32,
}

pub mod name {
    use super::*;

    #[test]
    fn file_name() {
        let file = File::new("/tmp/testing/config.json");
        assert_eq!(file.name().unwrap(), "config.json");
    }

    #[test]
    fn root_has_no_name() {
        let err = File::new("/").name().unwrap_err();
        assert!(matches!(err, FileSysErr::UnknownFileNameErr { .. }));
    }
}

pub mod parent {
    use super::*;

    #[test]
    fn absolute() {
        let file = File::new("/tmp/testing/config.json");
        assert_eq!(file.parent().unwrap(), Dir::new("/tmp/testing"));
    }

    #[test]
    fn bare_name() {
        let file = File::new("config.json");
        assert_eq!(file.parent().unwrap(), Dir::new("."));
    }

    #[test]
    fn root() {
        let err = File::new("/").parent().unwrap_err();
        assert!(matches!(err, FileSysErr::UnknownParentDirForFileErr { .. }));
    }
}

pub mod read_bytes {
    use super::*;

    #[tokio::test]
    async fn doesnt_exist() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("missing.txt");
        let err = file.read_bytes().await.unwrap_err();
        assert!(matches!(err, FileSysErr::PathDoesNotExistErr { .. }));
    }

    #[tokio::test]
    async fn invalid_utf8() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("bad.txt");
        file.write_bytes(&[0xff, 0xfe], 0o644, &[]).await.unwrap();

        assert_eq!(file.read_bytes().await.unwrap(), vec![0xff, 0xfe]);
        let err = file.read_string().await.unwrap_err();
        assert!(matches!(err, FileSysErr::ConvertUTF8Err { .. }));
    }
}

pub mod write_string {
    use super::*;

    #[tokio::test]
    async fn create_then_replace() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.txt");

        file.write_string("lebron james", 0o644, &[]).await.unwrap();
        assert_eq!(file.read_string().await.unwrap(), "lebron james");
        assert_eq!(file.mode().await.unwrap(), 0o644);

        file.write_string("bronny", 0o600, &[]).await.unwrap();
        assert_eq!(file.read_string().await.unwrap(), "bronny");
        // existing mode wins over perm
        assert_eq!(file.mode().await.unwrap(), 0o644);
        assert!(dir.pending_files("file.txt").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn explicit_permissions() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.txt");
        file.write_string("a", 0o644, &[]).await.unwrap();

        file.write_string("b", 0o644, &[Opt::Permissions(0o600)])
            .await
            .unwrap();
        assert_eq!(file.mode().await.unwrap(), 0o600);
    }

    #[tokio::test]
    async fn parent_doesnt_exist() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.subdir("missing").file("file.txt");

        let err = file.write_string("a", 0o644, &[]).await.unwrap_err();
        assert!(matches!(err, FileSysErr::PathDoesNotExistErr { .. }));
    }
}

pub mod write_json {
    use super::*;

    #[tokio::test]
    async fn round_trip() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("config.json");
        let config = Config {
            name: "agent".to_string(),
            version: 2,
        };

        file.write_json(&config, 0o644, &[]).await.unwrap();
        assert_eq!(file.read_json::<Config>().await.unwrap(), config);
    }

    #[tokio::test]
    async fn read_invalid_json() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("config.json");
        file.write_string("{not json", 0o644, &[]).await.unwrap();

        let err = file.read_json::<Config>().await.unwrap_err();
        assert!(matches!(err, FileSysErr::ParseJSONErr { .. }));
    }
}

pub mod write_reader {
    use super::*;

    #[tokio::test]
    async fn copies_stream() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.bin");

        let written = file
            .write_reader(Cursor::new(vec![1u8; 10_000]), 0o644, &[])
            .await
            .unwrap();
        assert_eq!(written, 10_000);
        assert_eq!(file.size().await.unwrap(), 10_000);
    }

    #[tokio::test]
    async fn stream_fails() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.bin");
        file.write_string("old", 0o644, &[]).await.unwrap();

        let err = file
            .write_reader(FailingReader::new(b"new"), 0o644, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FileSysErr::ReadStreamErr { .. }));
        assert_eq!(file.read_string().await.unwrap(), "old");
    }
}

pub mod pending {
    use super::*;

    #[tokio::test]
    async fn commit() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.txt");

        let mut pending = file.pending(&[Opt::Permissions(0o640)]).unwrap();
        pending.append(b"staged").unwrap();
        assert!(!file.exists());
        pending.commit().unwrap();

        assert_eq!(file.read_string().await.unwrap(), "staged");
        assert_eq!(file.mode().await.unwrap(), 0o640);
    }
}

pub mod delete {
    use super::*;

    #[tokio::test]
    async fn existing() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("file.txt");
        file.write_string("a", 0o644, &[]).await.unwrap();

        file.delete().await.unwrap();
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn doesnt_exist() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        dir.file("missing.txt").delete().await.unwrap();
    }
}

pub mod metadata {
    use super::*;

    #[tokio::test]
    async fn missing_file() {
        let dir = Dir::create_temp_dir("testing").await.unwrap();
        let file = dir.file("missing.txt");

        let err = file.size().await.unwrap_err();
        assert!(matches!(err, FileSysErr::PathDoesNotExistErr { .. }));
        let err = file.permissions().await.unwrap_err();
        assert!(matches!(err, FileSysErr::PathDoesNotExistErr { .. }));
    }
}
