// internal crates
use crate::mock::init_tracing;
use atomic_replace::filesys::DEFAULT_MODE;
use atomic_replace::settings::Settings;
use atomic_replace::{Opt, Options};

pub mod deserialize {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        init_tracing();
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial() {
        let settings: Settings =
            serde_json::from_str(r#"{"permissions": 384, "dir_sync": false}"#).unwrap();
        assert_eq!(
            settings,
            Settings {
                permissions: 0o600,
                dir_sync: false,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn permissions_are_decimal() {
        let settings: Settings = serde_json::from_str(r#"{"permissions": 420}"#).unwrap();
        assert_eq!(settings.permissions, 0o644);
        assert_eq!(Settings::default().permissions, DEFAULT_MODE);
    }

    #[test]
    fn wrong_type() {
        let result = serde_json::from_str::<Settings>(r#"{"sync": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_round_trip() {
        let settings = Settings {
            permissions: 0o640,
            existing_permissions: false,
            sync: false,
            dir_sync: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }
}

pub mod opts {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.opts(),
            vec![Opt::Permissions(DEFAULT_MODE), Opt::ExistingPermissions]
        );
        assert_eq!(
            settings.options(),
            Options {
                permissions: 0o600,
                existing_permissions: true,
                sync: true,
                dir_sync: true,
            }
        );
    }

    #[test]
    fn everything_off() {
        let settings = Settings {
            permissions: 0o600,
            existing_permissions: false,
            sync: false,
            dir_sync: false,
        };
        assert_eq!(
            settings.opts(),
            vec![Opt::Permissions(0o600), Opt::NoSync, Opt::NoDirSync]
        );
        let options = settings.options();
        assert!(!options.sync);
        assert!(!options.dir_sync);
        assert!(!options.existing_permissions);
    }
}
