// internal crates
use atomic_replace::filesys::DEFAULT_MODE;
use atomic_replace::{Opt, Options};

pub mod from_opts {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::from_opts(&[]);
        assert_eq!(options, Options::default());
        assert_eq!(options.permissions, DEFAULT_MODE);
        assert_eq!(options.permissions, 0o600);
        assert!(!options.existing_permissions);
        assert!(options.sync);
        assert!(options.dir_sync);
    }

    #[test]
    fn applied_in_order() {
        let options = Options::from_opts(&[
            Opt::Permissions(0o644),
            Opt::ExistingPermissions,
            Opt::NoSync,
        ]);
        assert_eq!(
            options,
            Options {
                permissions: 0o644,
                existing_permissions: true,
                sync: false,
                dir_sync: true,
            }
        );
    }

    #[test]
    fn permissions_disable_inherit() {
        let options = Options::from_opts(&[Opt::ExistingPermissions, Opt::Permissions(0o640)]);
        assert_eq!(options.permissions, 0o640);
        assert!(!options.existing_permissions);
    }

    #[test]
    fn last_permissions_win() {
        let options = Options::from_opts(&[Opt::Permissions(0o644), Opt::Permissions(0o600)]);
        assert_eq!(options.permissions, 0o600);
    }

    #[test]
    fn repeated_opts() {
        let options = Options::from_opts(&[Opt::NoDirSync, Opt::NoDirSync]);
        assert!(!options.dir_sync);
        assert!(options.sync);
    }
}
