//! Tests for TAO_PATH parsing

use figment::Jail;
use serial_test::serial;
use tao_domain::name::LogicalName;
use tao_infrastructure::config::search_paths_from_env;

#[test]
#[serial]
fn test_rules_from_environment() {
    Jail::expect_with(|jail| {
        jail.set_env("TAO_PATH", "App.Models:vendor/models;*:lib;broken");

        let paths = search_paths_from_env();
        assert_eq!(paths.rules().len(), 2);
        assert_eq!(
            paths.unit_path(&LogicalName::new("App.Models.User")),
            "vendor/models/User"
        );
        Ok(())
    });
}

#[test]
#[serial]
fn test_unset_variable_gives_no_rules() {
    Jail::expect_with(|_jail| {
        assert!(search_paths_from_env().is_empty());
        Ok(())
    });
}
