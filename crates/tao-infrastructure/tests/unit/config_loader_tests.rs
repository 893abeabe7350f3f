//! Tests for ConfigLoader source precedence and validation

use std::path::Path;

use figment::Jail;
use serde_json::json;
use serial_test::serial;
use tao_domain::error::Error;
use tao_infrastructure::config::{ConfigLoader, RuntimeConfig, ServiceSpec};

#[test]
#[serial]
fn test_defaults_without_sources() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new()
            .with_config_path("missing.toml")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config, RuntimeConfig::default());
        assert!(config.runtime.autoload);
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
#[serial]
fn test_file_then_environment() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "tao.toml",
            r#"
            paths = ["App:/srv/app"]

            [runtime]
            autoload = true
            base_dir = "www"

            [overrides]
            "App.Shape" = "App.Shape.Circle"

            [services.db]
            class = "App.Database"
            immutable = true
            options = { dsn = "memory://" }

            [logging]
            level = "debug"
            "#,
        )?;
        jail.set_env("TAO_RUNTIME__AUTOLOAD", "false");
        jail.set_env("TAO_LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert!(!config.runtime.autoload);
        assert_eq!(config.runtime.base_dir.as_deref(), Some(Path::new("www")));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.paths, vec!["App:/srv/app".to_string()]);
        assert_eq!(config.overrides["App.Shape"], "App.Shape.Circle");

        let db = &config.services["db"];
        assert_eq!(db.class, "App.Database");
        assert!(db.immutable);
        assert_eq!(db.options["dsn"], json!("memory://"));
        Ok(())
    });
}

#[test]
#[serial]
fn test_invalid_search_rule_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("tao.toml", r#"paths = ["no-separator"]"#)?;

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
#[serial]
fn test_invalid_log_level_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TAO_LOGGING__LEVEL", "loud");

        let err = ConfigLoader::new()
            .with_config_path("missing.toml")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
        Ok(())
    });
}

#[test]
#[serial]
fn test_saved_file_loads_back() {
    Jail::expect_with(|jail| {
        let mut config = RuntimeConfig::default();
        config.runtime.preload = true;
        config
            .services
            .insert("cache".to_string(), ServiceSpec::new("Tao.Service"));

        let path = jail.directory().join("saved.toml");
        let loader = ConfigLoader::new().with_config_path(&path);
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;

        assert_eq!(loader.config_path(), Some(path.as_path()));
        assert_eq!(loader.load().map_err(|e| e.to_string())?, config);
        Ok(())
    });
}

#[test]
#[serial]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("SITE_RUNTIME__PRELOAD", "true");

        let config = ConfigLoader::new()
            .with_config_path("missing.toml")
            .with_env_prefix("SITE")
            .load()
            .map_err(|e| e.to_string())?;
        assert!(config.runtime.preload);
        Ok(())
    });
}
