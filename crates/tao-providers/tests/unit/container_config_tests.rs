//! Tests for service discovery through the configuration service

use std::fs;
use std::path::Path;

use serde_json::json;
use serial_test::serial;
use tao_application::container::{ServiceContainer, ServiceState};
use tao_application::directory::DirectoryContext;
use tao_application::factory::ObjectFactory;
use tao_domain::error::Error;
use tao_domain::ports::Service;
use tao_providers::{BasicService, ConfigService};
use tempfile::TempDir;

/// `<root>/www` is the base directory, `<root>/config` holds the files
fn site(services: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("www")).unwrap();
    write(&root.path().join("config"), "services.toml", services);
    write(&root.path().join("config"), "site.toml", "env = \"test\"\n");
    root
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

fn container(root: &TempDir) -> ServiceContainer {
    let factory = ObjectFactory::default()
        .with_directory(DirectoryContext::with_base_dir(root.path().join("www")));
    ServiceContainer::new(factory)
}

#[test]
#[serial]
fn test_service_declared_by_configuration_file() {
    let root = site("db = \"Tao.Service\"\n");
    let mut container = container(&root);

    assert!(container.has("db").unwrap());
    let db = container.get("db", false).unwrap();
    assert!(db.downcast_ref::<BasicService>().is_some());
    assert_eq!(container.state("db"), ServiceState::Initialized);
    assert_eq!(container.state("config"), ServiceState::Initialized);
}

#[test]
#[serial]
fn test_record_entry_with_options() {
    let root = site("[cache]\nclass = \"Tao::Service\"\nimmutable = true\n[cache.options]\nttl = 60\n");
    let mut container = container(&root);

    let cache = container.get("cache", true).unwrap();
    let cache = cache.downcast_ref::<BasicService>().unwrap();
    assert_eq!(cache.get_option("ttl"), Some(&json!(60)));

    let err = container
        .declare("cache", "Tao.Service", Default::default(), false)
        .unwrap_err();
    assert!(matches!(err, Error::ImmutableService { .. }));
}

#[test]
#[serial]
fn test_root_configuration_sets_environment() {
    let root = site("");
    write(&root.path().join("config"), "services.test.toml", "db = \"Tao.Service\"\n");
    let mut container = container(&root);

    assert!(container.has("db").unwrap());
    let config = container.get("config", false).unwrap();
    let config = config.downcast_ref::<ConfigService>().unwrap();
    assert_eq!(config.env(), Some("test"));
}

#[test]
#[serial]
fn test_missing_service_is_undefined() {
    let root = site("");
    let mut container = container(&root);

    let err = container.get("mailer", false).unwrap_err();
    assert!(matches!(err, Error::UndefinedService { .. }));
}
