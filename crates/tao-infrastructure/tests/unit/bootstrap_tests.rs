//! Tests for runtime bootstrap from configuration

use std::fs;

use serde_json::json;
use serial_test::serial;
use tao_application::container::ServiceState;
use tao_domain::error::Error;
use tao_domain::ports::Service;
use tao_infrastructure::config::{RuntimeConfig, ServiceSpec};
use tao_infrastructure::init_runtime;
use tao_providers::{BasicService, ConfigService};
use tempfile::TempDir;

#[test]
#[serial]
fn test_declared_services_are_available() {
    let mut config = RuntimeConfig::default();
    let mut spec = ServiceSpec::new("Tao.Service");
    spec.options.insert("ttl".to_string(), json!(60));
    config.services.insert("cache".to_string(), spec);

    let mut runtime = init_runtime(config).unwrap();
    let container = runtime.container_mut();
    assert_eq!(container.state("cache"), ServiceState::Declared);

    let cache = container.get("cache", true).unwrap();
    let cache = cache.downcast_ref::<BasicService>().unwrap();
    assert_eq!(cache.get_option("ttl"), Some(&json!(60)));
}

#[test]
#[serial]
fn test_immutable_declaration_is_kept() {
    let mut config = RuntimeConfig::default();
    let mut spec = ServiceSpec::new("Tao.Service");
    spec.immutable = true;
    config.services.insert("cache".to_string(), spec);

    let mut runtime = init_runtime(config).unwrap();
    let err = runtime
        .container_mut()
        .declare("cache", "Tao.Service.Config", Default::default(), false)
        .unwrap_err();
    assert!(matches!(err, Error::ImmutableService { .. }));
}

#[test]
#[serial]
fn test_overrides_are_registered() {
    let mut config = RuntimeConfig::default();
    config
        .overrides
        .insert("Tao.Service".to_string(), "Tao.Service.Config".to_string());

    let mut runtime = init_runtime(config).unwrap();
    let built = runtime.factory_mut().build("Tao.Service", &[]).unwrap();
    assert_eq!(built.type_name(), "Tao.Service.Config");
}

#[test]
#[serial]
fn test_disabled_autoload_preloads_everything() {
    let mut config = RuntimeConfig::default();
    config.runtime.autoload = false;

    let mut runtime = init_runtime(config).unwrap();
    let factory = runtime.factory_mut();
    assert!(!factory.loader().is_enabled());
    assert!(factory.loader().is_loaded("Tao/Service"));
    assert!(factory.loader().is_loaded("Tao/Service/Config"));
    assert!(factory.build("Tao.Service", &[]).is_ok());
}

#[test]
#[serial]
fn test_services_discovered_from_site_configuration() {
    let root = TempDir::new().unwrap();
    let www = root.path().join("www");
    let config_dir = root.path().join("config");
    fs::create_dir_all(&www).unwrap();
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("site.toml"), "env = \"prod\"\n").unwrap();
    fs::write(
        config_dir.join("services.toml"),
        "[mailer]\nclass = \"Tao.Service\"\n[mailer.options]\nfrom = \"noreply@example.org\"\n",
    )
    .unwrap();

    let mut config = RuntimeConfig::default();
    config.runtime.base_dir = Some(www);

    let mut runtime = init_runtime(config).unwrap();
    let container = runtime.container_mut();

    let mailer = container.get("mailer", true).unwrap();
    let mailer = mailer.downcast_ref::<BasicService>().unwrap();
    assert_eq!(mailer.get_option("from"), Some(&json!("noreply@example.org")));

    let config_service = container.instance("config").unwrap();
    let config_service = config_service.downcast_ref::<ConfigService>().unwrap();
    assert_eq!(config_service.env(), Some("prod"));
}
