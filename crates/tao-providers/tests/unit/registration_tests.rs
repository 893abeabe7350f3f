//! Tests that the built-in services register and load on demand

use serial_test::serial;
use tao_application::container::ServiceContainer;
use tao_application::factory::ObjectFactory;
use tao_application::loader::Loader;
use tao_application::registry::{find_code_unit, list_code_units};
use tao_application::search_paths::SearchPaths;
use tao_domain::constants::{BASE_SERVICE_CLASS, CONFIG_SERVICE_CLASS};
use tao_domain::error::Error;
use tao_domain::name::LogicalName;
use tao_domain::ports::{Component, Service};
use tao_providers::{BasicService, ConfigService};

#[test]
fn test_units_are_linked() {
    let units = list_code_units();
    assert!(units.iter().any(|(path, _)| *path == "Tao/Service"));
    assert!(units.iter().any(|(path, _)| *path == "Tao/Service/Config"));
    assert_eq!(
        find_code_unit("Tao/Service/Config").unwrap().requires,
        &[BASE_SERVICE_CLASS]
    );
}

#[test]
fn test_config_service_extends_base_service() {
    let mut factory = ObjectFactory::default();
    let config = LogicalName::new(CONFIG_SERVICE_CLASS);

    assert!(
        factory
            .is_subtype_of(&LogicalName::new(BASE_SERVICE_CLASS), &config)
            .unwrap()
    );
    assert!(factory.loader().is_loaded("Tao/Service"));
}

#[test]
fn test_build_built_in_services() {
    let mut factory = ObjectFactory::default();

    let base = factory.build_as::<BasicService>("Tao::Service", &[]).unwrap();
    assert!(base.options().is_empty());

    let config = factory.build("Tao.Service.Config", &[]).unwrap();
    assert!(config.is::<ConfigService>());
    assert!(config.as_service().is_some());
}

#[test]
fn test_search_rules_keep_built_in_units_reachable() {
    for rules in [
        SearchPaths::new().with_rule("*", "lib"),
        SearchPaths::new().with_rule("Tao", "vendor/tao"),
    ] {
        let mut factory = ObjectFactory::new(Loader::new().with_search_paths(rules));
        let config = factory.build(CONFIG_SERVICE_CLASS, &[]).unwrap();
        assert!(config.is::<ConfigService>());
        assert!(factory.loader().is_loaded("Tao/Service/Config"));
        assert!(factory.loader().is_loaded("Tao/Service"));
    }
}

#[test]
#[serial]
fn test_undeclared_service_with_wildcard_rule_is_undefined() {
    let loader = Loader::new().with_search_paths(SearchPaths::new().with_rule("*", "lib"));
    let mut container = ServiceContainer::new(ObjectFactory::new(loader));

    assert!(!container.has("cache").unwrap());
    let err = container.get("cache", false).unwrap_err();
    assert!(matches!(err, Error::UndefinedService { .. }));
    assert!(container.get("config", true).is_ok());
}
