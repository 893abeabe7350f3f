//! Tests for ServiceContainer declaration, discovery and lifecycle

use std::sync::Arc;

use serde_json::json;
use tao_application::container::{Resolved, ServiceContainer, ServiceState};
use tao_application::factory::ObjectFactory;
use tao_application::service_accessors;
use tao_domain::error::Error;
use tao_domain::ports::Service;
use tao_domain::value::Options;

use crate::fixtures::{Database, config_options};

fn container_with_config(entries: &[(&str, serde_json::Value)]) -> ServiceContainer {
    let mut container = ServiceContainer::new(ObjectFactory::default());
    container
        .declare("config", "Fixture.Config", config_options(entries), false)
        .unwrap();
    container
}

#[test]
fn test_service_discovered_from_configuration() {
    let mut container = container_with_config(&[("db", json!("Fixture.Database"))]);

    assert_eq!(container.state("db"), ServiceState::Undeclared);
    let db = container.get("db", false).unwrap();
    let database = db.downcast_ref::<Database>().unwrap();
    assert_eq!(database.init_calls, 1);
    assert_eq!(container.state("db"), ServiceState::Initialized);
}

#[test]
fn test_discovered_record_applies_options_before_init() {
    let mut container = container_with_config(&[(
        "db",
        json!({"class": "Fixture.Database", "options": {"dsn": "memory://"}, "immutable": true}),
    )]);

    let db = container.get("db", true).unwrap();
    let database = db.downcast_ref::<Database>().unwrap();
    assert_eq!(database.dsn_at_init, Some(json!("memory://")));

    let err = container
        .declare("db", "Fixture.Square", Options::new(), false)
        .unwrap_err();
    assert!(matches!(err, Error::ImmutableService { .. }));
}

#[test]
fn test_declared_options_readable_after_get() {
    let mut container = ServiceContainer::empty(ObjectFactory::default());
    let options = Options::from([("dsn".to_string(), json!("mem://"))]);
    container
        .declare("db", "Fixture.Database", options, false)
        .unwrap();

    let db = container.get("db", false).unwrap().into_instance().unwrap();
    let service = db.as_service().unwrap();
    assert_eq!(service.get_option("dsn"), Some(&json!("mem://")));

    let database = db.downcast_ref::<Database>().unwrap();
    assert_eq!(database.init_calls, 1);
    assert_eq!(database.dsn_at_init, Some(json!("mem://")));
}

#[test]
fn test_unknown_service_is_undefined() {
    let mut container = container_with_config(&[]);

    assert!(!container.has("cache").unwrap());
    let err = container.get("cache", false).unwrap_err();
    assert!(matches!(err, Error::UndefinedService { ref name } if name == "cache"));
}

#[test]
fn test_malformed_configuration_entry() {
    let mut container = container_with_config(&[("db", json!([1, 2]))]);
    let err = container.get("db", false).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentValue { .. }));
}

#[test]
fn test_same_instance_and_single_init() {
    let mut container = ServiceContainer::empty(ObjectFactory::default());
    container
        .declare("db", "Fixture.Database", Options::new(), false)
        .unwrap();

    let first = container.get("db", true).unwrap().into_instance().unwrap();
    let second = container.get("db", false).unwrap().into_instance().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    let database = first.downcast_ref::<Database>().unwrap();
    assert_eq!(database.init_calls, 1);
}

#[test]
fn test_redeclaration_replaces_instance() {
    let mut container = ServiceContainer::empty(ObjectFactory::default());
    let mut options = Options::new();
    options.insert("dsn".into(), json!("first"));
    container
        .declare("db", "Fixture.Database", options, false)
        .unwrap();
    let first = container.instance("db").unwrap();

    let mut options = Options::new();
    options.insert("dsn".into(), json!("second"));
    container
        .declare("db", "Fixture.Database", options, false)
        .unwrap();
    assert_eq!(container.state("db"), ServiceState::Declared);

    let second = container.instance("db").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(
        second.downcast_ref::<Database>().unwrap().dsn_at_init,
        Some(json!("second"))
    );
}

#[test]
fn test_plain_component_is_instantiated_only() {
    let mut container = ServiceContainer::empty(ObjectFactory::default());
    container
        .declare("shape", "Fixture.Shape", Options::new(), false)
        .unwrap();

    let shape = container.get("shape", false).unwrap();
    assert_eq!(shape.instance().unwrap().type_name(), "Fixture.Shape");
    assert_eq!(container.state("shape"), ServiceState::Instantiated);
}

#[test]
fn test_override_applies_to_services() {
    let mut container = ServiceContainer::empty(ObjectFactory::default());
    container
        .factory_mut()
        .register_override("Fixture.Shape", "Fixture.Shape.Circle");
    container
        .declare("shape", "Fixture.Shape", Options::new(), false)
        .unwrap();

    let shape = container.instance("shape").unwrap();
    assert_eq!(shape.type_name(), "Fixture.Shape.Circle");
}

#[test]
fn test_config_lookup_returns_derived_value() {
    let mut container = container_with_config(&[("db", json!("Fixture.Database"))]);

    let value = container
        .call_dynamic("config", &[json!("services:db")])
        .unwrap();
    assert_eq!(value.value(), Some(&json!("Fixture.Database")));

    let raw = container.get("config", false).unwrap();
    assert!(matches!(raw, Resolved::Instance(_)));
}

service_accessors! {
    trait FixtureServices {
        db => "db",
        config => "config",
    }
}

#[test]
fn test_generated_accessors() {
    let mut container = container_with_config(&[("db", json!("Fixture.Database"))]);

    let db = container.db(&[]).unwrap();
    assert!(db.downcast_ref::<Database>().is_some());

    let entry = container.config(&[json!("services:db")]).unwrap();
    assert_eq!(entry.into_value(), Some(json!("Fixture.Database")));
}
