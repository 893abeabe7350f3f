//! Tests for ObjectFactory construction and overrides

use std::env;

use serde_json::json;
use serial_test::serial;
use tao_application::directory::DirectoryContext;
use tao_application::factory::ObjectFactory;
use tao_domain::error::Error;
use tao_domain::name::LogicalName;
use tempfile::TempDir;

use crate::fixtures::{Circle, Cwd};

#[test]
fn test_build_loads_on_demand() {
    let mut factory = ObjectFactory::default();
    assert!(factory.catalog().is_empty());

    let shape = factory.build("Fixture::Shape", &[]).unwrap();
    assert_eq!(shape.type_name(), "Fixture.Shape");
    assert!(factory.loader().is_loaded("Fixture"));
    assert!(!factory.loader().is_loaded("Fixture/Shape/Circle"));
}

#[test]
fn test_override_builds_subtype() {
    let mut factory = ObjectFactory::default();
    factory.register_override("Fixture.Shape", "Fixture.Shape.Circle");

    let circle = factory
        .build_as::<Circle>("Fixture.Shape", &[json!(2.5)])
        .unwrap();
    assert_eq!(circle.radius, 2.5);
    assert!(factory.loader().is_loaded("Fixture/Shape/Circle"));
}

#[test]
fn test_override_to_unrelated_type_is_ignored() {
    let mut factory = ObjectFactory::default();
    factory.register_override("Fixture.Shape", "Fixture.Square");

    let shape = factory.build("Fixture.Shape", &[]).unwrap();
    assert_eq!(shape.type_name(), "Fixture.Shape");
}

#[test]
fn test_override_to_unknown_type_is_ignored() {
    let mut factory = ObjectFactory::default();
    factory.register_override("Fixture.Shape", "Fixture.Hexagon");

    let shape = factory.build("Fixture.Shape", &[]).unwrap();
    assert_eq!(shape.type_name(), "Fixture.Shape");
}

#[test]
fn test_override_registered_after_first_build() {
    let mut factory = ObjectFactory::default();
    assert_eq!(
        factory.build("Fixture.Shape", &[]).unwrap().type_name(),
        "Fixture.Shape"
    );

    factory.register_override("Fixture.Shape", "Fixture.Shape.Circle");
    assert_eq!(
        factory.build("Fixture.Shape", &[]).unwrap().type_name(),
        "Fixture.Shape.Circle"
    );
}

#[test]
fn test_back_edge_ends_override_chain() {
    let mut factory = ObjectFactory::default();
    factory.register_override("Fixture.Shape", "Fixture.Shape.Circle");
    factory.register_override("Fixture.Shape.Circle", "Fixture.Shape");

    // The back edge is not a subtype hop, so the chain simply stops.
    let shape = factory.build("Fixture.Shape", &[]).unwrap();
    assert_eq!(shape.type_name(), "Fixture.Shape.Circle");
}

#[test]
fn test_interfaces_are_not_constructible() {
    let mut factory = ObjectFactory::default();
    let err = factory.build("Fixture.Drawable", &[]).unwrap_err();
    assert!(matches!(err, Error::Resolution { .. }));
}

#[test]
fn test_hierarchy_and_subtype_load_first() {
    let mut factory = ObjectFactory::default();
    let circle = LogicalName::new("Fixture.Shape.Circle");

    let chain = factory.hierarchy_of(&circle).unwrap();
    assert_eq!(
        chain.iter().map(LogicalName::as_str).collect::<Vec<_>>(),
        vec!["Fixture.Shape.Circle", "Fixture.Shape"]
    );
    assert!(
        factory
            .is_subtype_of(&LogicalName::new("Fixture.Drawable"), &circle)
            .unwrap()
    );
}

#[test]
#[serial]
fn test_construction_runs_in_base_directory() {
    let base = TempDir::new().unwrap();
    let before = env::current_dir().unwrap();
    let mut factory =
        ObjectFactory::default().with_directory(DirectoryContext::with_base_dir(base.path()));

    let cwd = factory.build_as::<Cwd>("Fixture.Cwd", &[]).unwrap();
    assert_eq!(
        cwd.cwd.canonicalize().unwrap(),
        base.path().canonicalize().unwrap()
    );
    assert_eq!(env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_failed_construction_restores_directory() {
    let base = TempDir::new().unwrap();
    let before = env::current_dir().unwrap();
    let mut factory =
        ObjectFactory::default().with_directory(DirectoryContext::with_base_dir(base.path()));

    let err = factory.build("Fixture.Cwd", &[json!(true)]).unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
    assert_eq!(env::current_dir().unwrap(), before);
}
