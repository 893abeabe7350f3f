//! Unit tests for logical names

use tao_domain::name::{LogicalName, canonicalize};

#[test]
fn test_equality_uses_canonical_form() {
    assert_eq!(LogicalName::new(".Shape.Circle."), LogicalName::new("Shape::Circle"));
    assert_eq!(LogicalName::new("Shape\\Circle"), LogicalName::new("Shape..Circle"));
    assert_ne!(LogicalName::new("Shape.Circle"), LogicalName::new("Shape.circle"));
}

#[test]
fn test_empty_input() {
    assert!(LogicalName::new("").is_empty());
    assert!(LogicalName::new(" . .. ").is_empty());
    assert_eq!(canonicalize("::"), "");
}

#[test]
fn test_implementation_mapping() {
    let name = LogicalName::new("Tao.Service.Config");
    let id = name.implementation();
    assert_eq!(id.to_string(), "Tao::Service::Config");
    assert_eq!(id.logical(), &name);
    assert_eq!(LogicalName::new(id.to_string()), name);
}

#[test]
fn test_module_and_leaf() {
    let name = LogicalName::new("Stub.Database");
    assert_eq!(name.module().as_str(), "Stub");
    assert_eq!(name.leaf(), "Database");
    assert_eq!(LogicalName::new("Stub").module().as_str(), "Stub");
}

#[test]
fn test_serde_uses_canonical_string() {
    let name: LogicalName = serde_json::from_str("\"Stub::Database\"").unwrap();
    assert_eq!(name.as_str(), "Stub.Database");
    assert_eq!(serde_json::to_string(&name).unwrap(), "\"Stub.Database\"");
}
