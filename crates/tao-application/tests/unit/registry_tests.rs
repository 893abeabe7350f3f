//! Tests for the code unit registry

use tao_application::registry::{find_code_unit, list_code_units};

#[test]
fn test_linked_units_are_listed() {
    let units = list_code_units();
    let paths: Vec<_> = units.iter().map(|(path, _)| *path).collect();
    assert!(paths.contains(&"Fixture"), "Available: {paths:?}");
    assert!(paths.contains(&"Fixture/Shape/Circle"));
}

#[test]
fn test_find_code_unit() {
    let unit = find_code_unit("Fixture/Shape/Circle").unwrap();
    assert_eq!(unit.requires, &["Fixture.Shape"]);
    assert!(find_code_unit("Fixture/Shape").is_none());
}
