//! Unit tests for domain error types

use tao_domain::{Error, ObjectAccessError};

#[test]
fn test_undefined_service_error() {
    let error = Error::undefined_service("db");
    match error {
        Error::UndefinedService { ref name } => assert_eq!(name, "db"),
        _ => panic!("Expected UndefinedService error"),
    }
    assert!(error.to_string().contains("db"));
}

#[test]
fn test_immutable_service_error() {
    let error = Error::immutable_service("config");
    match error {
        Error::ImmutableService { name } => assert_eq!(name, "config"),
        _ => panic!("Expected ImmutableService error"),
    }
}

#[test]
fn test_invalid_argument_type_names_found_type() {
    let error = Error::invalid_argument_type("name", "number");
    assert_eq!(
        error.to_string(),
        "Invalid argument type for 'name': (number)"
    );
}

#[test]
fn test_object_access_family() {
    let error = Error::missing_method("Shape::area");
    assert!(error.is_object_access());
    assert!(matches!(
        error,
        Error::ObjectAccess(ObjectAccessError::MissingMethod(ref method)) if method == "Shape::area"
    ));
    assert_eq!(error.to_string(), "Missing method: Shape::area");

    assert!(!Error::resolution("nope").is_object_access());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
}
