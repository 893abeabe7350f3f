//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the TAO runtime core
#[derive(Error, Debug)]
pub enum Error {
    /// A logical name cannot be mapped to a loadable, constructible implementation
    #[error("Resolution error: {message}")]
    Resolution {
        /// Description of the resolution failure
        message: String,
    },

    /// Redeclaration attempted on a service marked immutable
    #[error("Immutable service: {name}")]
    ImmutableService {
        /// Name of the immutable service
        name: String,
    },

    /// Lookup of a service with no declaration and no configuration entry
    #[error("Undefined service: {name}")]
    UndefinedService {
        /// Name of the requested service
        name: String,
    },

    /// A value of the wrong shape was passed to a helper
    #[error("Invalid argument type for '{name}': ({found})")]
    InvalidArgumentType {
        /// Name of the offending argument
        name: String,
        /// Type that was actually received
        found: String,
    },

    /// A value of the right shape but an unacceptable content
    #[error("Invalid argument value for '{name}': ({value})")]
    InvalidArgumentValue {
        /// Name of the offending argument
        name: String,
        /// Textual form of the received value
        value: String,
    },

    /// Misuse of a controlled property, index or method access contract
    #[error(transparent)]
    ObjectAccess(#[from] ObjectAccessError),

    /// Operation declared but not implemented by a component
    #[error("Not implemented: {operation}")]
    NotImplemented {
        /// The missing operation
        operation: String,
    },

    /// Required key absent from a keyed collection
    #[error("Missing key '{key}' in '{collection}'")]
    MissingKey {
        /// Name of the collection
        collection: String,
        /// The missing key
        key: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Controlled-access violations
///
/// Kept as a separate family so callers can catch every access violation
/// at once (see [`Error::is_object_access`]) or match a single kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectAccessError {
    /// Read of a property the object does not expose
    #[error("Missing property: {0}")]
    MissingProperty(String),

    /// Read of an index the object does not expose
    #[error("Missing indexed property for index {0}")]
    MissingIndexedProperty(String),

    /// Call of a method the object does not expose
    #[error("Missing method: {0}")]
    MissingMethod(String),

    /// Write of a read-only property
    #[error("The property is read-only: {0}")]
    ReadOnlyProperty(String),

    /// Write of a read-only index
    #[error("The property is read-only for index: {0}")]
    ReadOnlyIndexedProperty(String),

    /// Any write on a read-only object
    #[error("Read only object")]
    ReadOnlyObject,

    /// Removal of a property that cannot be removed
    #[error("Unable to destroy property: {0}")]
    UndestroyableProperty(String),

    /// Removal of an index that cannot be removed
    #[error("Unable to destroy indexed property: {0}")]
    UndestroyableIndexedProperty(String),
}

// Core error creation methods
impl Error {
    /// Create a resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create an immutable service error
    pub fn immutable_service<S: Into<String>>(name: S) -> Self {
        Self::ImmutableService { name: name.into() }
    }

    /// Create an undefined service error
    pub fn undefined_service<S: Into<String>>(name: S) -> Self {
        Self::UndefinedService { name: name.into() }
    }

    /// Create an invalid argument type error
    pub fn invalid_argument_type<S: Into<String>, T: Into<String>>(name: S, found: T) -> Self {
        Self::InvalidArgumentType {
            name: name.into(),
            found: found.into(),
        }
    }

    /// Create an invalid argument value error
    pub fn invalid_argument_value<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self::InvalidArgumentValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented<S: Into<String>>(operation: S) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create a missing key error
    pub fn missing_key<C: Into<String>, K: Into<String>>(collection: C, key: K) -> Self {
        Self::MissingKey {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Object access error creation methods
impl Error {
    /// Create a missing method error
    pub fn missing_method<S: Into<String>>(method: S) -> Self {
        Self::ObjectAccess(ObjectAccessError::MissingMethod(method.into()))
    }

    /// Create a missing property error
    pub fn missing_property<S: Into<String>>(property: S) -> Self {
        Self::ObjectAccess(ObjectAccessError::MissingProperty(property.into()))
    }

    /// Create a read-only property error
    pub fn read_only_property<S: Into<String>>(property: S) -> Self {
        Self::ObjectAccess(ObjectAccessError::ReadOnlyProperty(property.into()))
    }

    /// Whether this error belongs to the object access family
    pub fn is_object_access(&self) -> bool {
        matches!(self, Self::ObjectAccess(_))
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::io_with_source(source.to_string(), source)
    }
}
