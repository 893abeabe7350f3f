//! Base service
//!
//! A plain option holder. User services extend `Tao.Service` so that
//! hierarchy checks and overrides can target the common base.

use tao_application::catalog::Implementation;
use tao_application::registry::{CODE_UNITS, CodeUnitEntry};
use tao_domain::constants::BASE_SERVICE_CLASS;
use tao_domain::error::{Error, Result};
use tao_domain::ports::{Component, Service};
use tao_domain::value::{self, Options, Value};

/// Option-holding service with no behaviour of its own
///
/// # Example
///
/// ```
/// use tao_providers::BasicService;
/// use tao_domain::ports::Service;
/// use serde_json::json;
///
/// let mut service = BasicService::new();
/// service.enable_option("cache");
/// assert_eq!(service.option_or("cache", json!(false)), json!(true));
/// assert_eq!(service.option_or("ttl", json!(60)), json!(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicService {
    options: Options,
}

impl BasicService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Component for BasicService {
    fn type_name(&self) -> &str {
        BASE_SERVICE_CLASS
    }

    fn as_service(&self) -> Option<&dyn Service> {
        Some(self)
    }

    fn as_service_mut(&mut self) -> Option<&mut dyn Service> {
        Some(self)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match (method, args) {
            ("option", [Value::String(key)]) => Ok(self.option_or(key, Value::Null)),
            ("option", [Value::String(key), default, ..]) => {
                Ok(self.option_or(key, default.clone()))
            }
            ("option", [other, ..]) => Err(Error::invalid_argument_type(
                "key",
                value::type_name(other),
            )),
            ("options", _) => Ok(Value::Object(
                self.options
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            _ => Err(Error::missing_method(format!("Tao::Service::{method}"))),
        }
    }
}

impl Service for BasicService {
    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

#[linkme::distributed_slice(CODE_UNITS)]
static BASIC_SERVICE_UNIT: CodeUnitEntry = CodeUnitEntry {
    path: "Tao/Service",
    description: "Base option-holding service",
    requires: &[],
    register: |catalog| {
        catalog.register(
            Implementation::class(BASE_SERVICE_CLASS)
                .with_default(|| Ok(Box::new(BasicService::new()))),
        );
    },
};
