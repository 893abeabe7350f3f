//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tao units` | Linked code units |
//! | `tao inspect <name>` | Override target, hierarchy and constructibility of a name |
//! | `tao service <name> [args..]` | Resolve a service, printing its derived value |
//! | `tao decode <text> [--invoke]` | Decode a textual call, optionally running it |

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tao_application::call::{BoundTarget, Call};
use tao_application::container::Resolved;
use tao_application::registry::list_code_units;
use tao_domain::error::{Error, Result};
use tao_domain::name::LogicalName;
use tao_domain::value::{Value, parse_scalar};
use tao_infrastructure::bootstrap::{Runtime, init_runtime};
use tao_infrastructure::config::{ConfigLoader, RuntimeConfig};
use tracing::debug;

/// Command line interface for the TAO runtime core
#[derive(Parser, Debug)]
#[command(name = "tao")]
#[command(about = "TAO runtime core - inspect code units, services and calls")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load the runtime configuration, applying command line overrides
    pub fn load_config(&self) -> Result<RuntimeConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load()?;
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List linked code units
    Units,

    /// Show how a logical name resolves
    Inspect {
        /// Logical name, `.` or `::` separated
        name: String,
    },

    /// Resolve a service and print it
    Service {
        /// Service name
        name: String,

        /// Arguments for the service's primary accessor
        args: Vec<String>,
    },

    /// Decode a textual call
    Decode {
        /// Encoded call, `Core.Call|target|method|a+b|`
        text: String,

        /// Run the call and print its result
        #[arg(long)]
        invoke: bool,

        /// Extra arguments appended when invoking
        args: Vec<String>,
    },
}

/// Build the runtime for `config` and run `command`, returning the text
/// to print
pub fn execute(command: &Command, config: RuntimeConfig) -> Result<String> {
    let mut runtime = init_runtime(config)?;
    debug!(?command, "Executing command");
    match command {
        Command::Units => Ok(units(&runtime)),
        Command::Inspect { name } => inspect(&mut runtime, name),
        Command::Service { name, args } => service(&mut runtime, name, &scalars(args)),
        Command::Decode { text, invoke, args } => {
            decode(&mut runtime, text, invoke.then(|| scalars(args)))
        }
    }
}

fn scalars(args: &[String]) -> Vec<Value> {
    args.iter().map(|arg| parse_scalar(arg)).collect()
}

fn units(runtime: &Runtime) -> String {
    let loader = runtime.container().factory().loader();
    let mut out = String::new();
    for (path, description) in list_code_units() {
        let marker = if loader.is_loaded(path) { "*" } else { " " };
        let _ = writeln!(out, "{marker} {path:<32} {description}");
    }
    out
}

fn inspect(runtime: &mut Runtime, name: &str) -> Result<String> {
    let name = LogicalName::new(name);
    if name.is_empty() {
        return Err(Error::invalid_argument_value("name", ""));
    }
    let factory = runtime.factory_mut();
    let resolved = factory.resolve(&name)?;
    let hierarchy = factory.hierarchy_of(&resolved)?;
    let implementation = factory
        .catalog()
        .get(&resolved)
        .ok_or_else(|| Error::resolution(format!("Implementation '{resolved}' is not loaded")))?;

    let mut out = String::new();
    let _ = writeln!(out, "name:          {name}");
    let _ = writeln!(out, "resolves to:   {resolved}");
    let _ = writeln!(
        out,
        "kind:          {}",
        if implementation.is_interface() { "interface" } else { "class" }
    );
    let _ = writeln!(
        out,
        "hierarchy:     {}",
        hierarchy
            .iter()
            .map(LogicalName::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    let _ = writeln!(
        out,
        "interfaces:    {}",
        implementation
            .interfaces()
            .iter()
            .map(LogicalName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(
        out,
        "constructible: {}",
        !implementation.is_interface() && implementation.constructor().is_some()
    );
    let _ = writeln!(out, "statics:       {}", implementation.statics().is_some());
    Ok(out)
}

fn service(runtime: &mut Runtime, name: &str, args: &[Value]) -> Result<String> {
    let container = runtime.container_mut();
    match container.call_dynamic(name, args)? {
        Resolved::Value(value) => Ok(serde_json::to_string_pretty(&value)?),
        Resolved::Instance(instance) => Ok(format!(
            "{name}: {} ({:?})",
            instance.type_name(),
            container.state(name)
        )),
    }
}

fn decode(runtime: &mut Runtime, text: &str, invoke: Option<Vec<Value>>) -> Result<String> {
    let mut call = Call::from_text(runtime.factory_mut(), text)?
        .ok_or_else(|| Error::invalid_argument_value("text", text))?;

    let target = match call.target() {
        BoundTarget::Static { implementation, .. } => implementation.to_string(),
        BoundTarget::Instance(instance) => instance.type_name().to_string(),
    };
    let mut out = String::new();
    let _ = writeln!(out, "target: {target}");
    let _ = writeln!(out, "method: {}", call.method());
    let _ = writeln!(out, "args:   {}", serde_json::to_string(call.args())?);

    if let Some(extra) = invoke {
        let result = call.invoke(&extra)?;
        let _ = writeln!(out, "result: {}", serde_json::to_string(&result)?);
    }
    Ok(out)
}
