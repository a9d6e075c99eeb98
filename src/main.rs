//! digi
//!
//! Command-line front end for digi-core: format and parse auris, inspect
//! the policy registry and print the policy CRDs.

use clap::{Parser, Subcommand};
use kube::CustomResourceExt;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use digi_core::{
    bootstrap, policy, Auri, AuriRef, Error, Kind, Result, YieldPolicy, DEFAULT_NAMESPACE,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// digi - addressing and registration tools for digi models
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format an auri from its parts
    Auri {
        /// Schema group
        #[arg(long, env = "GROUP", default_value = "digi.dev")]
        group: String,

        /// Schema version
        #[arg(long = "schema-version", env = "VERSION", default_value = "v1")]
        schema_version: String,

        /// Schema name, e.g. Lamp
        #[arg(long)]
        kind: String,

        /// Model name
        #[arg(long, env = "NAME")]
        name: String,

        /// Model namespace
        #[arg(long, env = "NAMESPACE", default_value = DEFAULT_NAMESPACE)]
        namespace: String,

        /// Attribute path, e.g. .spec.power
        #[arg(long, default_value = "")]
        path: String,
    },

    /// Parse an auri and print it as JSON.
    ///
    /// Resources served by the policy registry resolve to their kind;
    /// others are printed by group, version and resource.
    Parse {
        auri: String,
    },

    /// Print the resource plural of a schema name
    Plural {
        kind: String,
    },

    /// Bootstrap the policy registry and list kinds and controllers
    Kinds,

    /// Print the policy CRDs as YAML
    Crd,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;
    debug!("digi {}", digi_core::VERSION);

    match args.command {
        Command::Auri {
            group,
            schema_version,
            kind,
            name,
            namespace,
            path,
        } => {
            let kind = Kind::new(group, schema_version, kind);
            let auri = Auri::new(kind, namespace, name).with_path(path);
            println!("{}", auri);
        }
        Command::Parse { auri } => {
            let parsed: AuriRef = auri.parse()?;
            let manager = bootstrap(&policy::registry())?;
            match manager.scheme().resolve_auri(parsed.clone()) {
                Ok(auri) => println!("{}", serde_json::to_string_pretty(&auri)?),
                Err(Error::KindNotRegistered { kind }) => {
                    debug!("{} not served by the policy registry", kind);
                    println!("{}", serde_json::to_string_pretty(&parsed)?);
                }
                Err(e) => return Err(e),
            }
        }
        Command::Plural { kind } => {
            println!("{}", Kind::new("", "", kind).plural());
        }
        Command::Kinds => {
            let manager = bootstrap(&policy::registry())?;
            for kind in manager.scheme().kinds() {
                println!("kind       {}", kind);
            }
            for controller in manager.controllers() {
                println!("controller {} ({})", controller.name, controller.kind);
            }
            info!("Listed {} kinds", manager.scheme().len());
        }
        Command::Crd => {
            print!("{}", serde_yaml::to_string(&YieldPolicy::crd())?);
        }
    }

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(Error::Configuration(format!("unknown log level {:?}", other))),
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = parse_level(&args.log_level)?;

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries command output
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
