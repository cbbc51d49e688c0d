//! Command-line front end for fixture parameterization.
//!
//! ```text
//! fixture resolve 'GET /users/!{id}' --set id=42
//! fixture mutate body.json --kind json --row 'key1,DELETE,N/A' --resources fixtures/
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use clap::{Parser, Subcommand};
use fixture_params::config::{get_config, load_config_file};
use fixture_params::payload::{apply_rows, load_with, FsLoader, PayloadKind};
use fixture_params::placeholder::SystemProperties;
use fixture_params::{FixtureError, Registry, Resolver};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "fixture", version, about = "Resolve placeholders and mutate payload fixtures")]
struct Cli {
    /// JSON settings file with a "fixture-params" section
    #[arg(long, global = true, env = "FIXTURE_PARAMS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve every placeholder in TEXT and print the result
    Resolve {
        text: String,

        /// Registry entry visible to !{KEY} placeholders
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,

        /// Property visible to ${NAME} placeholders
        #[arg(long = "property", value_name = "NAME=VALUE", value_parser = parse_key_value)]
        properties: Vec<(String, String)>,
    },

    /// Load a resource, apply mutation rows in order and print the result
    Mutate {
        name: String,

        /// Payload kind: "string" or "json"
        #[arg(long, default_value = "string")]
        kind: String,

        /// Mutation as LOCATOR,OPERATION,ARGUMENT; the argument may contain commas
        #[arg(long = "row", value_name = "LOCATOR,OPERATION,ARGUMENT")]
        rows: Vec<String>,

        /// Resource directory, overriding the configured one
        #[arg(long)]
        resources: Option<PathBuf>,
    },
}

/// Splits `KEY=VALUE` on the first `=`; the value may itself contain `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, FixtureError> {
    if let Some(path) = &cli.config {
        load_config_file(path)?;
    }

    match cli.command {
        Command::Resolve {
            text,
            set,
            properties,
        } => {
            let registry = Registry::global();
            for (key, value) in set {
                registry.set(key, value);
            }

            let mut props = SystemProperties::with_overrides(get_config().properties);
            for (name, value) in properties {
                props.set(name, value);
            }

            let resolver = Resolver::new().with_properties(props);
            Ok(resolver.resolve(&text)?)
        }
        Command::Mutate {
            name,
            kind,
            rows,
            resources,
        } => {
            let kind: PayloadKind = kind.parse()?;
            let loader = match resources {
                Some(dir) => FsLoader::new(dir),
                None => FsLoader::from_config(),
            };

            let payload = load_with(&loader, &name, kind)?;
            let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.splitn(3, ',').collect()).collect();
            Ok(apply_rows(&payload, rows)?.render())
        }
    }
}
