//! Schema Access CLI
//!
//! Resolve schema pointers, list access keys, and evaluate them against data.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use schema_access::{evaluate, SchemaAccessConfig, SchemaHelper};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-access")]
#[command(about = "Address JSON Schema documents and conforming data")]
struct Cli {
    /// Config file (defaults to schema-access.toml lookup)
    #[arg(short, long)]
    config: Option<String>,

    /// Force compact JSON output
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a pointer (e.g. /indexes/items/type) inside a schema
    Pointer {
        /// Schema document (JSON)
        schema: PathBuf,
        /// Pointer, `/a/b` or `#/a/b`
        pointer: String,
    },

    /// List the access keys of a schema
    Keys {
        /// Schema document (JSON)
        schema: PathBuf,
    },

    /// Evaluate one access key against a data document
    Eval {
        /// Data document (JSON)
        data: PathBuf,
        /// Access key, e.g. pets.*.name
        key: String,
    },

    /// Evaluate every access key of a schema against a data document
    Extract {
        /// Schema document (JSON)
        schema: PathBuf,
        /// Data document (JSON)
        data: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SchemaAccessConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    let format = if cli.compact {
        schema_access::OutputFormat::Compact
    } else {
        config.output.format
    };

    let output = match cli.command {
        Commands::Pointer { schema, pointer } => {
            let helper = load_schema(&schema, &config)?;
            helper.resolve_pointer(&pointer)?.clone()
        }

        Commands::Keys { schema } => {
            let helper = load_schema(&schema, &config)?;
            Value::from(helper.access_keys()?.to_vec())
        }

        Commands::Eval { data, key } => {
            let data = read_json(&data)?;
            evaluate(&data, &key).to_value().unwrap_or(Value::Null)
        }

        Commands::Extract { schema, data } => {
            let helper = load_schema(&schema, &config)?;
            let data = read_json(&data)?;
            let mut extracted = Map::new();
            for (key, found) in helper.extract_all(&data)? {
                if let Some(value) = found.to_value() {
                    extracted.insert(key.to_string(), value);
                }
            }
            Value::Object(extracted)
        }
    };

    println!("{}", format.render(&output)?);
    Ok(())
}

fn load_schema(path: &Path, config: &SchemaAccessConfig) -> anyhow::Result<SchemaHelper> {
    SchemaHelper::open(path, config.engine.clone())
        .with_context(|| format!("failed to load schema {}", path.display()))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse JSON in {}", path.display()))
}
