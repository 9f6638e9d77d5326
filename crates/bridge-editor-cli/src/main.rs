//! Command-line front end for editing Playgama Bridge configuration files.

mod input;
mod render;
mod shell;

use anyhow::Context;
use bridge_editor_core::{CatalogScope, EditorSession, platform_options};
use bridge_editor_schema::{DEFAULT_SCHEMA_LOCATION, Schema, SchemaSource};
use clap::{Parser, Subcommand};
use input::{parse_assignment, typed_value};
use log::{debug, info};
use render::{field_sections, fields_json, fields_text, options_text};
use std::path::PathBuf;

/// Command-line options for the config editor.
#[derive(Parser)]
#[command(name = "bridge-editor", version, about)]
struct Cli {
    /// Schema file path or http(s) URL
    #[arg(long, global = true, default_value = DEFAULT_SCHEMA_LOCATION)]
    schema: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the default document built from the schema
    Defaults,
    /// Produce the filtered config file
    Export {
        /// JSON config merged onto the defaults before edits are applied
        #[arg(long)]
        import: Option<PathBuf>,
        /// Field edit as PATH=VALUE; an empty VALUE clears the field
        #[arg(long = "set", value_name = "PATH=VALUE")]
        set: Vec<String>,
        /// Directory to write the config file into (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List platforms that can be enabled
    Platforms {
        /// Case-insensitive match on label or id
        #[arg(long)]
        filter: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Describe the editable form fields
    Fields {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive line-based editor
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let source = SchemaSource::parse(&cli.schema);
    info!("loading schema from {source}");
    let schema = Schema::load(&source)
        .await
        .with_context(|| format!("failed to load schema from {source}"))?;
    let mut session = EditorSession::new(schema).context("failed to build default config")?;

    match cli.command {
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(session.defaults())?);
        }
        Command::Export { import, set, out } => {
            if let Some(path) = import {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                session
                    .import_json(&text)
                    .with_context(|| format!("failed to import {}", path.display()))?;
            }
            for assignment in &set {
                let (path, raw) = parse_assignment(assignment)?;
                let value = typed_value(&session, &path, raw)?;
                debug!("applying --set {path}");
                session
                    .update_field(&path, value)
                    .with_context(|| format!("failed to apply `{assignment}`"))?;
            }
            let artifact = session.export()?;
            match out {
                Some(dir) => {
                    let written = artifact.write_to(&dir)?;
                    info!("wrote {}", written.display());
                    println!("{}", written.display());
                }
                None => println!("{}", artifact.contents),
            }
        }
        Command::Platforms { filter, json } => {
            let filter = filter.unwrap_or_default();
            let options = platform_options(&session, CatalogScope::Platforms, &filter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                print!("{}", options_text(&options));
            }
        }
        Command::Fields { json } => {
            let sections = field_sections(&session)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fields_json(&sections)?)?);
            } else {
                print!("{}", fields_text(&sections));
            }
        }
        Command::Shell => shell::run(&mut session).await?,
    }
    Ok(())
}
