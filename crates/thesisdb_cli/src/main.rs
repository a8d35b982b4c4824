//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `thesisdb_core` linkage and schema bootstrap from a shell.
//! - Push one user or paper JSON document through the write path.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thesisdb_core::db::migrations::current_version;
use thesisdb_core::{
    init_logging_from_config, DbWriter, NewPaper, NewUser, RecordWriter, WriterConfig,
};

#[derive(Parser, Debug)]
#[command(name = "thesisdb", version, about = "Paper repository write-path probe")]
struct Cli {
    /// Database file; an in-memory database is used when omitted.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON writer config file. `--db` overrides its database location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print core version and schema version.
    Status,
    /// Insert a user from a JSON document.
    AddUser { json: String },
    /// Insert a paper from a JSON document.
    AddPaper { json: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging_from_config(&config).map_err(anyhow::Error::msg)?;

    let mut writer = DbWriter::open(&config).context("failed to open database")?;
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            println!("thesisdb_core version={}", thesisdb_core::core_version());
            println!(
                "schema version={}",
                current_version(writer.connection()).context("failed to read schema version")?
            );
        }
        Commands::AddUser { json } => {
            let user: NewUser = serde_json::from_str(&json).context("invalid user JSON")?;
            let id = writer.add_user(&user)?;
            println!("user id={id}");
        }
        Commands::AddPaper { json } => {
            let paper: NewPaper = serde_json::from_str(&json).context("invalid paper JSON")?;
            let id = writer.add_paper(&paper)?;
            println!("paper id={id}");
        }
    }

    writer.close().context("failed to close database")?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<WriterConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config `{}`", path.display()))?;
            WriterConfig::from_json_str(&raw)?
        }
        None => WriterConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database = thesisdb_core::DatabaseLocation::File(db.clone());
    }
    Ok(config)
}
