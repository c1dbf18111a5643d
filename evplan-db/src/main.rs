//! evplan-db - record store setup and maintenance
//!
//! Usage:
//!   evplan-db setup                      # interactive: recreate? seed?
//!   evplan-db init [--recreate] [--seed]
//!   evplan-db seed
//!   evplan-db dump
//!   evplan-db add-moderator --name "Jai Kumar" --city Hyderabad ...
//!   evplan-db add-participant --name "Alice Smith" --email alice@example.com ...

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::Confirm;
use evplan_common::config::CliOverrides;
use evplan_common::db::{NewModerator, NewParticipant};
use evplan_common::logging::init_tracing;
use evplan_common::{Error, Settings};
use evplan_db::commands;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "evplan-db")]
#[command(about = "Set up and maintain the event planning record store")]
#[command(version)]
struct Cli {
    /// Path to the SQLite record store (overrides DB_PATH and the config file)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive setup: create the tables, optionally seed sample data
    Setup,
    /// Create the tables if missing
    Init {
        /// Delete the existing database file first
        #[arg(long)]
        recreate: bool,
        /// Insert the sample moderators and participants afterwards
        #[arg(long)]
        seed: bool,
    },
    /// Insert the sample moderators and participants
    Seed,
    /// Print both tables
    Dump,
    /// Add one moderator
    AddModerator(ModeratorArgs),
    /// Add one participant (email must be unique)
    AddParticipant(ParticipantArgs),
}

#[derive(Args, Debug)]
struct ModeratorArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Comma-separated tags, e.g. "Technical, AI/ML"
    #[arg(long)]
    expertise: Option<String>,
}

#[derive(Args, Debug)]
struct ParticipantArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = Settings::resolve(&CliOverrides {
        config_file: cli.config.clone(),
        db_path: cli.db_path.clone(),
        ..Default::default()
    })
    .context("Failed to resolve settings")?;

    init_tracing(&settings.log_level);
    let db_path = settings.db_path.as_path();

    match cli.command {
        Command::Setup => setup(db_path).await?,
        Command::Init { recreate, seed } => {
            let report = commands::init(db_path, recreate, seed).await?;
            if report.newly_created {
                println!("✓ Created database at: {}", db_path.display());
            } else {
                println!("Database already exists at: {} (tables verified)", db_path.display());
            }
            if let Some(summary) = report.seeded {
                println!(
                    "✓ Added {} sample moderators and {} sample participants",
                    summary.moderators, summary.participants
                );
            }
        }
        Command::Seed => {
            let summary = commands::seed(db_path)
                .await
                .map_err(seed_error)?;
            println!(
                "✓ Added {} sample moderators and {} sample participants",
                summary.moderators, summary.participants
            );
        }
        Command::Dump => {
            print!("{}", commands::dump(db_path).await?);
        }
        Command::AddModerator(args) => {
            let moderator = NewModerator {
                name: args.name,
                city: args.city,
                description: args.description,
                email: args.email,
                phone: args.phone,
                expertise: args.expertise,
            };
            commands::add_moderator(db_path, &moderator).await?;
            println!("✓ Added moderator: {}", moderator.name);
        }
        Command::AddParticipant(args) => {
            let participant = NewParticipant {
                name: args.name,
                email: args.email,
                company: args.company,
                role: args.role,
                phone: args.phone,
            };
            match commands::add_participant(db_path, &participant).await {
                Ok(_) => println!("✓ Added participant: {}", participant.name),
                Err(Error::DuplicateKey(_)) => {
                    anyhow::bail!("Participant with email {} already exists", participant.email)
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

async fn setup(db_path: &Path) -> Result<()> {
    let rule = "=".repeat(60);
    println!("{}\nEVENT PLANNING DATABASE SETUP\n{}", rule, rule);

    let recreate = if db_path.exists() {
        println!("Database already exists at: {}", db_path.display());
        Confirm::new()
            .with_prompt("Do you want to recreate it?")
            .default(false)
            .interact()
            .context("Failed to read answer")?
    } else {
        false
    };

    let report = commands::init(db_path, recreate, false).await?;
    if report.newly_created {
        println!("✓ Created 'moderators' and 'participants' tables and indexes");
    } else {
        println!("Keeping existing database.");
    }

    let seed = Confirm::new()
        .with_prompt("Do you want to add sample data?")
        .default(false)
        .interact()
        .context("Failed to read answer")?;

    if seed {
        let summary = commands::seed(db_path).await.map_err(seed_error)?;
        println!("✓ Added {} sample moderators", summary.moderators);
        println!("✓ Added {} sample participants", summary.participants);
        print!("{}", commands::dump(db_path).await?);
    }

    let location = std::fs::canonicalize(db_path).unwrap_or_else(|_| db_path.to_path_buf());
    println!("\n{}", rule);
    println!("Setup complete. Database location: {}", location.display());
    println!("{}", rule);
    Ok(())
}

fn seed_error(err: Error) -> anyhow::Error {
    if err.is_duplicate_key() {
        anyhow::anyhow!("Sample data is already present ({}); nothing was inserted", err)
    } else {
        err.into()
    }
}
