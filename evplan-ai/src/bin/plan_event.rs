//! plan-event - standalone planning run without the function server
//!
//! Generates themes for an idea, reads moderators and participants from the
//! record store, refines a plan for the first theme and prints it with the
//! participant roster.
//!
//! Usage:
//!   plan-event
//!   plan-event --idea "robotics meetup" --start-date 01-03-2025 --end-date 01-03-2025

use anyhow::{Context, Result};
use clap::Parser;
use evplan_ai::workflow::{format_plan_report, EventDetails, EventPlanningWorkflow};
use evplan_common::config::CliOverrides;
use evplan_common::logging::init_tracing;
use evplan_common::Settings;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plan-event")]
#[command(about = "Run one end-to-end event planning pass")]
#[command(version)]
struct Args {
    /// Event idea to generate themes for
    #[arg(long, default_value = "pickle ball event")]
    idea: String,

    #[arg(long, default_value = "24-01-2025")]
    start_date: String,

    #[arg(long, default_value = "25-01-2025")]
    end_date: String,

    #[arg(long, default_value = "11:00 AM")]
    start_time: String,

    #[arg(long, default_value = "5:00 PM")]
    end_time: String,

    #[arg(long, default_value = "HYDERABAD")]
    location: String,

    #[arg(long, default_value = "Technical Conference")]
    event_type: String,

    /// Moderators included in the plan
    #[arg(long, default_value_t = 2)]
    max_moderators: usize,

    /// Participants listed in the roster (0 = all)
    #[arg(long, default_value_t = 10)]
    participant_limit: u32,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the SQLite record store
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let settings = Settings::resolve(&CliOverrides {
        config_file: args.config.clone(),
        db_path: args.db_path.clone(),
        ..Default::default()
    })
    .context("Failed to resolve settings")?;

    init_tracing(&settings.log_level);

    let workflow = EventPlanningWorkflow::new(&settings)?;
    let details = EventDetails {
        start_date: args.start_date,
        end_date: args.end_date,
        start_time: args.start_time,
        end_time: args.end_time,
        location: args.location,
        event_type: args.event_type,
    };

    println!("Generating themes...");
    let run = workflow.run(
        &args.idea,
        &details,
        args.max_moderators,
        Some(args.participant_limit),
    );
    println!("Generated {} themes\n", run.themes.len());
    println!("Found {} moderators in database", run.moderators.len());
    println!("Found {} participants in database\n", run.participants.len());

    match run.plan {
        Some(plan) => {
            print!("{}", format_plan_report(&plan, &run.participants));
            println!("\n✓ Event planning completed");
        }
        None => {
            println!("\n✗ No themes or moderators found. Please check your database.");
            println!("  Initialize it with: evplan-db init --seed");
        }
    }

    Ok(())
}
