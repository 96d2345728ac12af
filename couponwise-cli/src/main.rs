use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use couponwise_core::{
    complete_entry, mark_missed_before, parse_budget, validate_budget, Planner, RewardRules,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "couponwise", version, about = "Plan weekly shopping around store coupons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a 10-week shopping schedule
    Plan {
        /// Weekly budget (20-500). Falls back to the saved budget, then config.
        #[arg(long)]
        budget: Option<String>,

        /// First shopping day, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print the schedule as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Do not overwrite the saved schedule
        #[arg(long)]
        no_save: bool,
    },

    /// Show the saved schedule
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Saved weekly budget
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Record a trip as done with the amount actually spent
    Complete {
        entry_id: String,

        #[arg(long)]
        actual: f64,
    },

    /// Mark planned trips before a date as missed
    Sweep {
        /// Default: today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Save a weekly budget
    Set { amount: String },
    /// Print the saved weekly budget
    Show,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.couponwise/config.toml with defaults
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            budget,
            start,
            json,
            no_save,
        } => plan(budget, start, json, no_save)?,

        Command::Show { json } => {
            let schedule = state::read_schedule()?
                .context("No saved schedule. Run: couponwise plan")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                print!("{}", render::render_schedule(&schedule));
            }
        }

        Command::Budget { command } => match command {
            BudgetCommand::Set { amount } => {
                let weekly = parse_budget(&amount)?;
                state::write_budget(&state::SavedBudget {
                    weekly,
                    updated_at_utc: Some(Utc::now().to_rfc3339()),
                })?;
                println!("Weekly budget set to ${:.2}", weekly);
            }
            BudgetCommand::Show => match state::read_budget()? {
                Some(b) => println!("Weekly budget: ${:.2}", b.weekly),
                None => println!("No budget saved. Run: couponwise budget set <amount>"),
            },
        },

        Command::Complete { entry_id, actual } => {
            let mut schedule = state::read_schedule()?
                .context("No saved schedule. Run: couponwise plan")?;
            complete_entry(&mut schedule, &entry_id, actual)?;
            state::write_schedule(&schedule)?;
            println!("Marked {} done (${:.2})", entry_id, actual);
        }

        Command::Sweep { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let mut schedule = state::read_schedule()?
                .context("No saved schedule. Run: couponwise plan")?;
            let changed = mark_missed_before(&mut schedule, today);
            state::write_schedule(&schedule)?;
            println!("{} trip(s) before {} marked missed", changed, today);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

fn plan(budget: Option<String>, start: Option<NaiveDate>, json: bool, no_save: bool) -> Result<()> {
    let cfg = config::load_config()?;

    let weekly = match budget {
        Some(raw) => parse_budget(&raw)?,
        None => match state::read_budget()? {
            Some(saved) => validate_budget(saved.weekly)
                .with_context(|| format!("saved budget {} is invalid", saved.weekly))?,
            None => match cfg.planner.default_budget {
                Some(b) => validate_budget(b).context("config default_budget is invalid")?,
                None => bail!("No budget. Pass --budget <amount> or run: couponwise budget set <amount>"),
            },
        },
    };

    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let planner = Planner::new(RewardRules::new(cfg.rewards));
    let schedule = planner.plan(weekly, start);

    if !no_save {
        state::write_schedule(&schedule)?;
        info!(path = %state::schedule_path()?.display(), "schedule saved");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
    } else {
        print!("{}", render::render_schedule(&schedule));
    }

    Ok(())
}
