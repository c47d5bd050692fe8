mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    cmd_clear, cmd_delete, cmd_export, cmd_food_add, cmd_goal_set, cmd_goal_show, cmd_import,
    cmd_log, cmd_needs, cmd_prefs_set, cmd_prefs_show, cmd_search, cmd_summary,
};
use crate::config::Config;
use nosh_core::Session;
use nosh_core::store::SqliteStore;

#[derive(Parser)]
#[command(
    name = "nosh",
    version,
    about = "A simple calorie & macro tracker CLI",
    long_about = "\n\n  ███╗   ██╗ ██████╗ ███████╗██╗  ██╗
  ████╗  ██║██╔═══██╗██╔════╝██║  ██║
  ██╔██╗ ██║██║   ██║███████╗███████║
  ██║╚██╗██║██║   ██║╚════██║██╔══██║
  ██║ ╚████║╚██████╔╝███████║██║  ██║
  ╚═╝  ╚═══╝ ╚═════╝ ╚══════╝╚═╝  ╚═╝
       track what you're eating.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the food catalog (no query lists everything)
    Search {
        /// Search query (case-insensitive substring)
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a portion of a food
    Log {
        /// Food name to search for
        food: String,
        /// Portion size in grams (e.g. "200" or "200g")
        #[arg(default_value = "100")]
        grams: String,
        /// Meal: any, breakfast, lunch, dinner, snack
        #[arg(short, long, default_value = "any")]
        meal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a log entry by id (or unique id prefix)
    Delete {
        /// Entry id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the whole log
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the log with totals and goal progress
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute daily calorie & macro needs (Mifflin-St Jeor)
    Needs {
        /// Sex: male or female
        #[arg(long, default_value = "male")]
        sex: String,
        /// Age in years
        #[arg(long, default_value = "25")]
        age: f64,
        /// Height in cm
        #[arg(long, default_value = "175")]
        height: f64,
        /// Weight in kg
        #[arg(long, default_value = "70")]
        weight: f64,
        /// Activity: sedentary, light, moderate, very-active, extra-active
        #[arg(long, default_value = "moderate")]
        activity: String,
        /// Protein allowance in g per kg of body weight
        #[arg(long, default_value = "1.6")]
        protein_per_kg: f64,
        /// Share of energy from carbs, in percent
        #[arg(long, default_value = "50")]
        carb_pct: f64,
        /// Share of energy from fat, in percent
        #[arg(long, default_value = "25")]
        fat_pct: f64,
        /// Overwrite the daily goal with the computed needs
        #[arg(long)]
        commit: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the log as CSV
    Export {
        /// Output path (default: calorie-log-<date>.csv)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import log entries from a CSV export
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage custom foods
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Manage the daily goal
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Manage preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a custom food (values per 100g; omitted fields default to 0)
    Add {
        /// Food name
        name: String,
        /// Calories per 100g
        #[arg(long)]
        kcal: Option<String>,
        /// Protein per 100g
        #[arg(long)]
        protein: Option<String>,
        /// Carbs per 100g
        #[arg(long)]
        carbs: Option<String>,
        /// Fat per 100g
        #[arg(long)]
        fat: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Show the current daily goal
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit goal fields directly
    Set {
        /// Calorie target
        #[arg(long)]
        kcal: Option<String>,
        /// Protein target in grams
        #[arg(long)]
        protein: Option<String>,
        /// Carb target in grams
        #[arg(long)]
        carbs: Option<String>,
        /// Fat target in grams
        #[arg(long)]
        fat: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Show preferences
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set preferences
    Set {
        /// Display unit: g or serving
        #[arg(long)]
        unit: Option<String>,
        /// Theme: light or dark
        #[arg(long)]
        theme: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = SqliteStore::open(&config.db_path)?;
    let mut session = Session::open(Box::new(store));

    match cli.command {
        Commands::Search { query, json } => cmd_search(&session, query.as_deref(), json),
        Commands::Log {
            food,
            grams,
            meal,
            json,
        } => cmd_log(&mut session, &food, &grams, &meal, json),
        Commands::Delete { id, json } => cmd_delete(&mut session, &id, json),
        Commands::Clear { json } => cmd_clear(&mut session, json),
        Commands::Summary { json } => cmd_summary(&session, json),
        Commands::Needs {
            sex,
            age,
            height,
            weight,
            activity,
            protein_per_kg,
            carb_pct,
            fat_pct,
            commit,
            json,
        } => cmd_needs(
            &mut session,
            &sex,
            age,
            height,
            weight,
            &activity,
            protein_per_kg,
            carb_pct,
            fat_pct,
            commit,
            json,
        ),
        Commands::Export { output, json } => cmd_export(&session, output, json),
        Commands::Import { file, json } => cmd_import(&mut session, &file, json),
        Commands::Food { command } => match command {
            FoodCommands::Add {
                name,
                kcal,
                protein,
                carbs,
                fat,
                json,
            } => cmd_food_add(&mut session, &name, kcal, protein, carbs, fat, json),
        },
        Commands::Goal { command } => match command {
            GoalCommands::Show { json } => cmd_goal_show(&session, json),
            GoalCommands::Set {
                kcal,
                protein,
                carbs,
                fat,
                json,
            } => cmd_goal_set(&mut session, kcal, protein, carbs, fat, json),
        },
        Commands::Prefs { command } => match command {
            PrefsCommands::Show { json } => cmd_prefs_show(&session, json),
            PrefsCommands::Set { unit, theme, json } => {
                cmd_prefs_set(&mut session, unit.as_deref(), theme.as_deref(), json)
            }
        },
    }
}
