use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealcal_shared::MonthKey;

mod cli;

/// mealcal - Monthly meal calendar
#[derive(Parser)]
#[command(name = "mealcal")]
#[command(about = "Plan a month of meals from your own dishes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the dish list
    #[command(subcommand)]
    Dish(DishCommands),
    /// Plan meals on the calendar
    #[command(subcommand)]
    Meal(MealCommands),
    /// Write the grocery list of every planned meal
    Grocery {
        /// Print the list instead of writing grocery_list.txt
        #[arg(long)]
        print: bool,
    },
    /// Export state to a timestamped JSON file
    Export { kind: cli::transfer::ExportKind },
    /// Replace state with the content of a JSON file
    Import {
        kind: cli::transfer::ImportKind,
        file: PathBuf,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DishCommands {
    /// Add a dish, asking for missing fields
    Add(cli::dish::DishArgs),
    /// Edit the dish at a position of `dish list`
    Edit {
        position: usize,
        #[command(flatten)]
        fields: cli::dish::DishArgs,
    },
    /// Delete the dish at a position of `dish list`
    Delete { position: usize },
    /// List dishes with their positions
    List,
}

#[derive(Subcommand)]
enum MealCommands {
    /// Plan a dish on a day
    Assign {
        /// Month as YYYY-MM
        month: MonthKey,
        day: u8,
        dish: String,
    },
    /// Remove a planned dish from a day
    Unassign {
        /// Month as YYYY-MM
        month: MonthKey,
        day: u8,
        dish: String,
    },
    /// Show the planned meals of a month, the current one by default
    Show {
        /// Month as YYYY-MM
        month: Option<MonthKey>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealcal::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealcal::observability::init_observability(
        "mealcal",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    if let Commands::Migrate = cli.command {
        mealcal::open_storage(&config).await?;
        tracing::info!("Migrations applied");
        return Ok(());
    }

    let mut session = cli::Session::open(config).await?;

    let result = match cli.command {
        Commands::Migrate => Ok(()),
        Commands::Dish(DishCommands::Add(fields)) => cli::dish::add(&mut session, fields),
        Commands::Dish(DishCommands::Edit { position, fields }) => {
            cli::dish::edit(&mut session, position, fields)
        }
        Commands::Dish(DishCommands::Delete { position }) => {
            cli::dish::delete(&mut session, position)
        }
        Commands::Dish(DishCommands::List) => cli::dish::list(&session),
        Commands::Meal(MealCommands::Assign { month, day, dish }) => {
            cli::meal::assign(&mut session, month, day, &dish)
        }
        Commands::Meal(MealCommands::Unassign { month, day, dish }) => {
            cli::meal::unassign(&mut session, month, day, &dish)
        }
        Commands::Meal(MealCommands::Show { month }) => {
            cli::meal::show(&session, month.unwrap_or_else(MonthKey::current))
        }
        Commands::Grocery { print } => cli::transfer::grocery(&session, print),
        Commands::Export { kind } => cli::transfer::export(&session, kind),
        Commands::Import { kind, file, yes } => {
            cli::transfer::import(&mut session, kind, &file, yes)
        }
    };

    // Pending saves are flushed even when the command failed
    session.close().await?;

    result
}
