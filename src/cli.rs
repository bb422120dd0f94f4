use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use mealcal::{Persistence, Planner, Prompt, config::Config};

pub mod dish;
pub mod meal;
pub mod transfer;

/// Planner loaded from storage with persistence running for the duration of
/// one command.
pub struct Session {
    pub config: Config,
    pub planner: Planner,
    persistence: Persistence,
}

impl Session {
    pub async fn open(config: Config) -> anyhow::Result<Self> {
        let storage = Arc::new(mealcal::open_storage(&config).await?);
        let mut planner = Planner::load(storage.as_ref()).await;
        let persistence =
            Persistence::start(storage, planner.subscribe(), config.persistence.debounce());

        Ok(Self {
            config,
            planner,
            persistence,
        })
    }

    pub async fn close(self) -> anyhow::Result<()> {
        self.persistence.stop().await
    }
}

/// Terminal side of the confirmation and text prompts.
pub struct Terminal {
    pub assume_yes: bool,
}

impl Terminal {
    pub fn ask(&self, label: &str) -> anyhow::Result<String> {
        print!("{label}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        Ok(line.trim().to_owned())
    }
}

impl Prompt for Terminal {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match self.ask(&format!("{message} [y/N]")) {
            Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                tracing::warn!(%err, "failed to read confirmation");
                false
            }
        }
    }
}
