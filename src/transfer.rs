use std::path::{Path, PathBuf};

use mealcal_shared::Error;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Planner, document};

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[month][day][year]_[hour][minute][second]");

pub const GROCERY_LIST_FILE: &str = "grocery_list.txt";

/// Yes/no question asked before an import overwrites state.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Whole-state import and export through JSON files.
#[derive(Clone, Debug)]
pub struct Transfer {
    dir: PathBuf,
}

impl Transfer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn export_meals(&self, planner: &Planner) -> mealcal_shared::Result<PathBuf> {
        let text = document::meals_document(planner.store(), true)?;

        self.write(&file_name("meals", now())?, &text)
    }

    pub fn export_dishes(&self, planner: &Planner) -> mealcal_shared::Result<PathBuf> {
        let text = document::dishes_document(planner.catalog(), true)?;

        self.write(&file_name("dishes", now())?, &text)
    }

    /// Exports the distinct ingredients of every planned dish.
    pub fn export_ingredients(&self, planner: &Planner) -> mealcal_shared::Result<PathBuf> {
        let ingredients = mealcal_shopping::unique_ingredients(planner.store(), planner.catalog());
        if ingredients.is_empty() {
            mealcal_shared::bail!(Error::NoData);
        }

        let text = document::ingredients_document(&ingredients, true)?;

        self.write(&file_name("ingredients", now())?, &text)
    }

    pub fn export_grocery_list(&self, planner: &Planner) -> mealcal_shared::Result<PathBuf> {
        let list = planner.grocery_list();

        self.write(GROCERY_LIST_FILE, &list.to_string())
    }

    /// Replaces every planned meal with the content of `text` once the user
    /// agrees. Returns `false` when the user declines.
    pub fn import_meals(
        &self,
        planner: &mut Planner,
        text: &str,
        prompt: &impl Prompt,
    ) -> mealcal_shared::Result<bool> {
        if !prompt.confirm("Importing meals will replace every planned meal. Continue?") {
            tracing::info!("meals import declined");
            return Ok(false);
        }

        let store = document::parse_meals(text)?;
        planner.replace_meals(store);

        Ok(true)
    }

    /// Replaces the dish catalog with the content of `text` once the user
    /// agrees. Returns `false` when the user declines.
    pub fn import_dishes(
        &self,
        planner: &mut Planner,
        text: &str,
        prompt: &impl Prompt,
    ) -> mealcal_shared::Result<bool> {
        if !prompt.confirm("Importing dishes will replace the whole dish list. Continue?") {
            tracing::info!("dishes import declined");
            return Ok(false);
        }

        let catalog = document::parse_dishes(text)?;
        planner.replace_dishes(catalog);

        Ok(true)
    }

    fn write(&self, file_name: &str, text: &str) -> mealcal_shared::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, text)?;

        tracing::info!(path = %path.display(), "file exported");

        Ok(path)
    }
}

/// `MMDDYYYY_HHMMSS` stamp embedded in export file names.
pub fn timestamp(at: OffsetDateTime) -> mealcal_shared::Result<String> {
    Ok(at.format(TIMESTAMP)?)
}

pub fn file_name(prefix: &str, at: OffsetDateTime) -> mealcal_shared::Result<String> {
    Ok(format!("{prefix}_{}.json", timestamp(at)?))
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_file_name() {
        let at = datetime!(2025-06-03 07:04:09 UTC);

        assert_eq!(timestamp(at).unwrap(), "06032025_070409");
        assert_eq!(file_name("meals", at).unwrap(), "meals_06032025_070409.json");
        assert_eq!(
            file_name("ingredients", datetime!(2024-12-31 23:59:00 UTC)).unwrap(),
            "ingredients_12312024_235900.json"
        );
    }
}
