use std::path::Path;

use clap::ValueEnum;
use mealcal::Transfer;

use super::{Session, Terminal};

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportKind {
    Meals,
    Dishes,
    Ingredients,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImportKind {
    Meals,
    Dishes,
}

pub fn export(session: &Session, kind: ExportKind) -> anyhow::Result<()> {
    let transfer = Transfer::new(&session.config.export.dir);
    let path = match kind {
        ExportKind::Meals => transfer.export_meals(&session.planner)?,
        ExportKind::Dishes => transfer.export_dishes(&session.planner)?,
        ExportKind::Ingredients => transfer.export_ingredients(&session.planner)?,
    };

    println!("Exported to {}", path.display());

    Ok(())
}

pub fn import(
    session: &mut Session,
    kind: ImportKind,
    file: &Path,
    yes: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)?;
    let terminal = Terminal { assume_yes: yes };
    let transfer = Transfer::new(&session.config.export.dir);

    let imported = match kind {
        ImportKind::Meals => transfer.import_meals(&mut session.planner, &text, &terminal)?,
        ImportKind::Dishes => transfer.import_dishes(&mut session.planner, &text, &terminal)?,
    };

    if imported {
        println!("Imported {}", file.display());
    } else {
        println!("Import cancelled");
    }

    Ok(())
}

pub fn grocery(session: &Session, print: bool) -> anyhow::Result<()> {
    if print {
        println!("{}", session.planner.grocery_list());
        return Ok(());
    }

    let path = Transfer::new(&session.config.export.dir).export_grocery_list(&session.planner)?;
    println!("Grocery list written to {}", path.display());

    Ok(())
}
