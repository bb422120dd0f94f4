use clap::Args;
use mealcal_dish::DishInput;
use mealcal_shared::{
    Error,
    dish::{Category, Dish},
};
use strum::VariantArray;

use super::{Session, Terminal};

#[derive(Args)]
pub struct DishArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Comma separated, e.g. "tofu, soy sauce"
    #[arg(long)]
    pub ingredients: Option<String>,
    /// Protein, Vegetables or Mixed
    #[arg(long)]
    pub category: Option<String>,
}

pub fn add(session: &mut Session, fields: DishArgs) -> anyhow::Result<()> {
    let terminal = Terminal { assume_yes: false };
    let ask = |value: Option<String>, label: &str| match value {
        Some(value) => Ok(value),
        None => terminal.ask(label),
    };

    let categories = Category::VARIANTS
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    let input = DishInput::new(
        ask(fields.name, "Name of the dish")?,
        ask(fields.ingredients, "Ingredients (comma separated)")?,
        ask(fields.category, &format!("Category ({categories})"))?,
    );

    session.planner.add_dish(input)?;
    println!("Dish added");

    Ok(())
}

pub fn edit(session: &mut Session, position: usize, fields: DishArgs) -> anyhow::Result<()> {
    let index = to_index(position)?;
    let Some(current) = session.planner.catalog().get(index).cloned() else {
        return Err(Error::IndexOutOfRange(position).into());
    };

    let input = DishInput::new(
        fields.name.unwrap_or(current.name),
        fields
            .ingredients
            .unwrap_or_else(|| current.ingredients.join(", ")),
        fields
            .category
            .unwrap_or_else(|| current.category.to_string()),
    );

    session.planner.edit_dish(index, input)?;
    println!("Dish {position} updated");

    Ok(())
}

pub fn delete(session: &mut Session, position: usize) -> anyhow::Result<()> {
    let dish = session.planner.delete_dish(to_index(position)?)?;
    println!("Dish {} deleted", dish.name);

    Ok(())
}

pub fn list(session: &Session) -> anyhow::Result<()> {
    let dishes = session.planner.catalog().dishes();
    if dishes.is_empty() {
        println!("No dishes available");
        return Ok(());
    }

    for (i, dish) in dishes.iter().enumerate() {
        println!("{:>3}. {}", i + 1, format_dish(dish));
    }

    Ok(())
}

fn format_dish(dish: &Dish) -> String {
    format!(
        "{} ({}): {}",
        dish.name,
        dish.category,
        dish.ingredients.join(", ")
    )
}

/// Positions shown to the user start at 1.
fn to_index(position: usize) -> mealcal_shared::Result<usize> {
    position
        .checked_sub(1)
        .ok_or(Error::IndexOutOfRange(position))
}
