use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use mealcal_dish::DishCatalog;
use mealcal_mealplan::MealAssignmentStore;

/// Ingredient counts over every planned meal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroceryList {
    items: BTreeMap<String, u32>,
}

impl GroceryList {
    pub fn items(&self) -> &BTreeMap<String, u32> {
        &self.items
    }

    pub fn get(&self, ingredient: &str) -> Option<u32> {
        self.items.get(ingredient).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for GroceryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ingredients List:")?;

        for (ingredient, count) in &self.items {
            write!(f, "\n{ingredient} x{count}")?;
        }

        Ok(())
    }
}

/// Counts one unit per ingredient for each planned meal. Meals whose dish is
/// no longer in the catalog are skipped.
pub fn generate_grocery_list(store: &MealAssignmentStore, catalog: &DishCatalog) -> GroceryList {
    let mut items = BTreeMap::new();

    for dish in store.planned_dishes().filter_map(|name| catalog.find(name)) {
        for ingredient in &dish.ingredients {
            *items.entry(ingredient.to_owned()).or_insert(0) += 1;
        }
    }

    GroceryList { items }
}

/// Distinct ingredients of every dish planned at least once.
pub fn unique_ingredients(store: &MealAssignmentStore, catalog: &DishCatalog) -> BTreeSet<String> {
    let planned: BTreeSet<&str> = store.planned_dishes().collect();

    planned
        .into_iter()
        .filter_map(|name| catalog.find(name))
        .flat_map(|dish| dish.ingredients.iter().cloned())
        .collect()
}
