use std::str::FromStr;

use mealcal_shared::{
    Error,
    dish::{Category, Dish},
};

/// Raw dish fields as typed by the user, ingredients comma separated.
#[derive(Clone, Debug, Default)]
pub struct DishInput {
    pub name: String,
    pub ingredients: String,
    pub category: String,
}

impl DishInput {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            category: category.into(),
        }
    }

    /// Checks field shapes and builds the dish. Name uniqueness is left to
    /// the catalog.
    pub fn parse(&self) -> mealcal_shared::Result<Dish> {
        let name = self.name.trim();
        if name.is_empty() {
            mealcal_shared::bail!(Error::EmptyField("name"));
        }

        let ingredients = split_ingredients(&self.ingredients);
        if ingredients.is_empty() {
            mealcal_shared::bail!(Error::EmptyField("ingredients"));
        }

        let category = self.category.trim();
        let category = Category::from_str(category)
            .map_err(|_| Error::InvalidCategory(category.to_owned()))?;

        Ok(Dish {
            name: name.to_owned(),
            ingredients,
            category,
        })
    }
}

pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_fields() {
        let dish = DishInput::new("  Tofu Bowl ", " tofu, soy sauce ,rice", " Protein ")
            .parse()
            .unwrap();

        assert_eq!(dish.name, "Tofu Bowl");
        assert_eq!(dish.ingredients, vec!["tofu", "soy sauce", "rice"]);
        assert_eq!(dish.category, Category::Protein);
    }

    #[test]
    fn test_parse_skips_blank_ingredients() {
        assert_eq!(split_ingredients("a,, b ,"), vec!["a", "b"]);
        assert!(split_ingredients(" , ,").is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        let err = DishInput::new("  ", "rice", "Mixed").parse().unwrap_err();
        assert!(matches!(err, Error::EmptyField("name")));

        let err = DishInput::new("Rice", " , ", "Mixed").parse().unwrap_err();
        assert!(matches!(err, Error::EmptyField("ingredients")));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let err = DishInput::new("Rice", "rice", "Dessert").parse().unwrap_err();
        assert!(matches!(err, Error::InvalidCategory(c) if c == "Dessert"));

        let err = DishInput::new("Rice", "rice", "protein").parse().unwrap_err();
        assert!(matches!(err, Error::InvalidCategory(_)));
    }
}
