//! JSON documents shared by durable storage and file import/export.
//!
//! - dishes: `[{"name": .., "ingredients": [..], "category": ..}]`
//! - meals: `{"YYYY-MM": {"<day>": ["<dish>", ..]}}`
//! - ingredients: `["<ingredient>", ..]`

use std::collections::BTreeSet;

use mealcal_dish::DishCatalog;
use mealcal_mealplan::MealAssignmentStore;
use mealcal_shared::{Error, dish::Dish, mealplan::Meals};
use serde::Serialize;
use serde_json::Value;

pub fn dishes_document(catalog: &DishCatalog, pretty: bool) -> mealcal_shared::Result<String> {
    encode(catalog.dishes(), pretty)
}

pub fn meals_document(store: &MealAssignmentStore, pretty: bool) -> mealcal_shared::Result<String> {
    encode(store.meals(), pretty)
}

pub fn ingredients_document(
    ingredients: &BTreeSet<String>,
    pretty: bool,
) -> mealcal_shared::Result<String> {
    encode(ingredients, pretty)
}

/// Parses a dishes document into a catalog, rejecting anything that is not
/// an array of well-formed, uniquely named dishes.
pub fn parse_dishes(text: &str) -> mealcal_shared::Result<DishCatalog> {
    let value = parse_json(text)?;
    if !value.is_array() {
        mealcal_shared::schema!("dishes document must be an array");
    }

    let dishes: Vec<Dish> =
        serde_json::from_value(value).map_err(|e| Error::Schema(e.to_string()))?;

    DishCatalog::try_from(dishes).map_err(|e| Error::Schema(e.to_string()))
}

/// Parses a meals document into a store. Month keys, day numbers and the
/// per-day and per-week uniqueness rules are all checked.
pub fn parse_meals(text: &str) -> mealcal_shared::Result<MealAssignmentStore> {
    let value = parse_json(text)?;
    if !value.is_object() {
        mealcal_shared::schema!("meals document must be an object");
    }

    let meals: Meals = serde_json::from_value(value).map_err(|e| Error::Schema(e.to_string()))?;

    MealAssignmentStore::try_from(meals).map_err(|e| Error::Schema(e.to_string()))
}

fn parse_json(text: &str) -> mealcal_shared::Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::Schema(format!("malformed JSON: {e}")))
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> mealcal_shared::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use mealcal_dish::DishInput;
    use mealcal_shared::MonthKey;

    use super::*;

    fn june() -> MonthKey {
        "2025-06".parse().unwrap()
    }

    #[test]
    fn test_meals_document_shape() {
        let mut store = MealAssignmentStore::new();
        store.assign(june(), 12, "Tofu").unwrap();
        store.assign(june(), 3, "Salmon").unwrap();
        store.assign(june(), 3, "Rice").unwrap();

        assert_eq!(
            meals_document(&store, false).unwrap(),
            r#"{"2025-06":{"3":["Salmon","Rice"],"12":["Tofu"]}}"#
        );
    }

    #[test]
    fn test_meals_round_trip() {
        let mut store = MealAssignmentStore::new();
        store.assign(june(), 3, "Salmon").unwrap();
        store.assign(june(), 3, "Rice").unwrap();
        store.assign(june(), 8, "Salmon").unwrap();
        store.assign("2024-02".parse().unwrap(), 29, "Soup").unwrap();

        let text = meals_document(&store, true).unwrap();

        assert_eq!(parse_meals(&text).unwrap(), store);
    }

    #[test]
    fn test_dishes_document_shape() {
        let mut catalog = DishCatalog::new();
        catalog
            .add(DishInput::new("Tofu", "tofu, soy sauce", "Protein"))
            .unwrap();

        assert_eq!(
            dishes_document(&catalog, false).unwrap(),
            r#"[{"name":"Tofu","ingredients":["tofu","soy sauce"],"category":"Protein"}]"#
        );
    }

    #[test]
    fn test_parse_dishes_rejects_object() {
        let err = parse_dishes(r#"{"name":"Tofu","ingredients":["tofu"],"category":"Protein"}"#)
            .unwrap_err();

        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_parse_dishes_rejects_bad_entries() {
        for text in [
            r#"[{"name":"Tofu","ingredients":["tofu"],"category":"Dessert"}]"#,
            r#"[{"name":"Tofu","ingredients":"tofu","category":"Protein"}]"#,
            r#"[{"name":"Tofu","ingredients":[],"category":"Protein"}]"#,
            r#"[{"name":"Tofu","ingredients":["a"],"category":"Mixed"},{"name":"tofu","ingredients":["b"],"category":"Mixed"}]"#,
            "[1, 2]",
            "not json",
        ] {
            assert!(
                matches!(parse_dishes(text), Err(Error::Schema(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_meals_rejects_bad_documents() {
        for text in [
            "[]",
            r#"{"June":{"3":["Tofu"]}}"#,
            r#"{"2025-06":{"31":["Tofu"]}}"#,
            r#"{"2025-06":{"three":["Tofu"]}}"#,
            r#"{"2025-06":{"3":"Tofu"}}"#,
            r#"{"2025-06":{"3":["Tofu","Tofu"]}}"#,
            r#"{"2025-06":{"3":["Tofu"],"5":["Tofu"]}}"#,
            "{",
        ] {
            assert!(
                matches!(parse_meals(text), Err(Error::Schema(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_meals_prunes_empty_days() {
        let store = parse_meals(r#"{"2025-06":{"3":[],"4":["Tofu"]},"2025-07":{}}"#).unwrap();

        assert_eq!(
            meals_document(&store, false).unwrap(),
            r#"{"2025-06":{"4":["Tofu"]}}"#
        );
    }
}
