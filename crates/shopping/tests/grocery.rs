use mealcal_dish::{DishCatalog, DishInput};
use mealcal_mealplan::MealAssignmentStore;
use mealcal_shared::MonthKey;
use mealcal_shopping::{generate_grocery_list, unique_ingredients};

fn june() -> MonthKey {
    "2025-06".parse().unwrap()
}

fn catalog() -> anyhow::Result<DishCatalog> {
    let mut catalog = DishCatalog::new();
    catalog.add(DishInput::new("Tofu", "tofu, soy sauce", "Protein"))?;
    catalog.add(DishInput::new("Fried Rice", "rice, soy sauce, egg", "Mixed"))?;
    catalog.add(DishInput::new("Salad", "lettuce", "Vegetables"))?;

    Ok(catalog)
}

#[test]
fn test_counts_each_assignment() -> anyhow::Result<()> {
    let catalog = catalog()?;
    let mut store = MealAssignmentStore::new();

    store.assign(june(), 3, "Tofu")?;
    store.assign(june(), 10, "Tofu")?;

    let list = generate_grocery_list(&store, &catalog);

    assert_eq!(list.get("tofu"), Some(2));
    assert_eq!(list.get("soy sauce"), Some(2));
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.to_string(), "Ingredients List:\nsoy sauce x2\ntofu x2");

    Ok(())
}

#[test]
fn test_shared_ingredients_across_dishes_and_months() -> anyhow::Result<()> {
    let catalog = catalog()?;
    let mut store = MealAssignmentStore::new();

    store.assign(june(), 3, "Tofu")?;
    store.assign(june(), 3, "Fried Rice")?;
    store.assign("2025-07".parse()?, 1, "Fried Rice")?;

    let list = generate_grocery_list(&store, &catalog);

    assert_eq!(list.get("soy sauce"), Some(3));
    assert_eq!(list.get("rice"), Some(2));
    assert_eq!(list.get("egg"), Some(2));
    assert_eq!(list.get("tofu"), Some(1));
    assert_eq!(list.get("lettuce"), None);

    Ok(())
}

#[test]
fn test_skips_deleted_dishes() -> anyhow::Result<()> {
    let mut catalog = catalog()?;
    let mut store = MealAssignmentStore::new();

    store.assign(june(), 3, "Salad")?;
    store.assign(june(), 4, "Tofu")?;
    catalog.delete(2)?;

    let list = generate_grocery_list(&store, &catalog);
    assert_eq!(list.get("lettuce"), None);
    assert_eq!(list.get("tofu"), Some(1));

    Ok(())
}

#[test]
fn test_empty_plan() -> anyhow::Result<()> {
    let list = generate_grocery_list(&MealAssignmentStore::new(), &catalog()?);

    assert!(list.is_empty());
    assert_eq!(list.to_string(), "Ingredients List:");

    Ok(())
}

#[test]
fn test_unique_ingredients() -> anyhow::Result<()> {
    let catalog = catalog()?;
    let mut store = MealAssignmentStore::new();

    store.assign(june(), 3, "Tofu")?;
    store.assign(june(), 10, "Tofu")?;
    store.assign(june(), 11, "Fried Rice")?;

    let ingredients: Vec<String> = unique_ingredients(&store, &catalog).into_iter().collect();
    assert_eq!(ingredients, vec!["egg", "rice", "soy sauce", "tofu"]);

    assert!(unique_ingredients(&MealAssignmentStore::new(), &catalog).is_empty());

    Ok(())
}
