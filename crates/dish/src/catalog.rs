use mealcal_shared::{Error, dish::Dish};

use crate::DishInput;

/// Ordered dish list. Dishes are addressed by their current position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DishCatalog {
    dishes: Vec<Dish>,
}

impl DishCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already structured dishes. Names and
    /// ingredients are trimmed and blank ingredients dropped, as
    /// [`DishInput::parse`] does, then the invariants of
    /// [`DishCatalog::add`] are enforced.
    pub fn from_dishes(dishes: Vec<Dish>) -> mealcal_shared::Result<Self> {
        let mut catalog = Self::new();

        for dish in dishes {
            let name = dish.name.trim();
            if name.is_empty() {
                mealcal_shared::bail!(Error::EmptyField("name"));
            }

            let ingredients: Vec<String> = dish
                .ingredients
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(str::to_owned)
                .collect();

            if ingredients.is_empty() {
                mealcal_shared::bail!(Error::EmptyField("ingredients"));
            }

            catalog.ensure_unique(name, None)?;
            catalog.dishes.push(Dish {
                name: name.to_owned(),
                ingredients,
                category: dish.category,
            });
        }

        Ok(catalog)
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    /// Exact-name lookup, as used when resolving planned meals.
    pub fn find(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn add(&mut self, input: DishInput) -> mealcal_shared::Result<&Dish> {
        let dish = input.parse()?;
        self.ensure_unique(&dish.name, None)?;

        tracing::debug!(name = %dish.name, "dish added");

        self.dishes.push(dish);

        Ok(&self.dishes[self.dishes.len() - 1])
    }

    /// Replaces the dish at `index` in place. The dish being edited may keep
    /// its own name.
    pub fn edit(&mut self, index: usize, input: DishInput) -> mealcal_shared::Result<&Dish> {
        if index >= self.dishes.len() {
            mealcal_shared::bail!(Error::IndexOutOfRange(index));
        }

        let dish = input.parse()?;
        self.ensure_unique(&dish.name, Some(index))?;

        tracing::debug!(index, name = %dish.name, "dish edited");

        self.dishes[index] = dish;

        Ok(&self.dishes[index])
    }

    /// Removes the dish at `index`, shifting later dishes down by one. Meals
    /// already planned with it are left as they are.
    pub fn delete(&mut self, index: usize) -> mealcal_shared::Result<Dish> {
        if index >= self.dishes.len() {
            mealcal_shared::bail!(Error::IndexOutOfRange(index));
        }

        let dish = self.dishes.remove(index);

        tracing::debug!(index, name = %dish.name, "dish deleted");

        Ok(dish)
    }

    fn ensure_unique(&self, name: &str, exclude: Option<usize>) -> mealcal_shared::Result<()> {
        let taken = self
            .dishes
            .iter()
            .enumerate()
            .any(|(i, dish)| Some(i) != exclude && dish.is_named(name));

        if taken {
            mealcal_shared::bail!(Error::DuplicateName(name.to_owned()));
        }

        Ok(())
    }
}

impl TryFrom<Vec<Dish>> for DishCatalog {
    type Error = Error;

    fn try_from(value: Vec<Dish>) -> Result<Self, Self::Error> {
        Self::from_dishes(value)
    }
}
