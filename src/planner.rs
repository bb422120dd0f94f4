use mealcal_db::Storage;
use mealcal_dish::{DishCatalog, DishInput};
use mealcal_mealplan::MealAssignmentStore;
use mealcal_shared::{
    Change, Error, MonthKey, Slice,
    dish::Dish,
    mealplan::DayAssignments,
};
use mealcal_shopping::GroceryList;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::document;

/// Owned planner state: the dish catalog and the month by month meal plan.
///
/// Every successful mutation is published as a [`Change`] to subscribers.
/// Failed mutations leave the state untouched and publish nothing.
#[derive(Default)]
pub struct Planner {
    catalog: DishCatalog,
    store: MealAssignmentStore,
    subscribers: Vec<UnboundedSender<Change>>,
}

impl Planner {
    pub fn new(catalog: DishCatalog, store: MealAssignmentStore) -> Self {
        Self {
            catalog,
            store,
            subscribers: vec![],
        }
    }

    /// Restores the last persisted state. A missing, unreadable or invalid
    /// slice starts out empty.
    pub async fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let catalog = match read_slice(storage, Slice::Dishes).await {
            Some(text) => document::parse_dishes(&text)
                .inspect_err(|err| tracing::warn!(%err, "stored dishes ignored"))
                .unwrap_or_default(),
            None => DishCatalog::default(),
        };

        let store = match read_slice(storage, Slice::Meals).await {
            Some(text) => document::parse_meals(&text)
                .inspect_err(|err| tracing::warn!(%err, "stored meals ignored"))
                .unwrap_or_default(),
            None => MealAssignmentStore::default(),
        };

        tracing::info!(
            dishes = catalog.len(),
            months = store.meals().len(),
            "planner loaded"
        );

        Self::new(catalog, store)
    }

    pub fn catalog(&self) -> &DishCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &MealAssignmentStore {
        &self.store
    }

    pub fn query(&self, month: MonthKey) -> &DayAssignments {
        self.store.query(month)
    }

    pub fn grocery_list(&self) -> GroceryList {
        mealcal_shopping::generate_grocery_list(&self.store, &self.catalog)
    }

    /// Registers a new change listener. The channel closes when the planner
    /// is dropped.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Change> {
        let (sender, receiver) = unbounded_channel();
        self.subscribers.push(sender);

        receiver
    }

    pub fn add_dish(&mut self, input: DishInput) -> mealcal_shared::Result<()> {
        let dish = self.catalog.add(input)?;
        tracing::info!(name = %dish.name, category = %dish.category, "dish added");

        self.publish(Slice::Dishes);

        Ok(())
    }

    pub fn edit_dish(&mut self, index: usize, input: DishInput) -> mealcal_shared::Result<()> {
        let dish = self.catalog.edit(index, input)?;
        tracing::info!(index, name = %dish.name, "dish edited");

        self.publish(Slice::Dishes);

        Ok(())
    }

    /// Removes a dish from the catalog. Meals already planned with it stay in
    /// the plan and are ignored by grocery lists.
    pub fn delete_dish(&mut self, index: usize) -> mealcal_shared::Result<Dish> {
        let dish = self.catalog.delete(index)?;
        tracing::info!(index, name = %dish.name, "dish deleted");

        self.publish(Slice::Dishes);

        Ok(dish)
    }

    pub fn assign(&mut self, month: MonthKey, day: u8, dish: &str) -> mealcal_shared::Result<()> {
        if !self.catalog.contains(dish) {
            mealcal_shared::bail!(Error::UnknownDish(dish.to_owned()));
        }

        self.store.assign(month, day, dish)?;
        tracing::info!(%month, day, dish, "meal planned");

        self.publish(Slice::Meals);

        Ok(())
    }

    pub fn unassign(&mut self, month: MonthKey, day: u8, dish: &str) -> bool {
        if !self.store.unassign(month, day, dish) {
            return false;
        }

        tracing::info!(%month, day, dish, "meal removed");
        self.publish(Slice::Meals);

        true
    }

    pub fn replace_dishes(&mut self, catalog: DishCatalog) {
        self.catalog = catalog;
        tracing::info!(dishes = self.catalog.len(), "dishes replaced");

        self.publish(Slice::Dishes);
    }

    pub fn replace_meals(&mut self, store: MealAssignmentStore) {
        self.store = store;
        tracing::info!(months = self.store.meals().len(), "meals replaced");

        self.publish(Slice::Meals);
    }

    fn publish(&mut self, slice: Slice) {
        if self.subscribers.is_empty() {
            return;
        }

        let snapshot = match slice {
            Slice::Dishes => document::dishes_document(&self.catalog, false),
            Slice::Meals => document::meals_document(&self.store, false),
        };

        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(%err, %slice, "failed to encode snapshot");
                return;
            }
        };

        let change = Change { slice, snapshot };
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

async fn read_slice<S: Storage + ?Sized>(storage: &S, slice: Slice) -> Option<String> {
    match storage.get(slice.storage_key()).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, %slice, "failed to read stored state");
            None
        }
    }
}
