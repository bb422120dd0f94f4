#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use mealcal::{Planner, Prompt};
use mealcal_db::Storage;
use mealcal_dish::DishInput;

/// In-memory storage recording every write in order.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryStorage {
    pub fn with(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Arc<Self> {
        let storage = Self::default();
        {
            let mut values = storage.values.lock().unwrap();
            for (key, value) in entries {
                values.insert(key.to_owned(), value.to_owned());
            }
        }

        Arc::new(storage)
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_owned(), value.to_owned()));

        Ok(())
    }
}

/// Storage whose every call fails.
pub struct BrokenStorage;

#[async_trait::async_trait]
impl Storage for BrokenStorage {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage unavailable")
    }

    async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }
}

pub struct Answer(pub bool);

impl Prompt for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

pub fn planner_with_dishes() -> anyhow::Result<Planner> {
    let mut planner = Planner::default();
    planner.add_dish(DishInput::new("Tofu", "tofu, soy sauce", "Protein"))?;
    planner.add_dish(DishInput::new("Salmon", "salmon, lemon", "Protein"))?;
    planner.add_dish(DishInput::new("Salad", "lettuce, tomato", "Vegetables"))?;

    Ok(planner)
}
