use strum::{AsRefStr, Display};

/// Independently persisted part of the planner state.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Slice {
    Meals,
    Dishes,
}

impl Slice {
    /// Key of the slice in durable storage.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Slice::Meals => "meals",
            Slice::Dishes => "dishes",
        }
    }
}

/// Emitted after every successful mutation, carrying the full JSON document
/// of the mutated slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub slice: Slice,
    pub snapshot: String,
}
