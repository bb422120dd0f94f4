use std::collections::BTreeMap;

use crate::MonthKey;

/// Dish names planned on each day of one month, in the order they were added.
pub type DayAssignments = BTreeMap<u8, Vec<String>>;

pub type Meals = BTreeMap<MonthKey, DayAssignments>;
