use std::collections::BTreeSet;

use mealcal_shared::{
    Error, MonthKey,
    mealplan::{DayAssignments, Meals},
};

static EMPTY_MONTH: DayAssignments = DayAssignments::new();

/// Month by month record of planned dishes.
///
/// A dish appears at most once per day and at most once per week bucket of a
/// month. Days without dishes are never stored, neither are months without
/// days.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MealAssignmentStore {
    months: Meals,
}

impl MealAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a raw month mapping by replaying every day in
    /// order, so the result holds the same invariants as one built through
    /// [`MealAssignmentStore::assign`]. Empty days are dropped.
    pub fn from_meals(meals: Meals) -> mealcal_shared::Result<Self> {
        let mut store = Self::new();

        for (month, days) in meals {
            for (day, dishes) in days {
                for dish in dishes {
                    store.assign(month, day, &dish)?;
                }
            }
        }

        Ok(store)
    }

    pub fn meals(&self) -> &Meals {
        &self.months
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Plans `dish` on `day` of `month`.
    pub fn assign(&mut self, month: MonthKey, day: u8, dish: &str) -> mealcal_shared::Result<()> {
        if !month.contains_day(day) {
            mealcal_shared::bail!(Error::InvalidDay { month, day });
        }

        let days = self.query(month);

        if days.get(&day).is_some_and(|d| d.iter().any(|n| n == dish)) {
            mealcal_shared::bail!(Error::DuplicateDayAssignment {
                month,
                day,
                dish: dish.to_owned(),
            });
        }

        if self.week_dishes(month, month.week_of(day)).contains(dish) {
            mealcal_shared::bail!(Error::DuplicateWeekAssignment {
                month,
                day,
                dish: dish.to_owned(),
            });
        }

        self.months
            .entry(month)
            .or_default()
            .entry(day)
            .or_default()
            .push(dish.to_owned());

        tracing::debug!(%month, day, dish, "dish assigned");

        Ok(())
    }

    /// Removes `dish` from `day` of `month`. Returns whether something was
    /// removed.
    pub fn unassign(&mut self, month: MonthKey, day: u8, dish: &str) -> bool {
        let Some(days) = self.months.get_mut(&month) else {
            return false;
        };

        let Some(dishes) = days.get_mut(&day) else {
            return false;
        };

        let Some(position) = dishes.iter().position(|n| n == dish) else {
            return false;
        };

        dishes.remove(position);

        if dishes.is_empty() {
            days.remove(&day);
        }

        if days.is_empty() {
            self.months.remove(&month);
        }

        tracing::debug!(%month, day, dish, "dish unassigned");

        true
    }

    /// Days of `month` with their dishes, empty when nothing is planned.
    pub fn query(&self, month: MonthKey) -> &DayAssignments {
        self.months.get(&month).unwrap_or(&EMPTY_MONTH)
    }

    /// Every dish planned in the given week bucket of `month`.
    pub fn week_dishes(&self, month: MonthKey, week: u8) -> BTreeSet<&str> {
        let offset = month.first_weekday_offset();

        self.query(month)
            .iter()
            .filter(|(day, _)| mealcal_shared::week_index(**day, offset) == week)
            .flat_map(|(_, dishes)| dishes.iter().map(String::as_str))
            .collect()
    }

    /// One item per planned meal across all months, repeats included.
    pub fn planned_dishes(&self) -> impl Iterator<Item = &str> {
        self.months
            .values()
            .flat_map(|days| days.values())
            .flatten()
            .map(String::as_str)
    }
}

impl TryFrom<Meals> for MealAssignmentStore {
    type Error = Error;

    fn try_from(value: Meals) -> Result<Self, Self::Error> {
        Self::from_meals(value)
    }
}
