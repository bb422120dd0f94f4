use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Month, OffsetDateTime};

/// Calendar month used as the top-level key of a meal plan, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    pub fn new(year: i32, month: u8) -> crate::Result<Self> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(crate::Error::InvalidMonth(format!("{year:04}-{month:02}")));
        }

        Ok(Self { year, month })
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// Month of the local clock, falling back to UTC when the offset is unknown.
    pub fn current() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        Self::from_date(now.date())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_year_month(self.year, self.month())
    }

    /// Weekday of the 1st, 0 for Sunday through 6 for Saturday.
    pub fn first_weekday_offset(&self) -> u8 {
        Date::from_calendar_date(self.year, self.month(), 1)
            .map(|date| date.weekday().number_days_from_sunday())
            .unwrap_or_default()
    }

    pub fn contains_day(&self, day: u8) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }

    /// Week bucket of `day` relative to this month's own first weekday.
    pub fn week_of(&self, day: u8) -> u8 {
        week_index(day, self.first_weekday_offset())
    }
}

/// Buckets a day of month into Sunday to Saturday rows of the month grid.
pub fn week_index(day: u8, first_weekday_offset: u8) -> u8 {
    let slot = u16::from(day.saturating_sub(1)) + u16::from(first_weekday_offset);

    // At most (254 + 255) / 7
    (slot / 7) as u8
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(key("2025-01").days_in_month(), 31);
        assert_eq!(key("2025-04").days_in_month(), 30);
        assert_eq!(key("2025-02").days_in_month(), 28);
        assert_eq!(key("2024-02").days_in_month(), 29);
        assert_eq!(key("1900-02").days_in_month(), 28);
        assert_eq!(key("2000-02").days_in_month(), 29);
    }

    #[test]
    fn test_first_weekday_offset() {
        // June 1st 2025 is a Sunday
        assert_eq!(key("2025-06").first_weekday_offset(), 0);
        // February 1st 2025 is a Saturday
        assert_eq!(key("2025-02").first_weekday_offset(), 6);
        // October 1st 2025 is a Wednesday
        assert_eq!(key("2025-10").first_weekday_offset(), 3);
    }

    #[test]
    fn test_week_index() {
        assert_eq!(week_index(1, 0), 0);
        assert_eq!(week_index(7, 0), 0);
        assert_eq!(week_index(8, 0), 1);
        assert_eq!(week_index(1, 6), 0);
        assert_eq!(week_index(2, 6), 1);
        assert_eq!(week_index(31, 3), 4);
        assert_eq!(week_index(255, 6), 37);
        assert_eq!(week_index(u8::MAX, u8::MAX), 72);

        let june = key("2025-06");
        assert_eq!(june.week_of(3), 0);
        assert_eq!(june.week_of(5), 0);
        assert_eq!(june.week_of(8), 1);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(key("2025-06").to_string(), "2025-06");
        assert_eq!(MonthKey::new(987, 3).unwrap().to_string(), "0987-03");

        for invalid in ["2025-13", "2025-00", "2025-6", "25-06", "2025/06", "", "abcd-ef"] {
            assert!(
                matches!(invalid.parse::<MonthKey>(), Err(crate::Error::InvalidMonth(_))),
                "{invalid} should be rejected"
            );
        }
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let mut keys = vec![key("2025-10"), key("2024-12"), key("2025-02")];
        keys.sort();

        assert_eq!(keys, vec![key("2024-12"), key("2025-02"), key("2025-10")]);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&key("2025-06")).unwrap();
        assert_eq!(json, "\"2025-06\"");

        let parsed: MonthKey = serde_json::from_str("\"2024-02\"").unwrap();
        assert_eq!(parsed, key("2024-02"));
        assert!(serde_json::from_str::<MonthKey>("\"June\"").is_err());
    }
}
