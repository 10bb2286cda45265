//! Week models.
//!
//! The `weeks` collection holds raw [`WeekRow`]s in calendar order. Semester
//! sentinel rows (`Semester 1`, `Semester 2`) are interleaved with the real weeks;
//! the engine folds them into [`WeekDescriptor`]s.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Academic semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Semester {
    #[default]
    First,
    Second,
}

impl Semester {
    pub fn number(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester.number()
    }
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::First),
            2 => Ok(Semester::Second),
            other => Err(format!("semester must be 1 or 2, got {other}")),
        }
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| format!("invalid semester: {s}"))
            .and_then(Semester::try_from)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Raw row of the `weeks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct WeekRow {
    /// Week label (`1.1 lesweek`, `Herfstvakantie`) or a semester sentinel
    pub label: String,
    /// Raw start date token; blank for sentinel rows
    #[serde(default)]
    pub start_date: String,
}

impl WeekRow {
    pub fn new(label: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start_date: start_date.into(),
        }
    }
}

/// DTO for replacing the whole `weeks` collection.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImportWeeksDto {
    #[validate(length(min = 1, message = "at least one week row is required"))]
    pub weeks: Vec<WeekRow>,
}

/// A normalized academic week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekDescriptor {
    /// Short code derived from the label (`1.1`)
    pub week_code: String,
    /// Full label as entered
    pub week_label: String,
    /// First day of the week
    pub start_date: NaiveDate,
    /// Semester the week belongs to
    #[schema(value_type = u8, example = 1)]
    pub semester: Semester,
    /// Vacation or closing week; never receives assignments
    pub is_vacation: bool,
}

impl WeekDescriptor {
    /// Last day of the seven-day span.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Days::new(6)
    }

    /// Whether `date` falls inside `[start_date, start_date + 6]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date()
    }
}

/// A week row that could not be turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DroppedWeekRow {
    /// Position of the row in the collection
    pub position: usize,
    pub label: String,
    pub start_date: String,
    pub reason: String,
}

/// Normalized week index with the rows that had to be dropped.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeekIndexResponse {
    pub weeks: Vec<WeekDescriptor>,
    pub dropped: Vec<DroppedWeekRow>,
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Semester::Second).unwrap(), "2");
        let s: Semester = serde_json::from_str("1").unwrap();
        assert_eq!(s, Semester::First);
        assert!(serde_json::from_str::<Semester>("3").is_err());
    }

    #[test]
    fn test_semester_from_str() {
        assert_eq!(" 2 ".parse::<Semester>(), Ok(Semester::Second));
        assert!("twee".parse::<Semester>().is_err());
    }

    #[test]
    fn test_week_span_is_closed_seven_days() {
        let week = WeekDescriptor {
            week_code: "1.1".to_string(),
            week_label: "1.1 lesweek".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            semester: Semester::First,
            is_vacation: false,
        };
        assert_eq!(week.end_date(), NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
        assert!(week.contains(NaiveDate::from_ymd_opt(2025, 9, 7).unwrap()));
        assert!(!week.contains(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()));
    }

    #[test]
    fn test_week_row_date_defaults_blank() {
        let row: WeekRow = serde_json::from_str(r#"{"label":"Semester 2"}"#).unwrap();
        assert_eq!(row.start_date, "");
    }
}
