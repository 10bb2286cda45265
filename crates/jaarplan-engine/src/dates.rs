//! Dutch day-month date tokens.
//!
//! Source spreadsheets write dates as `DD-MMM` (`15-sep`) or `DD-MMM-YYYY`
//! (`3-feb-2026`), with Dutch month abbreviations or full names in any case.
//! Two-part tokens carry no year; it is inferred from the academic year, which
//! starts in the boundary month (August) of its first calendar year.

use chrono::{Datelike, NaiveDate};

/// Month from which a two-part token belongs to the first calendar year.
pub const DEFAULT_BOUNDARY_MONTH: u32 = 8;

const MONTHS: [(&str, &str); 12] = [
    ("jan", "januari"),
    ("feb", "februari"),
    ("mrt", "maart"),
    ("apr", "april"),
    ("mei", "mei"),
    ("jun", "juni"),
    ("jul", "juli"),
    ("aug", "augustus"),
    ("sep", "september"),
    ("okt", "oktober"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Error produced when a date token cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("empty date token")]
    Empty,

    #[error("date token `{0}` must have two or three `-` separated parts")]
    SegmentCount(String),

    #[error("unknown month `{0}`")]
    UnknownMonth(String),

    #[error("invalid day `{0}`")]
    InvalidDay(String),

    #[error("invalid year `{0}`")]
    InvalidYear(String),

    #[error("`{0}` is not a calendar date")]
    NotACalendarDate(String),
}

/// Academic year used to infer the year of two-part tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    /// Calendar year in which the academic year starts (2025 for 2025/2026)
    pub first_year: i32,
    /// Months at or after this one belong to `first_year`, earlier ones to the next year
    pub boundary_month: u32,
}

impl AcademicYear {
    pub const fn new(first_year: i32) -> Self {
        Self {
            first_year,
            boundary_month: DEFAULT_BOUNDARY_MONTH,
        }
    }

    pub const fn second_year(&self) -> i32 {
        self.first_year + 1
    }

    /// Calendar year a month of this academic year falls in.
    pub fn year_for_month(&self, month: u32) -> i32 {
        if month >= self.boundary_month {
            self.first_year
        } else {
            self.second_year()
        }
    }
}

impl Default for AcademicYear {
    fn default() -> Self {
        Self::new(2025)
    }
}

/// Resolves a Dutch month abbreviation or full name (case-insensitive) to 1..=12.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|(abbr, full)| *abbr == name || *full == name)
        .map(|index| index as u32 + 1)
}

/// Normalizes a `DD-MMM` or `DD-MMM-YYYY` token to a calendar date.
pub fn normalize(token: &str, academic_year: &AcademicYear) -> Result<NaiveDate, DateParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DateParseError::Empty);
    }

    let parts: Vec<&str> = token.split('-').map(str::trim).collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month] => {
            let month = parse_month(month)?;
            (parse_day(day)?, month, academic_year.year_for_month(month))
        }
        [day, month, year] => (parse_day(day)?, parse_month(month)?, parse_year(year)?),
        _ => return Err(DateParseError::SegmentCount(token.to_string())),
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::NotACalendarDate(token.to_string()))
}

/// Renders a date as a three-part token (`15-sep-2025`) that normalizes back
/// to the same date regardless of academic year.
pub fn format_token(date: NaiveDate) -> String {
    let (abbr, _) = MONTHS[date.month0() as usize];
    format!("{}-{}-{}", date.day(), abbr, date.year())
}

fn parse_day(raw: &str) -> Result<u32, DateParseError> {
    raw.parse::<u32>()
        .ok()
        .filter(|day| (1..=31).contains(day))
        .ok_or_else(|| DateParseError::InvalidDay(raw.to_string()))
}

fn parse_month(raw: &str) -> Result<u32, DateParseError> {
    month_number(raw).ok_or_else(|| DateParseError::UnknownMonth(raw.to_string()))
}

fn parse_year(raw: &str) -> Result<i32, DateParseError> {
    if raw.len() != 4 {
        return Err(DateParseError::InvalidYear(raw.to_string()));
    }
    raw.parse::<i32>()
        .map_err(|_| DateParseError::InvalidYear(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_autumn_months_use_first_year() {
        let year = AcademicYear::new(2025);
        assert_eq!(normalize("15-sep", &year), Ok(ymd(2025, 9, 15)));
        assert_eq!(normalize("1-aug", &year), Ok(ymd(2025, 8, 1)));
        assert_eq!(normalize("31-dec", &year), Ok(ymd(2025, 12, 31)));
    }

    #[test]
    fn test_spring_months_use_second_year() {
        let year = AcademicYear::new(2025);
        assert_eq!(normalize("3-feb", &year), Ok(ymd(2026, 2, 3)));
        assert_eq!(normalize("1-jan", &year), Ok(ymd(2026, 1, 1)));
        assert_eq!(normalize("31-jul", &year), Ok(ymd(2026, 7, 31)));
    }

    #[test]
    fn test_every_month_follows_boundary() {
        let year = AcademicYear::new(2025);
        for (index, (abbr, _)) in MONTHS.iter().enumerate() {
            let month = index as u32 + 1;
            let date = normalize(&format!("1-{abbr}"), &year).unwrap();
            let expected = if month >= 8 { 2025 } else { 2026 };
            assert_eq!(date.year(), expected, "month {abbr}");
        }
    }

    #[test]
    fn test_full_names_and_case() {
        let year = AcademicYear::default();
        assert_eq!(normalize("5-Oktober", &year), Ok(ymd(2025, 10, 5)));
        assert_eq!(normalize("05-MRT", &year), Ok(ymd(2026, 3, 5)));
        assert_eq!(normalize(" 12 - maart ", &year), Ok(ymd(2026, 3, 12)));
    }

    #[test]
    fn test_explicit_year_is_kept() {
        let year = AcademicYear::new(2025);
        assert_eq!(normalize("3-feb-2024", &year), Ok(ymd(2024, 2, 3)));
        assert_eq!(normalize("15-sep-2030", &year), Ok(ymd(2030, 9, 15)));
    }

    #[test]
    fn test_round_trip_is_stable() {
        let year = AcademicYear::new(2025);
        for token in ["15-sep", "3-feb", "29-feb-2028", "1-januari-2026"] {
            let first = normalize(token, &year).unwrap();
            let again = normalize(&format_token(first), &year).unwrap();
            assert_eq!(first, again, "token {token}");
            let other_year = AcademicYear::new(1999);
            assert_eq!(normalize(&format_token(first), &other_year).unwrap(), first);
        }
    }

    #[test]
    fn test_unknown_month() {
        assert_eq!(
            normalize("15-sept", &AcademicYear::default()),
            Err(DateParseError::UnknownMonth("sept".to_string()))
        );
        assert!(matches!(
            normalize("15-march", &AcademicYear::default()),
            Err(DateParseError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_impossible_dates() {
        let year = AcademicYear::new(2025);
        assert!(matches!(
            normalize("31-nov", &year),
            Err(DateParseError::NotACalendarDate(_))
        ));
        // 2026 is not a leap year
        assert!(matches!(
            normalize("29-feb", &year),
            Err(DateParseError::NotACalendarDate(_))
        ));
        assert_eq!(normalize("29-feb", &AcademicYear::new(2027)), Ok(ymd(2028, 2, 29)));
        assert!(matches!(normalize("0-sep", &year), Err(DateParseError::InvalidDay(_))));
        assert!(matches!(normalize("x-sep", &year), Err(DateParseError::InvalidDay(_))));
    }

    #[test]
    fn test_segment_count() {
        let year = AcademicYear::default();
        assert_eq!(normalize("", &year), Err(DateParseError::Empty));
        assert!(matches!(normalize("15", &year), Err(DateParseError::SegmentCount(_))));
        assert!(matches!(
            normalize("1-2-3-4", &year),
            Err(DateParseError::SegmentCount(_))
        ));
        assert!(matches!(
            normalize("1-sep-25", &year),
            Err(DateParseError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_custom_boundary() {
        let year = AcademicYear {
            first_year: 2025,
            boundary_month: 9,
        };
        assert_eq!(normalize("20-aug", &year), Ok(ymd(2026, 8, 20)));
        assert_eq!(normalize("1-sep", &year), Ok(ymd(2025, 9, 1)));
    }

    #[test]
    fn test_format_token() {
        assert_eq!(format_token(ymd(2026, 3, 5)), "5-mrt-2026");
    }
}
