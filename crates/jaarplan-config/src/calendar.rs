use std::env;

/// Calendar year in which the default academic year starts.
pub const DEFAULT_FIRST_ACADEMIC_YEAR: i32 = 2025;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarConfig {
    /// `2025` for academic year 2025/2026
    pub first_academic_year: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_academic_year: DEFAULT_FIRST_ACADEMIC_YEAR,
        }
    }
}

impl CalendarConfig {
    pub fn from_env() -> Self {
        Self::parse(env::var("ACADEMIC_YEAR_START").ok().as_deref())
    }

    /// Accepts `2025` as well as `2025/2026` and `2025-2026`.
    pub fn parse(value: Option<&str>) -> Self {
        let first_academic_year = value
            .and_then(|v| v.trim().split(['/', '-']).next())
            .and_then(|year| year.trim().parse::<i32>().ok())
            .filter(|year| (1900..=9999).contains(year))
            .unwrap_or(DEFAULT_FIRST_ACADEMIC_YEAR);

        Self { first_academic_year }
    }
}
