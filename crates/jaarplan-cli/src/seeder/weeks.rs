//! Generated week rows for one academic year.

use chrono::{Days, NaiveDate, Weekday};
use jaarplan_engine::format_token;
use jaarplan_models::weeks::WeekRow;

/// Teaching week after which a vacation week is inserted, per semester.
const VACATION_AFTER: [(usize, &str); 2] = [(8, "Herfstvakantie"), (6, "Voorjaarsvakantie")];

fn first_monday(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Mon, 1)
}

/// Two-part token (`1-sep`), the way planning sheets write week starts.
fn short_token(date: NaiveDate) -> String {
    let token = format_token(date);
    match token.rsplit_once('-') {
        Some((day_month, _)) => day_month.to_string(),
        None => token,
    }
}

/// Rows of one semester and the Monday after its last week.
fn semester_rows(
    semester: usize,
    start: NaiveDate,
    teaching_weeks: usize,
    vacation: (usize, &str),
) -> (Vec<WeekRow>, NaiveDate) {
    let mut rows = vec![WeekRow::new(format!("Semester {semester}"), "")];
    let mut monday = start;
    for week in 1..=teaching_weeks {
        rows.push(WeekRow::new(format!("{semester}.{week}"), short_token(monday)));
        monday = monday + Days::new(7);
        if week == vacation.0 && week < teaching_weeks {
            rows.push(WeekRow::new(vacation.1, short_token(monday)));
            monday = monday + Days::new(7);
        }
    }
    (rows, monday)
}

/// Semester sentinels, teaching weeks from the first Monday of September and
/// February, one vacation week per semester, and a closing week.
pub fn generate_week_rows(first_year: i32, weeks_per_semester: usize) -> Vec<WeekRow> {
    let (Some(autumn), Some(spring)) = (
        first_monday(first_year, 9),
        first_monday(first_year + 1, 2),
    ) else {
        return Vec::new();
    };

    let (mut rows, _) = semester_rows(1, autumn, weeks_per_semester, VACATION_AFTER[0]);
    let (second, closing) = semester_rows(2, spring, weeks_per_semester, VACATION_AFTER[1]);
    rows.extend(second);
    rows.push(WeekRow::new("Afsluiting", short_token(closing)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaarplan_engine::{AcademicYear, WeekIndex};

    #[test]
    fn test_generated_rows_fold_into_both_semesters() {
        let rows = generate_week_rows(2025, 10);
        let index = WeekIndex::build(&rows, &AcademicYear::new(2025));
        assert!(index.dropped().is_empty());
        assert_eq!(index.teaching_weeks().count(), 20);
        assert_eq!(index.weeks().iter().filter(|w| w.is_vacation).count(), 3);
        assert_eq!(
            index.weeks()[0].start_date,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert_eq!(index.weeks().last().unwrap().week_code, "Afsluiting");
    }

    #[test]
    fn test_short_token_has_no_year() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(short_token(date), "2-mrt");
    }
}
