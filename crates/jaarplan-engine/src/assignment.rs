//! Assignment of activities to the weeks their date range overlaps.

use chrono::NaiveDate;
use jaarplan_models::activities::Activity;
use jaarplan_models::calendar::EnrichedActivityInstance;
use jaarplan_models::weeks::WeekDescriptor;

use crate::dates::{AcademicYear, DateParseError, normalize};
use crate::week_index::WeekIndex;

/// Reason an activity could not take part in assignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("start date: {0}")]
    StartDate(DateParseError),

    #[error("end date: {0}")]
    EndDate(DateParseError),

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Normalized, ordered date range of an activity.
pub fn activity_span(
    activity: &Activity,
    academic_year: &AcademicYear,
) -> Result<(NaiveDate, NaiveDate), AssignmentError> {
    let start = normalize(&activity.start_date, academic_year).map_err(AssignmentError::StartDate)?;
    let end = normalize(&activity.end_date, academic_year).map_err(AssignmentError::EndDate)?;
    if start > end {
        return Err(AssignmentError::InvertedRange { start, end });
    }
    Ok((start, end))
}

/// Closed-interval overlap of `[start, end]` with the week's seven-day span.
pub fn overlaps(week: &WeekDescriptor, start: NaiveDate, end: NaiveDate) -> bool {
    start <= week.end_date() && end >= week.start_date
}

/// One enriched instance per non-vacation week overlapping the activity, in
/// index order. An empty result for a parsed activity marks it as orphaned.
pub fn assign(
    activity: &Activity,
    index: &WeekIndex,
    academic_year: &AcademicYear,
) -> Result<Vec<EnrichedActivityInstance>, AssignmentError> {
    let (start, end) = activity_span(activity, academic_year)?;

    Ok(index
        .teaching_weeks()
        .filter(|week| overlaps(week, start, end))
        .map(|week| EnrichedActivityInstance {
            activity: activity.clone(),
            semester: week.semester,
            week_code: week.week_code.clone(),
            week_label: week.week_label.clone(),
            week_start: week.start_date,
            starts_on: start,
            ends_on: end,
        })
        .collect())
}

/// Whether `instance` carries the tags of `week`.
pub fn is_tagged_with(instance: &EnrichedActivityInstance, week: &WeekDescriptor) -> bool {
    instance.semester == week.semester
        && instance.week_start == week.start_date
        && instance.week_code == week.week_code
        && instance.week_label == week.week_label
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaarplan_models::weeks::{Semester, WeekRow};
    use std::collections::BTreeMap;

    fn activity(start: &str, end: &str) -> Activity {
        Activity {
            id: Default::default(),
            title: "Project".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            start_time: None,
            end_time: None,
            role: None,
            subjects: BTreeMap::new(),
            phases: Default::default(),
            processes: BTreeMap::new(),
            deadline: None,
            description: None,
            location: None,
        }
    }

    fn index(rows: &[(&str, &str)]) -> WeekIndex {
        let rows: Vec<WeekRow> = rows.iter().map(|(l, d)| WeekRow::new(*l, *d)).collect();
        WeekIndex::build(&rows, &AcademicYear::new(2025))
    }

    fn codes(instances: &[EnrichedActivityInstance]) -> Vec<&str> {
        instances.iter().map(|i| i.week_code.as_str()).collect()
    }

    #[test]
    fn test_start_on_last_day_of_week_is_assigned() {
        let index = index(&[("1.1", "1-sep"), ("1.2", "8-sep")]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("7-sep", "7-sep"), &index, &year).unwrap();
        assert_eq!(codes(&result), vec!["1.1"]);
    }

    #[test]
    fn test_end_before_week_start_is_not_assigned() {
        let index = index(&[("1.2", "8-sep")]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("1-sep", "7-sep"), &index, &year).unwrap();
        assert!(result.is_empty());
        let touching = assign(&activity("1-sep", "8-sep"), &index, &year).unwrap();
        assert_eq!(codes(&touching), vec!["1.2"]);
    }

    #[test]
    fn test_spans_three_consecutive_weeks() {
        let index = index(&[
            ("Semester 1", ""),
            ("1.1", "1-sep"),
            ("1.2", "8-sep"),
            ("1.3", "15-sep"),
            ("1.4", "22-sep"),
        ]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("3-sep", "16-sep"), &index, &year).unwrap();
        assert_eq!(codes(&result), vec!["1.1", "1.2", "1.3"]);
        assert!(result.iter().all(|i| i.semester == Semester::First));
    }

    #[test]
    fn test_vacation_week_never_receives_assignment() {
        let index = index(&[("1.1", "1-sep"), ("Herfstvakantie", "8-sep"), ("1.2", "15-sep")]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("3-sep", "16-sep"), &index, &year).unwrap();
        assert_eq!(codes(&result), vec!["1.1", "1.2"]);
    }

    #[test]
    fn test_crossing_semester_boundary_tags_each_instance() {
        let index = index(&[
            ("Semester 1", ""),
            ("1.10", "26-jan"),
            ("Semester 2", ""),
            ("2.1", "2-feb"),
        ]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("30-jan", "3-feb"), &index, &year).unwrap();
        let tags: Vec<(u8, &str)> = result
            .iter()
            .map(|i| (i.semester.number(), i.week_code.as_str()))
            .collect();
        assert_eq!(tags, vec![(1, "1.10"), (2, "2.1")]);
    }

    #[test]
    fn test_overlapping_weeks_are_not_deduplicated() {
        let index = index(&[("1.1", "1-sep"), ("1.1b", "3-sep")]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("4-sep", "4-sep"), &index, &year).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_unparseable_dates_fail() {
        let index = index(&[("1.1", "1-sep")]);
        let year = AcademicYear::new(2025);
        assert!(matches!(
            assign(&activity("1-foo", "2-sep"), &index, &year),
            Err(AssignmentError::StartDate(_))
        ));
        assert!(matches!(
            assign(&activity("1-sep", "31-sep"), &index, &year),
            Err(AssignmentError::EndDate(_))
        ));
    }

    #[test]
    fn test_inverted_range_fails() {
        let index = index(&[("1.1", "1-sep")]);
        let year = AcademicYear::new(2025);
        assert!(matches!(
            assign(&activity("5-sep", "2-sep"), &index, &year),
            Err(AssignmentError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_instances_carry_normalized_dates() {
        let index = index(&[("2.1", "2-feb")]);
        let year = AcademicYear::new(2025);
        let result = assign(&activity("3-feb", "4-feb"), &index, &year).unwrap();
        assert_eq!(result[0].starts_on, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        assert_eq!(result[0].week_start, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
        assert_eq!(result[0].activity.title, "Project");
    }
}
