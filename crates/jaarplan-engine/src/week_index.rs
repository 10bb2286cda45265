//! Week Index construction.
//!
//! The `weeks` collection is a flat list of `(label, date)` rows in calendar
//! order. `Semester 1` / `Semester 2` rows switch the semester of every row
//! that follows; header rows and incomplete rows are skipped. The pass is an
//! explicit fold over `(current semester, accumulated weeks)`.

use chrono::NaiveDate;
pub use jaarplan_models::weeks::WeekDescriptor;
use jaarplan_models::weeks::{DroppedWeekRow, Semester, WeekRow};
use tracing::debug;

use crate::dates::{AcademicYear, normalize};

/// Labels of header/placeholder rows that appear in exported sheets.
const HEADER_LABELS: [&str; 5] = ["week", "weken", "weeknummer", "lesweek", "label"];

/// Case-insensitive substrings that mark a week without regular activities.
const VACATION_MARKERS: [&str; 2] = ["vakantie", "afsluiting"];

/// Whether a week label denotes a vacation or closing week.
pub fn is_vacation_label(label: &str) -> bool {
    let label = label.to_lowercase();
    VACATION_MARKERS.iter().any(|marker| label.contains(marker))
}

/// Short week code: the text before the first space when the label contains
/// a `.` (`1.3 toetsweek` → `1.3`), otherwise the whole label.
pub fn week_code(label: &str) -> String {
    let label = label.trim();
    if label.contains('.') {
        label.split(' ').next().unwrap_or(label).to_string()
    } else {
        label.to_string()
    }
}

/// Semester switched to by a sentinel row, if `label` is one.
pub fn semester_sentinel(label: &str) -> Option<Semester> {
    let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.eq_ignore_ascii_case("semester 1") {
        Some(Semester::First)
    } else if normalized.eq_ignore_ascii_case("semester 2") {
        Some(Semester::Second)
    } else {
        None
    }
}

fn is_header_label(label: &str) -> bool {
    HEADER_LABELS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(label.trim()))
}

/// Ordered, normalized academic weeks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekIndex {
    weeks: Vec<WeekDescriptor>,
    dropped: Vec<DroppedWeekRow>,
}

#[derive(Default)]
struct Fold {
    semester: Semester,
    weeks: Vec<WeekDescriptor>,
    dropped: Vec<DroppedWeekRow>,
}

impl WeekIndex {
    /// Builds the index from raw rows. Rows whose date does not normalize are
    /// dropped and reported through [`dropped`](Self::dropped).
    pub fn build(rows: &[WeekRow], academic_year: &AcademicYear) -> Self {
        let folded = rows
            .iter()
            .enumerate()
            .fold(Fold::default(), |mut acc, (position, row)| {
                let label = row.label.trim();
                let date = row.start_date.trim();

                if let Some(semester) = semester_sentinel(label) {
                    acc.semester = semester;
                    return acc;
                }
                if label.is_empty() || date.is_empty() || is_header_label(label) {
                    return acc;
                }

                match normalize(date, academic_year) {
                    Ok(start_date) => acc.weeks.push(WeekDescriptor {
                        week_code: week_code(label),
                        week_label: label.to_string(),
                        start_date,
                        semester: acc.semester,
                        is_vacation: is_vacation_label(label),
                    }),
                    Err(err) => {
                        debug!(position, label, date, error = %err, "Dropping week row");
                        acc.dropped.push(DroppedWeekRow {
                            position,
                            label: label.to_string(),
                            start_date: date.to_string(),
                            reason: err.to_string(),
                        });
                    }
                }
                acc
            });

        Self {
            weeks: folded.weeks,
            dropped: folded.dropped,
        }
    }

    pub fn weeks(&self) -> &[WeekDescriptor] {
        &self.weeks
    }

    pub fn dropped(&self) -> &[DroppedWeekRow] {
        &self.dropped
    }

    /// Weeks that can receive assignments, in index order.
    pub fn teaching_weeks(&self) -> impl Iterator<Item = &WeekDescriptor> {
        self.weeks.iter().filter(|week| !week.is_vacation)
    }

    /// First week (vacation weeks included) whose span contains `date`.
    pub fn week_containing(&self, date: NaiveDate) -> Option<&WeekDescriptor> {
        self.weeks.iter().find(|week| week.contains(date))
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
