//! Plain-text renderings of a computed calendar.

use std::fmt::Write;

use jaarplan_engine::Calendar;
use jaarplan_models::calendar::ActiveFilterSelection;

/// One line per week: code, start date, semester, vacation flag.
pub fn render_week_index(calendar: &Calendar) -> String {
    let mut out = String::new();
    for week in calendar.weeks() {
        let _ = writeln!(
            out,
            "{:<16} {}  semester {}{}",
            week.week_code,
            week.start_date,
            week.semester,
            if week.is_vacation { "  (vakantie)" } else { "" }
        );
    }
    for dropped in calendar.dropped_weeks() {
        let _ = writeln!(
            out,
            "⚠️  row {} `{}` / `{}` dropped: {}",
            dropped.position, dropped.label, dropped.start_date, dropped.reason
        );
    }
    out
}

/// Per-week instance counts for `selection` followed by data-integrity warnings.
pub fn render_report(calendar: &Calendar, selection: &ActiveFilterSelection) -> String {
    let mut out = String::new();
    let mut total = 0;

    for bucket in calendar.by_week(selection) {
        total += bucket.instances.len();
        if bucket.week.is_vacation {
            let _ = writeln!(out, "{:<16} -", bucket.week.week_code);
            continue;
        }
        let _ = writeln!(
            out,
            "{:<16} {:>3}",
            bucket.week.week_code,
            bucket.instances.len()
        );
    }
    let _ = writeln!(out, "Total instances: {total}");

    for orphan in calendar.orphans() {
        let _ = writeln!(
            out,
            "⚠️  orphaned: {} ({} .. {})",
            orphan.title, orphan.start_date, orphan.end_date
        );
    }
    for dropped in calendar.dropped_activities() {
        let _ = writeln!(out, "⚠️  dropped: {} ({})", dropped.title, dropped.reason);
    }
    for skipped in calendar.undecodable_documents() {
        let _ = writeln!(
            out,
            "⚠️  undecodable: {} #{} ({})",
            skipped.collection, skipped.position, skipped.reason
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaarplan_engine::AcademicYear;
    use jaarplan_models::activities::Activity;
    use jaarplan_models::calendar::{FilterDimension, UndecodableDocument};
    use jaarplan_models::weeks::WeekRow;

    fn activity(title: &str, start: &str, end: &str, role: &str) -> Activity {
        Activity {
            id: Default::default(),
            title: title.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            start_time: None,
            end_time: None,
            role: Some(role.to_string()),
            subjects: Default::default(),
            phases: Default::default(),
            processes: Default::default(),
            deadline: None,
            description: None,
            location: None,
        }
    }

    fn calendar() -> Calendar {
        let weeks = vec![
            WeekRow::new("Semester 1", ""),
            WeekRow::new("1.1", "1-sep"),
            WeekRow::new("Herfstvakantie", "8-sep"),
            WeekRow::new("1.2", "15-sep"),
            WeekRow::new("1.3", "32-sep"),
        ];
        let activities = vec![
            activity("Kick-off", "2-sep", "2-sep", "Docent"),
            activity("Project", "3-sep", "16-sep", "Studenten"),
            activity("Zomer", "1-aug", "2-aug", "Docent"),
        ];
        Calendar::build(&activities, &weeks, &AcademicYear::new(2025))
    }

    #[test]
    fn test_week_index_lists_vacation_and_dropped_rows() {
        let rendered = render_week_index(&calendar());
        assert!(rendered.contains("(vakantie)"));
        assert!(rendered.contains("row 4 `1.3`"));
    }

    #[test]
    fn test_report_counts_filtered_instances() {
        let selection = ActiveFilterSelection::new().with(FilterDimension::Role, ["docent"]);
        let rendered = render_report(&calendar(), &selection);
        assert!(rendered.contains("Total instances: 1"));
        assert!(rendered.contains("orphaned: Zomer"));

        let everything = render_report(&calendar(), &ActiveFilterSelection::new());
        assert!(everything.contains("Total instances: 3"));
    }

    #[test]
    fn test_report_lists_undecodable_documents() {
        let calendar = calendar().with_undecodable_documents(vec![UndecodableDocument {
            collection: "activities".to_string(),
            position: 2,
            id: Some("row-17".to_string()),
            reason: "invalid type: string \"row-17\"".to_string(),
        }]);
        let rendered = render_report(&calendar, &ActiveFilterSelection::new());
        assert!(rendered.contains("undecodable: activities #2"));
    }
}
