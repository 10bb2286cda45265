use chrono::NaiveDate;
use jaarplan_core::AppError;
use jaarplan_models::calendar::{
    ActiveFilterSelection, CalendarResponse, CalendarWeeksResponse, CurrentWeekResponse,
    DeadlinesResponse, FilterOptionsResponse, OrphansResponse,
};
use tracing::instrument;

use super::projection::CalendarView;

/// Parses an optional ISO date, defaulting to `today`.
pub fn parse_date_param(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match value {
        None => Ok(today),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::bad_request(anyhow::anyhow!(
                "Invalid date `{raw}`, expected YYYY-MM-DD"
            ))
        }),
    }
}

pub struct CalendarService;

impl CalendarService {
    #[instrument(skip(view), fields(revision = view.revision))]
    pub fn list(view: &CalendarView, requested: &ActiveFilterSelection) -> CalendarResponse {
        let instances: Vec<_> = view
            .calendar
            .filter(requested)
            .into_iter()
            .cloned()
            .collect();

        CalendarResponse {
            total: instances.len(),
            instances,
            applied_filters: view.calendar.sanitize(requested),
            warnings: view.calendar.warnings(),
            revision: view.revision,
        }
    }

    #[instrument(skip(view), fields(revision = view.revision))]
    pub fn by_week(view: &CalendarView, requested: &ActiveFilterSelection) -> CalendarWeeksResponse {
        CalendarWeeksResponse {
            weeks: view.calendar.by_week(requested),
            applied_filters: view.calendar.sanitize(requested),
            revision: view.revision,
        }
    }

    #[instrument(skip(view), fields(revision = view.revision))]
    pub fn options(view: &CalendarView, requested: &ActiveFilterSelection) -> FilterOptionsResponse {
        FilterOptionsResponse {
            dimensions: view.calendar.option_stats(requested),
            matching: view.calendar.filter(requested).len(),
            revision: view.revision,
        }
    }

    pub fn orphans(view: &CalendarView) -> OrphansResponse {
        OrphansResponse {
            orphans: view.calendar.orphans().to_vec(),
            dropped_activities: view.calendar.dropped_activities().to_vec(),
            undecodable_documents: view.calendar.undecodable_documents().to_vec(),
            revision: view.revision,
        }
    }

    pub fn current_week(view: &CalendarView, date: NaiveDate) -> CurrentWeekResponse {
        CurrentWeekResponse {
            date,
            week: view.calendar.week_containing(date).cloned(),
        }
    }

    pub fn deadlines(view: &CalendarView, from: NaiveDate) -> DeadlinesResponse {
        DeadlinesResponse {
            from,
            deadlines: view.calendar.deadlines(from),
        }
    }
}
