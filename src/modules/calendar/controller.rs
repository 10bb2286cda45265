use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;
use jaarplan_core::AppError;
use jaarplan_models::calendar::{
    ActiveFilterSelection, CalendarQuery, CalendarResponse, CalendarWeeksResponse,
    CurrentWeekResponse, DateQuery, DeadlineQuery, DeadlinesResponse, FilterOptionsResponse,
    OrphansResponse,
};
use tracing::instrument;

use crate::modules::calendar::service::{CalendarService, parse_date_param};
use crate::state::AppState;

/// Filtered activity instances with data-integrity warnings
#[utoipa::path(
    get,
    path = "/api/calendar",
    summary = "Get calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Filtered activity instances", body = CalendarResponse)
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let view = state.projection.current();
    let selection = ActiveFilterSelection::from(query);
    Ok(Json(CalendarService::list(&view, &selection)))
}

/// Filtered instances grouped per week
#[utoipa::path(
    get,
    path = "/api/calendar/weeks",
    summary = "Get calendar by week",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Every week of the index with its matching instances", body = CalendarWeeksResponse)
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_calendar_weeks(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarWeeksResponse>, AppError> {
    let view = state.projection.current();
    let selection = ActiveFilterSelection::from(query);
    Ok(Json(CalendarService::by_week(&view, &selection)))
}

/// Filter options with availability and counts under the current selection
#[utoipa::path(
    get,
    path = "/api/calendar/options",
    summary = "Get filter options",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Options per filter dimension", body = FilterOptionsResponse)
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_filter_options(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<FilterOptionsResponse>, AppError> {
    let view = state.projection.current();
    let selection = ActiveFilterSelection::from(query);
    Ok(Json(CalendarService::options(&view, &selection)))
}

#[utoipa::path(
    get,
    path = "/api/calendar/orphans",
    summary = "List orphaned and dropped activities",
    responses(
        (status = 200, description = "Activities missing from the calendar", body = OrphansResponse)
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_orphans(State(state): State<AppState>) -> Result<Json<OrphansResponse>, AppError> {
    let view = state.projection.current();
    Ok(Json(CalendarService::orphans(&view)))
}

/// Week containing a date (today when omitted)
#[utoipa::path(
    get,
    path = "/api/calendar/current-week",
    summary = "Get current week",
    params(DateQuery),
    responses(
        (status = 200, description = "Week containing the date, or null", body = CurrentWeekResponse),
        (status = 400, description = "Date is not YYYY-MM-DD")
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_current_week(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CurrentWeekResponse>, AppError> {
    let date = parse_date_param(query.date.as_deref(), Local::now().date_naive())?;
    let view = state.projection.current();
    Ok(Json(CalendarService::current_week(&view, date)))
}

/// Upcoming hard deadlines
#[utoipa::path(
    get,
    path = "/api/calendar/deadlines",
    summary = "List deadlines",
    params(DeadlineQuery),
    responses(
        (status = 200, description = "Hard deadlines ending on or after `from`", body = DeadlinesResponse),
        (status = 400, description = "Date is not YYYY-MM-DD")
    ),
    tag = "Calendar"
)]
#[instrument(skip(state))]
pub async fn get_deadlines(
    State(state): State<AppState>,
    Query(query): Query<DeadlineQuery>,
) -> Result<Json<DeadlinesResponse>, AppError> {
    let from = parse_date_param(query.from.as_deref(), Local::now().date_naive())?;
    let view = state.projection.current();
    Ok(Json(CalendarService::deadlines(&view, from)))
}
