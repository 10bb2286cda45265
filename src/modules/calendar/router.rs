use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_calendar, get_calendar_weeks, get_current_week, get_deadlines, get_filter_options,
    get_orphans,
};

/// Routes: GET /, GET /weeks, GET /options, GET /orphans, GET /current-week, GET /deadlines
pub fn init_calendar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_calendar))
        .route("/weeks", get(get_calendar_weeks))
        .route("/options", get(get_filter_options))
        .route("/orphans", get(get_orphans))
        .route("/current-week", get(get_current_week))
        .route("/deadlines", get(get_deadlines))
}
