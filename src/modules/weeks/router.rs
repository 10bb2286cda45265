use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_week_index, get_week_rows, import_weeks};

/// Routes: GET /, PUT /, GET /index
pub fn init_weeks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_week_rows).put(import_weeks))
        .route("/index", get(get_week_index))
}
