use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_activity, get_activities, import_activities};

/// Routes: GET /, PUT /, POST /
pub fn init_activities_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_activities)
            .put(import_activities)
            .post(create_activity),
    )
}
