use axum::{Json, extract::State};
use jaarplan_core::AppError;
use tracing::instrument;

use crate::middleware::auth::RequireCalendarImport;
use crate::modules::activities::model::ImportResponse;
use crate::modules::weeks::model::{ImportWeeksDto, WeekIndexResponse, WeekRow};
use crate::modules::weeks::service::WeekService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Raw week rows, sentinels and vacations included
#[utoipa::path(
    get,
    path = "/api/weeks",
    summary = "List week rows",
    responses(
        (status = 200, description = "Stored week rows in collection order", body = Vec<WeekRow>)
    ),
    tag = "Weeks"
)]
#[instrument(skip(state))]
pub async fn get_week_rows(State(state): State<AppState>) -> Result<Json<Vec<WeekRow>>, AppError> {
    Ok(Json(WeekService::list_rows(&state.store).await?))
}

/// Replace the whole weeks collection
#[utoipa::path(
    put,
    path = "/api/weeks",
    summary = "Import week rows",
    request_body = ImportWeeksDto,
    responses(
        (status = 200, description = "Collection replaced", body = ImportResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires calendar:import permission"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn import_weeks(
    State(state): State<AppState>,
    RequireCalendarImport(_auth_user): RequireCalendarImport,
    ValidatedJson(dto): ValidatedJson<ImportWeeksDto>,
) -> Result<Json<ImportResponse>, AppError> {
    let response = WeekService::replace(&state.store, &state.projection, dto.weeks).await?;
    Ok(Json(response))
}

/// Normalized Week Index
#[utoipa::path(
    get,
    path = "/api/weeks/index",
    summary = "Get week index",
    responses(
        (status = 200, description = "Normalized weeks and the rows that were dropped", body = WeekIndexResponse)
    ),
    tag = "Weeks"
)]
#[instrument(skip(state))]
pub async fn get_week_index(
    State(state): State<AppState>,
) -> Result<Json<WeekIndexResponse>, AppError> {
    let view = state.projection.current();
    Ok(Json(WeekService::index(&view)))
}
