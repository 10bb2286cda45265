use axum::{Json, extract::State, http::StatusCode};
use jaarplan_core::AppError;
use tracing::{info, instrument};

use crate::middleware::auth::RequireCalendarImport;
use crate::modules::activities::model::{Activity, ImportActivitiesDto, ImportResponse};
use crate::modules::activities::service::ActivityService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the stored activities as imported
#[utoipa::path(
    get,
    path = "/api/activities",
    summary = "List activities",
    responses(
        (status = 200, description = "Stored activities in collection order", body = Vec<Activity>)
    ),
    tag = "Activities"
)]
#[instrument(skip(state))]
pub async fn get_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = ActivityService::list(&state.store).await?;
    Ok(Json(activities))
}

/// Replace the whole activities collection
#[utoipa::path(
    put,
    path = "/api/activities",
    summary = "Import activities",
    request_body = ImportActivitiesDto,
    responses(
        (status = 200, description = "Collection replaced", body = ImportResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires calendar:import permission"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Activities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn import_activities(
    State(state): State<AppState>,
    RequireCalendarImport(auth_user): RequireCalendarImport,
    ValidatedJson(dto): ValidatedJson<ImportActivitiesDto>,
) -> Result<Json<ImportResponse>, AppError> {
    info!(subject = auth_user.subject(), "Importing activities");
    let response =
        ActivityService::replace(&state.store, &state.projection, dto.activities).await?;
    Ok(Json(response))
}

/// Append a single activity
#[utoipa::path(
    post,
    path = "/api/activities",
    summary = "Add activity",
    request_body = Activity,
    responses(
        (status = 201, description = "Activity stored", body = ImportResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires calendar:import permission"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Activities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, activity))]
pub async fn create_activity(
    State(state): State<AppState>,
    RequireCalendarImport(_auth_user): RequireCalendarImport,
    ValidatedJson(activity): ValidatedJson<Activity>,
) -> Result<(StatusCode, Json<ImportResponse>), AppError> {
    let response = ActivityService::append(&state.store, &state.projection, activity).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
