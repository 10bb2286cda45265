use jaarplan_config::{CalendarConfig, CorsConfig, JwtConfig, ServerConfig};
use jaarplan_db::{DocumentStore, StoreError};
use jaarplan_engine::AcademicYear;
use tracing::warn;

use crate::modules::calendar::projection::CalendarProjection;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: DocumentStore,
    pub projection: CalendarProjection,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub calendar_config: CalendarConfig,
}

impl AppState {
    pub fn new(
        store: DocumentStore,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        calendar_config: CalendarConfig,
    ) -> Self {
        let projection = CalendarProjection::new(
            store.clone(),
            AcademicYear::new(calendar_config.first_academic_year),
        );
        Self {
            store,
            projection,
            jwt_config,
            cors_config,
            calendar_config,
        }
    }
}

/// Connects the configured store and computes the first projection.
pub async fn init_app_state(server_config: &ServerConfig) -> Result<AppState, StoreError> {
    let store = match &server_config.database_url {
        Some(url) => jaarplan_db::connect(url).await?,
        None => {
            warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            DocumentStore::in_memory()
        }
    };

    let state = AppState::new(
        store,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        CalendarConfig::from_env(),
    );
    state.projection.refresh().await?;
    Ok(state)
}
