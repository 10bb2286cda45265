use jaarplan_core::AppError;
use jaarplan_db::{DocumentStore, WEEKS};
use tracing::{info, instrument};

use crate::metrics::track_import;
use crate::modules::activities::model::ImportResponse;
use crate::modules::calendar::projection::{CalendarProjection, CalendarView};
use crate::modules::weeks::model::{WeekIndexResponse, WeekRow};

pub struct WeekService;

impl WeekService {
    #[instrument(skip(store))]
    pub async fn list_rows(store: &DocumentStore) -> Result<Vec<WeekRow>, AppError> {
        Ok(store.read_collection(WEEKS).await?)
    }

    #[instrument(skip(store, projection, rows), fields(count = rows.len()))]
    pub async fn replace(
        store: &DocumentStore,
        projection: &CalendarProjection,
        rows: Vec<WeekRow>,
    ) -> Result<ImportResponse, AppError> {
        store.replace_collection(WEEKS, &rows).await?;
        track_import(WEEKS, rows.len());

        let view = projection.refresh().await?;
        info!(
            rows = rows.len(),
            weeks = view.calendar.weeks().len(),
            dropped = view.calendar.dropped_weeks().len(),
            "Week rows imported"
        );

        Ok(ImportResponse {
            stored: rows.len(),
            revision: view.revision,
            custom_subjects: Vec::new(),
        })
    }

    pub fn index(view: &CalendarView) -> WeekIndexResponse {
        WeekIndexResponse {
            weeks: view.calendar.weeks().to_vec(),
            dropped: view.calendar.dropped_weeks().to_vec(),
            revision: view.revision,
        }
    }
}
