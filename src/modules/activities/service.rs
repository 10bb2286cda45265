use std::collections::BTreeSet;

use jaarplan_core::AppError;
use jaarplan_db::{ACTIVITIES, DocumentStore};
use tracing::{info, instrument};

use crate::metrics::track_import;
use crate::modules::activities::model::{Activity, ImportResponse};
use crate::modules::calendar::projection::CalendarProjection;

/// Distinct subject keys outside the known subjects, logged once per import.
fn custom_subjects(activities: &[Activity]) -> Vec<String> {
    let keys: BTreeSet<&str> = activities
        .iter()
        .flat_map(Activity::custom_subject_keys)
        .collect();
    if !keys.is_empty() {
        info!(keys = ?keys, "Import carries custom subject keys");
    }
    keys.into_iter().map(str::to_owned).collect()
}

pub struct ActivityService;

impl ActivityService {
    #[instrument(skip(store))]
    pub async fn list(store: &DocumentStore) -> Result<Vec<Activity>, AppError> {
        Ok(store.read_collection(ACTIVITIES).await?)
    }

    /// Replaces every stored activity and waits for the recomputed calendar.
    #[instrument(skip(store, projection, activities), fields(count = activities.len()))]
    pub async fn replace(
        store: &DocumentStore,
        projection: &CalendarProjection,
        activities: Vec<Activity>,
    ) -> Result<ImportResponse, AppError> {
        store.replace_collection(ACTIVITIES, &activities).await?;
        track_import(ACTIVITIES, activities.len());

        let view = projection.refresh().await?;
        info!(
            activities = activities.len(),
            revision = view.revision,
            "Activities imported"
        );

        Ok(ImportResponse {
            stored: activities.len(),
            revision: view.revision,
            custom_subjects: custom_subjects(&activities),
        })
    }

    #[instrument(skip(store, projection, activity), fields(title = %activity.title))]
    pub async fn append(
        store: &DocumentStore,
        projection: &CalendarProjection,
        activity: Activity,
    ) -> Result<ImportResponse, AppError> {
        store.append(ACTIVITIES, std::slice::from_ref(&activity)).await?;
        track_import(ACTIVITIES, 1);

        let view = projection.refresh().await?;
        Ok(ImportResponse {
            stored: store.count(ACTIVITIES).await?,
            revision: view.revision,
            custom_subjects: custom_subjects(std::slice::from_ref(&activity)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(subjects: &[(&str, bool)]) -> Activity {
        Activity {
            id: Default::default(),
            title: "Les".to_string(),
            start_date: "2-sep".to_string(),
            end_date: "2-sep".to_string(),
            start_time: None,
            end_time: None,
            role: None,
            subjects: subjects.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            phases: Default::default(),
            processes: Default::default(),
            deadline: None,
            description: None,
            location: None,
        }
    }

    #[test]
    fn test_custom_subjects_are_distinct_and_sorted() {
        let activities = [
            activity(&[("stage", true), ("bvp", true)]),
            activity(&[("Afstuderen", false), ("stage", false)]),
        ];
        assert_eq!(custom_subjects(&activities), vec!["Afstuderen", "stage"]);
        assert!(custom_subjects(&[activity(&[("ipl", true)])]).is_empty());
    }
}
