//! Fake calendar data for development databases.

pub mod activities;
pub mod models;
pub mod weeks;

use std::time::Instant;

use jaarplan_db::{ACTIVITIES, DocumentStore, WEEKS};
use jaarplan_engine::{AcademicYear, WeekIndex};

pub use activities::generate_activities;
pub use models::{SeedConfig, SeedSummary};
pub use weeks::generate_week_rows;

/// Seeds week rows and activities for one academic year.
///
/// When appending, the stored weeks are kept and only activities are added.
pub async fn seed_all(
    store: &DocumentStore,
    config: &SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🗓️  Seeding academic year {}/{}...",
        config.first_year,
        config.first_year + 1
    );

    let rows = generate_week_rows(config.first_year, config.weeks_per_semester);
    let index = WeekIndex::build(&rows, &AcademicYear::new(config.first_year));
    let activities = generate_activities(config.activities, index.weeks());

    let summary = if config.replace {
        store.replace_collection(WEEKS, &rows).await?;
        println!("   ✓ Stored {} week rows", rows.len());
        let revision = store.replace_collection(ACTIVITIES, &activities).await?;
        SeedSummary {
            week_rows: rows.len(),
            activities: activities.len(),
            revision,
        }
    } else {
        let revision = store.append(ACTIVITIES, &activities).await?;
        SeedSummary {
            week_rows: 0,
            activities: activities.len(),
            revision,
        }
    };

    println!(
        "   ✓ Stored {} activities in {:?}",
        summary.activities,
        start_time.elapsed()
    );
    Ok(summary)
}

/// Removes both collections.
pub async fn clear_all(store: &DocumentStore) -> Result<(), Box<dyn std::error::Error>> {
    store.clear(ACTIVITIES).await?;
    store.clear(WEEKS).await?;
    println!("🧹 Cleared activities and weeks");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_then_append() {
        let store = DocumentStore::in_memory();
        let config = SeedConfig::new(2025).with_weeks(6).with_activities(20);

        let summary = seed_all(&store, &config).await.unwrap();
        assert_eq!(summary.activities, 20);
        assert_eq!(store.count(WEEKS).await.unwrap(), summary.week_rows);

        let appended = seed_all(&store, &config.clone().with_activities(5).appending())
            .await
            .unwrap();
        assert_eq!(appended.week_rows, 0);
        assert_eq!(store.count(ACTIVITIES).await.unwrap(), 25);

        clear_all(&store).await.unwrap();
        assert_eq!(store.count(ACTIVITIES).await.unwrap(), 0);
    }
}
