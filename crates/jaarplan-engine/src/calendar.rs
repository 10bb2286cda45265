//! One full recomputation of the calendar from an activities/weeks snapshot.
//!
//! [`Calendar::build`] is a pure function of its inputs. The result is never
//! updated in place; a new snapshot means a new `Calendar`.

use std::collections::HashSet;

use chrono::NaiveDate;
use jaarplan_models::activities::Activity;
use jaarplan_models::calendar::{
    ActiveFilterSelection, CalendarWarnings, DeadlineEntry, DimensionOptions, DroppedActivity,
    EnrichedActivityInstance, OrphanedActivity, UndecodableDocument, WeekBucket,
};
use jaarplan_models::weeks::{DroppedWeekRow, WeekDescriptor, WeekRow};
use tracing::{info, instrument, warn};

use crate::assignment::{assign, is_tagged_with};
use crate::dates::AcademicYear;
use crate::filter;
use crate::options::{FilterCatalog, option_stats};
use crate::week_index::WeekIndex;

/// Enriched instances plus the diagnostics of the pass that produced them.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    index: WeekIndex,
    instances: Vec<EnrichedActivityInstance>,
    orphans: Vec<OrphanedActivity>,
    dropped: Vec<DroppedActivity>,
    undecodable: Vec<UndecodableDocument>,
    catalog: FilterCatalog,
}

impl Calendar {
    #[instrument(skip_all, fields(activities = activities.len(), week_rows = weeks.len()))]
    pub fn build(activities: &[Activity], weeks: &[WeekRow], academic_year: &AcademicYear) -> Self {
        let index = WeekIndex::build(weeks, academic_year);
        let mut per_activity = Vec::new();
        let mut orphans = Vec::new();
        let mut dropped = Vec::new();

        for activity in activities {
            match assign(activity, &index, academic_year) {
                Ok(assigned) if assigned.is_empty() => orphans.push(OrphanedActivity {
                    id: activity.id,
                    title: activity.title.clone(),
                    start_date: activity.start_date.clone(),
                    end_date: activity.end_date.clone(),
                }),
                Ok(assigned) => per_activity.push(assigned.into_iter().peekable()),
                Err(err) => dropped.push(DroppedActivity {
                    id: activity.id,
                    title: activity.title.clone(),
                    start_date: activity.start_date.clone(),
                    end_date: activity.end_date.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        // Each assignment is already in index order; walk the index once and
        // take the activities' instances for each week in activity order.
        let mut instances = Vec::new();
        for week in index.teaching_weeks() {
            for assigned in per_activity.iter_mut() {
                if let Some(instance) = assigned.next_if(|i| is_tagged_with(i, week)) {
                    instances.push(instance);
                }
            }
        }

        if !orphans.is_empty() || !dropped.is_empty() || !index.dropped().is_empty() {
            warn!(
                orphans = orphans.len(),
                dropped_activities = dropped.len(),
                dropped_weeks = index.dropped().len(),
                "Calendar built with data-integrity warnings"
            );
        }
        info!(
            weeks = index.len(),
            instances = instances.len(),
            "Calendar recomputed"
        );

        Self {
            catalog: FilterCatalog::from_activities(activities),
            index,
            instances,
            orphans,
            dropped,
            undecodable: Vec::new(),
        }
    }

    /// Attaches stored documents that were skipped before the build.
    pub fn with_undecodable_documents(mut self, documents: Vec<UndecodableDocument>) -> Self {
        if !documents.is_empty() {
            warn!(count = documents.len(), "Calendar built with undecodable documents skipped");
        }
        self.undecodable = documents;
        self
    }

    pub fn weeks(&self) -> &[WeekDescriptor] {
        self.index.weeks()
    }

    pub fn week_index(&self) -> &WeekIndex {
        &self.index
    }

    pub fn instances(&self) -> &[EnrichedActivityInstance] {
        &self.instances
    }

    pub fn orphans(&self) -> &[OrphanedActivity] {
        &self.orphans
    }

    pub fn dropped_activities(&self) -> &[DroppedActivity] {
        &self.dropped
    }

    pub fn dropped_weeks(&self) -> &[DroppedWeekRow] {
        self.index.dropped()
    }

    pub fn undecodable_documents(&self) -> &[UndecodableDocument] {
        &self.undecodable
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn warnings(&self) -> CalendarWarnings {
        CalendarWarnings {
            orphans: self.orphans.clone(),
            dropped_activities: self.dropped.clone(),
            dropped_weeks: self.index.dropped().to_vec(),
            undecodable_documents: self.undecodable.clone(),
        }
    }

    /// Selection with unknown options removed.
    pub fn sanitize(&self, selection: &ActiveFilterSelection) -> ActiveFilterSelection {
        self.catalog.sanitize(selection)
    }

    /// Instances passing `selection`. Unknown options are dropped first, so
    /// a raw query selection is accepted as is.
    pub fn filter(&self, selection: &ActiveFilterSelection) -> Vec<&EnrichedActivityInstance> {
        filter::apply(&self.instances, &self.sanitize(selection))
    }

    /// Filtered instances grouped per week, every week of the index included.
    pub fn by_week(&self, selection: &ActiveFilterSelection) -> Vec<WeekBucket> {
        let filtered = self.filter(selection);
        self.index
            .weeks()
            .iter()
            .map(|week| WeekBucket {
                week: week.clone(),
                instances: filtered
                    .iter()
                    .filter(|instance| is_tagged_with(instance, week))
                    .map(|instance| (*instance).clone())
                    .collect(),
            })
            .collect()
    }

    pub fn option_stats(&self, selection: &ActiveFilterSelection) -> Vec<DimensionOptions> {
        option_stats(&self.catalog, &self.instances, &self.sanitize(selection))
    }

    pub fn week_containing(&self, date: NaiveDate) -> Option<&WeekDescriptor> {
        self.index.week_containing(date)
    }

    /// Hard deadlines ending on or after `from`, once per activity, ordered by
    /// due date.
    pub fn deadlines(&self, from: NaiveDate) -> Vec<DeadlineEntry> {
        let mut seen = HashSet::new();
        let mut entries: Vec<DeadlineEntry> = self
            .instances
            .iter()
            .filter(|instance| instance.activity.is_hard_deadline() && instance.ends_on >= from)
            .filter(|instance| seen.insert(instance.activity.id))
            .map(|instance| DeadlineEntry {
                id: instance.activity.id,
                title: instance.activity.title.clone(),
                due_on: instance.ends_on,
                end_time: instance.activity.end_time.clone(),
                role: instance.activity.role.clone(),
                week_code: instance.week_code.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.due_on.cmp(&b.due_on).then_with(|| a.title.cmp(&b.title)));
        entries
    }
}
