//! Calendar projection models: enriched instances, filter selections, and the
//! response shapes of the calendar endpoints.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use jaarplan_core::serde::{deserialize_comma_list, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::activities::Activity;
use crate::ids::ActivityId;
use crate::weeks::{DroppedWeekRow, Semester, WeekDescriptor};

/// One (activity, week) assignment.
///
/// Built fresh on every recomputation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrichedActivityInstance {
    #[serde(flatten)]
    pub activity: Activity,
    /// Semester of the matching week
    #[schema(value_type = u8, example = 1)]
    pub semester: Semester,
    /// Code of the matching week
    pub week_code: String,
    /// Label of the matching week
    pub week_label: String,
    /// First day of the matching week
    pub week_start: NaiveDate,
    /// Normalized activity start
    pub starts_on: NaiveDate,
    /// Normalized activity end
    pub ends_on: NaiveDate,
}

/// Independent filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Role,
    Phase,
    Subject,
    Process,
    Semester,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Role,
        FilterDimension::Phase,
        FilterDimension::Subject,
        FilterDimension::Process,
        FilterDimension::Semester,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FilterDimension::Role => "role",
            FilterDimension::Phase => "phase",
            FilterDimension::Subject => "subject",
            FilterDimension::Process => "process",
            FilterDimension::Semester => "semester",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter dimension: {s}"))
    }
}

static NO_SELECTION: BTreeSet<String> = BTreeSet::new();

/// Selected option values per dimension. An empty set means the dimension does
/// not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSelection {
    selections: BTreeMap<FilterDimension, BTreeSet<String>>,
}

impl ActiveFilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert) for several values.
    pub fn with<I, S>(mut self, dimension: FilterDimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(dimension, value);
        }
        self
    }

    /// Adds a value; blank values are ignored.
    pub fn insert(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return;
        }
        self.selections.entry(dimension).or_default().insert(value);
    }

    pub fn selected(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        self.selections.get(&dimension).unwrap_or(&NO_SELECTION)
    }

    pub fn is_selected(&self, dimension: FilterDimension, value: &str) -> bool {
        self.selected(dimension).contains(value)
    }

    /// Copy of this selection with one more option selected.
    pub fn with_option(&self, dimension: FilterDimension, value: &str) -> Self {
        let mut next = self.clone();
        next.insert(dimension, value);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.selections.values().all(BTreeSet::is_empty)
    }
}

/// Query parameters of the calendar endpoints. Each dimension takes a
/// comma-separated list (`?role=docent,studenten&semester=1`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CalendarQuery {
    /// Selected roles
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub role: Vec<String>,
    /// Selected phases (`algemeen`, `p`, `h1`, `h2h3`)
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub phase: Vec<String>,
    /// Selected subjects
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub subject: Vec<String>,
    /// Selected processes
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub process: Vec<String>,
    /// Selected semesters (`1`, `2`)
    #[serde(default, deserialize_with = "deserialize_comma_list")]
    pub semester: Vec<String>,
}

impl From<CalendarQuery> for ActiveFilterSelection {
    fn from(query: CalendarQuery) -> Self {
        ActiveFilterSelection::new()
            .with(FilterDimension::Role, query.role)
            .with(FilterDimension::Phase, query.phase)
            .with(FilterDimension::Subject, query.subject)
            .with(FilterDimension::Process, query.process)
            .with(FilterDimension::Semester, query.semester)
    }
}

/// Activity whose dates parse but that overlaps no non-vacation week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrphanedActivity {
    pub id: ActivityId,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
}

/// Activity excluded because a date could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DroppedActivity {
    pub id: ActivityId,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// Stored document that no longer decodes into its collection's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UndecodableDocument {
    pub collection: String,
    /// Zero-based position in stored order
    pub position: usize,
    /// `id` field of the raw document, when it has a string one
    pub id: Option<String>,
    pub reason: String,
}

/// Data-integrity warnings of one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarWarnings {
    pub orphans: Vec<OrphanedActivity>,
    pub dropped_activities: Vec<DroppedActivity>,
    pub dropped_weeks: Vec<DroppedWeekRow>,
    pub undecodable_documents: Vec<UndecodableDocument>,
}

/// Filtered calendar.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarResponse {
    pub instances: Vec<EnrichedActivityInstance>,
    /// Number of instances passing the filters
    pub total: usize,
    /// Filters after unknown options were dropped
    #[schema(value_type = Object)]
    pub applied_filters: ActiveFilterSelection,
    pub warnings: CalendarWarnings,
    pub revision: u64,
}

/// Filtered instances of one week.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeekBucket {
    pub week: WeekDescriptor,
    pub instances: Vec<EnrichedActivityInstance>,
}

/// Filtered calendar grouped per week in index order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarWeeksResponse {
    pub weeks: Vec<WeekBucket>,
    #[schema(value_type = Object)]
    pub applied_filters: ActiveFilterSelection,
    pub revision: u64,
}

/// One selectable filter option with its availability and result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    /// Value used in the query string
    pub value: String,
    /// Display label (source casing for roles)
    pub label: String,
    pub selected: bool,
    /// Whether selecting this option would leave at least one instance
    pub available: bool,
    /// Instances matching with this option selected
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DimensionOptions {
    pub dimension: FilterDimension,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilterOptionsResponse {
    pub dimensions: Vec<DimensionOptions>,
    /// Instances matching the current selection
    pub matching: usize,
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrphansResponse {
    pub orphans: Vec<OrphanedActivity>,
    pub dropped_activities: Vec<DroppedActivity>,
    pub undecodable_documents: Vec<UndecodableDocument>,
    pub revision: u64,
}

/// Query for date-anchored endpoints; defaults to today.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DateQuery {
    /// ISO date (`2025-09-15`)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentWeekResponse {
    pub date: NaiveDate,
    /// `None` when the date falls outside every week
    pub week: Option<WeekDescriptor>,
}

/// A hard deadline, listed once per activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeadlineEntry {
    pub id: ActivityId,
    pub title: String,
    pub due_on: NaiveDate,
    pub end_time: Option<String>,
    pub role: Option<String>,
    /// First week the activity was assigned to
    pub week_code: String,
}

/// Query of the deadlines endpoint; `from` defaults to today.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DeadlineQuery {
    /// ISO date (`2025-09-15`)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeadlinesResponse {
    pub from: NaiveDate,
    pub deadlines: Vec<DeadlineEntry>,
}
