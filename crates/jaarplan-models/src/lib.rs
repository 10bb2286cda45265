//! # Jaarplan Models
//!
//! Domain models and DTOs for the Jaarplan calendar API.
//!
//! # Modules
//!
//! - [`activities`]: Activities as stored and imported
//! - [`weeks`]: Raw week rows, semesters and normalized week descriptors
//! - [`calendar`]: Enriched instances, filter selections and calendar responses
//! - [`ids`]: Typed document identifiers

pub mod activities;
pub mod calendar;
pub mod ids;
pub mod weeks;

// Re-export commonly used types at crate root for convenience
pub use activities::{Activity, ImportActivitiesDto, ImportResponse, KnownSubject, Phases};
pub use calendar::{
    ActiveFilterSelection, CalendarQuery, CalendarResponse, CalendarWarnings,
    CalendarWeeksResponse, CurrentWeekResponse, DateQuery, DeadlineEntry, DeadlineQuery, DeadlinesResponse,
    DimensionOptions, DroppedActivity, EnrichedActivityInstance, FilterDimension, FilterOption,
    FilterOptionsResponse, OrphanedActivity, OrphansResponse, UndecodableDocument, WeekBucket,
};
pub use ids::ActivityId;
pub use weeks::{
    DroppedWeekRow, ImportWeeksDto, Semester, WeekDescriptor, WeekIndexResponse, WeekRow,
};
