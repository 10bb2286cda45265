use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use jaarplan_models::activities::{Activity, ImportActivitiesDto, ImportResponse, Phases};
use jaarplan_models::calendar::{
    CalendarResponse, CalendarWarnings, CalendarWeeksResponse, CurrentWeekResponse,
    DeadlineEntry, DeadlinesResponse, DimensionOptions, DroppedActivity, EnrichedActivityInstance,
    FilterDimension, FilterOption, FilterOptionsResponse, OrphanedActivity, OrphansResponse,
    UndecodableDocument, WeekBucket,
};
use jaarplan_models::weeks::{
    DroppedWeekRow, ImportWeeksDto, WeekDescriptor, WeekIndexResponse, WeekRow,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::activities::controller::get_activities,
        crate::modules::activities::controller::import_activities,
        crate::modules::activities::controller::create_activity,
        crate::modules::weeks::controller::get_week_rows,
        crate::modules::weeks::controller::import_weeks,
        crate::modules::weeks::controller::get_week_index,
        crate::modules::calendar::controller::get_calendar,
        crate::modules::calendar::controller::get_calendar_weeks,
        crate::modules::calendar::controller::get_filter_options,
        crate::modules::calendar::controller::get_orphans,
        crate::modules::calendar::controller::get_current_week,
        crate::modules::calendar::controller::get_deadlines,
    ),
    components(
        schemas(
            Activity,
            Phases,
            ImportActivitiesDto,
            ImportResponse,
            WeekRow,
            ImportWeeksDto,
            WeekDescriptor,
            DroppedWeekRow,
            WeekIndexResponse,
            EnrichedActivityInstance,
            FilterDimension,
            FilterOption,
            DimensionOptions,
            FilterOptionsResponse,
            OrphanedActivity,
            DroppedActivity,
            UndecodableDocument,
            CalendarWarnings,
            CalendarResponse,
            WeekBucket,
            CalendarWeeksResponse,
            OrphansResponse,
            CurrentWeekResponse,
            DeadlineEntry,
            DeadlinesResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Activities", description = "Raw activities collection"),
        (name = "Weeks", description = "Raw week rows and the normalized week index"),
        (name = "Calendar", description = "Filtered academic-year calendar")
    ),
    info(
        title = "Jaarplan API",
        version = "0.1.0",
        description = "Academic-year activity calendar: week index, week assignment and role-aware filtering.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
