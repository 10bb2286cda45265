//! Configuration for generated calendar data.

/// Roles that generated activities are spread over.
pub const SEED_ROLES: [&str; 6] = [
    "Studenten",
    "Docent",
    "CC",
    "Werkplekbegeleider",
    "Studenten; Docent",
    "Docent en CC",
];

/// Process keys used by generated activities.
pub const SEED_PROCESSES: [&str; 4] = ["intake", "begeleiding", "beoordeling", "evaluatie"];

/// Location names for generated activities.
pub const SEED_LOCATIONS: [&str; 4] = ["Aula", "Lokaal 2.14", "Online", "Stageschool"];

/// How much data `seed` generates.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// Calendar year in which the seeded academic year starts
    pub first_year: i32,
    /// Teaching weeks per semester
    pub weeks_per_semester: usize,
    /// Activities spread over the teaching weeks
    pub activities: usize,
    /// Replace existing collections instead of appending activities
    pub replace: bool,
}

impl SeedConfig {
    pub fn new(first_year: i32) -> Self {
        Self {
            first_year,
            weeks_per_semester: 18,
            activities: 100,
            replace: true,
        }
    }

    pub fn with_weeks(mut self, weeks_per_semester: usize) -> Self {
        self.weeks_per_semester = weeks_per_semester;
        self
    }

    pub fn with_activities(mut self, activities: usize) -> Self {
        self.activities = activities;
        self
    }

    pub fn appending(mut self) -> Self {
        self.replace = false;
        self
    }
}

/// What a seeding run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub week_rows: usize,
    pub activities: usize,
    pub revision: u64,
}
