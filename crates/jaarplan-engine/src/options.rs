//! Data-driven filter options, selection sanitizing, and per-option statistics.
//!
//! Availability and counts are never computed by separate logic: each option is
//! evaluated by running the filter predicate with the option added to the
//! current selection.

use std::collections::BTreeSet;

use jaarplan_models::activities::{Activity, KnownSubject};
use jaarplan_models::calendar::{
    ActiveFilterSelection, DimensionOptions, EnrichedActivityInstance, FilterDimension,
    FilterOption,
};
use jaarplan_models::weeks::Semester;
use tracing::debug;

use crate::filter::{self, PHASE_OPTIONS};
use crate::tokenize::tokenize_opt;

/// Options available per dimension, derived from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCatalog {
    /// `(id, label)` in first-seen order
    roles: Vec<(String, String)>,
    subjects: BTreeSet<String>,
    processes: BTreeSet<String>,
}

impl FilterCatalog {
    pub fn from_activities<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        let mut catalog = FilterCatalog {
            subjects: KnownSubject::ALL
                .iter()
                .map(|subject| subject.key().to_string())
                .collect(),
            ..Default::default()
        };

        for activity in activities {
            for token in &tokenize_opt(activity.role.as_deref()) {
                if !catalog.roles.iter().any(|(id, _)| *id == token.id) {
                    catalog.roles.push((token.id.clone(), token.label.clone()));
                }
            }
            catalog.subjects.extend(activity.subjects.keys().cloned());
            catalog.processes.extend(activity.processes.keys().cloned());
        }

        catalog
    }

    /// `(value, label)` pairs of one dimension in display order.
    pub fn options(&self, dimension: FilterDimension) -> Vec<(String, String)> {
        match dimension {
            FilterDimension::Role => self.roles.clone(),
            FilterDimension::Phase => PHASE_OPTIONS
                .iter()
                .map(|phase| (phase.to_string(), phase.to_string()))
                .collect(),
            FilterDimension::Subject => self
                .subjects
                .iter()
                .map(|key| (key.clone(), key.clone()))
                .collect(),
            FilterDimension::Process => self
                .processes
                .iter()
                .map(|key| (key.clone(), key.clone()))
                .collect(),
            FilterDimension::Semester => [Semester::First, Semester::Second]
                .iter()
                .map(|s| (s.to_string(), format!("Semester {s}")))
                .collect(),
        }
    }

    /// Canonical form of a selected value, or `None` if the dimension has no
    /// such option.
    pub fn canonical(&self, dimension: FilterDimension, value: &str) -> Option<String> {
        let value = value.trim();
        match dimension {
            FilterDimension::Role => {
                let id = value.to_lowercase();
                self.roles.iter().any(|(known, _)| *known == id).then_some(id)
            }
            FilterDimension::Phase => {
                let phase = value.to_lowercase();
                PHASE_OPTIONS.contains(&phase.as_str()).then_some(phase)
            }
            FilterDimension::Subject => self.subjects.contains(value).then(|| value.to_string()),
            FilterDimension::Process => self.processes.contains(value).then(|| value.to_string()),
            FilterDimension::Semester => value.parse::<Semester>().ok().map(|s| s.to_string()),
        }
    }

    /// Drops selected values that are not options of their dimension.
    pub fn sanitize(&self, selection: &ActiveFilterSelection) -> ActiveFilterSelection {
        let mut sanitized = ActiveFilterSelection::new();
        for dimension in FilterDimension::ALL {
            for value in selection.selected(dimension) {
                match self.canonical(dimension, value) {
                    Some(canonical) => sanitized.insert(dimension, canonical),
                    None => debug!(%dimension, value, "Ignoring unmapped filter option"),
                }
            }
        }
        sanitized
    }
}

/// Availability and count of every option, given an already sanitized selection.
pub fn option_stats(
    catalog: &FilterCatalog,
    instances: &[EnrichedActivityInstance],
    selection: &ActiveFilterSelection,
) -> Vec<DimensionOptions> {
    FilterDimension::ALL
        .into_iter()
        .map(|dimension| DimensionOptions {
            dimension,
            options: catalog
                .options(dimension)
                .into_iter()
                .map(|(value, label)| {
                    let selected = selection.is_selected(dimension, &value);
                    let hypothetical = selection.with_option(dimension, &value);
                    let count = filter::count(instances, &hypothetical);
                    FilterOption {
                        value,
                        label,
                        selected,
                        available: count > 0,
                        count,
                    }
                })
                .collect(),
        })
        .collect()
}
