//! Activity models and DTOs.
//!
//! An activity is a planned event or deadline as it arrives from the field-mapping
//! step: dates are still raw `DD-MMM` / `DD-MMM-YYYY` tokens and the category
//! flags are open string-keyed maps. Normalization happens in the engine.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::ActivityId;

/// Deadline marker for hard, action-required deadlines.
pub const HARD_DEADLINE_MARKER: &str = "v";

/// Phase flags of an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Phases {
    #[serde(default)]
    pub p: bool,
    #[serde(default)]
    pub h1: bool,
    #[serde(default)]
    pub h2h3: bool,
}

impl Phases {
    /// True when no phase flag is set ("algemeen").
    pub fn is_general(&self) -> bool {
        !(self.p || self.h1 || self.h2h3)
    }
}

/// Baseline subject keys every dataset is expected to use.
///
/// Subjects are stored as an open map so datasets can add custom keys; this enum
/// only documents the known set and lets importers flag unexpected keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KnownSubject {
    Waarderen,
    Ipl,
    Bvp,
    Pzw,
}

impl KnownSubject {
    pub const ALL: [KnownSubject; 4] = [
        KnownSubject::Waarderen,
        KnownSubject::Ipl,
        KnownSubject::Bvp,
        KnownSubject::Pzw,
    ];

    pub fn key(self) -> &'static str {
        match self {
            KnownSubject::Waarderen => "waarderen",
            KnownSubject::Ipl => "ipl",
            KnownSubject::Bvp => "bvp",
            KnownSubject::Pzw => "pzw",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// Activity as stored in the `activities` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Activity {
    /// Stable document id, generated on import when absent
    #[serde(default)]
    pub id: ActivityId,
    /// Title (non-empty)
    #[validate(custom(function = "validate_not_blank", message = "title must not be empty"))]
    pub title: String,
    /// Raw start date token, e.g. `15-sep` or `3-feb-2026`
    #[validate(length(min = 1, message = "start_date is required"))]
    pub start_date: String,
    /// Raw end date token
    #[validate(length(min = 1, message = "end_date is required"))]
    pub end_date: String,
    /// Optional start time (`HH:MM`)
    #[validate(custom(function = "validate_clock_time", message = "start_time must be HH:MM"))]
    pub start_time: Option<String>,
    /// Optional end time (`HH:MM`)
    #[validate(custom(function = "validate_clock_time", message = "end_time must be HH:MM"))]
    pub end_time: Option<String>,
    /// Free-text role field, possibly multi-valued (`Docent; CC en Studenten`)
    pub role: Option<String>,
    /// Subject flags keyed by subject id
    #[serde(default)]
    pub subjects: BTreeMap<String, bool>,
    /// Phase flags
    #[serde(default)]
    pub phases: Phases,
    /// Process flags keyed by process id (staff-only dimension)
    #[serde(default)]
    pub processes: BTreeMap<String, bool>,
    /// Deadline marker; `"v"` denotes a hard deadline
    pub deadline: Option<String>,
    /// Optional description shown with the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Activity {
    /// Whether the deadline field marks a hard, action-required deadline.
    pub fn is_hard_deadline(&self) -> bool {
        self.deadline
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case(HARD_DEADLINE_MARKER))
    }

    /// Subject keys that are not part of [`KnownSubject`].
    pub fn custom_subject_keys(&self) -> Vec<&str> {
        self.subjects
            .keys()
            .filter(|key| KnownSubject::from_key(key).is_none())
            .map(String::as_str)
            .collect()
    }
}

/// DTO for replacing the whole `activities` collection.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImportActivitiesDto {
    #[validate(nested)]
    pub activities: Vec<Activity>,
}

/// Response after an import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    /// Number of documents now stored in the collection
    pub stored: usize,
    /// Store revision after the write
    pub revision: u64,
    /// Subject keys in the written documents that are not known subjects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_subjects: Vec<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("clock_time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> Activity {
        Activity {
            id: ActivityId::from_u128(7),
            title: "Toetsweek".to_string(),
            start_date: "15-sep".to_string(),
            end_date: "19-sep".to_string(),
            start_time: Some("09:00".to_string()),
            end_time: None,
            role: Some("Studenten".to_string()),
            subjects: BTreeMap::from([("bvp".to_string(), true), ("pzw".to_string(), false)]),
            phases: Phases::default(),
            processes: BTreeMap::new(),
            deadline: Some("v".to_string()),
            description: None,
            location: None,
        }
    }

    #[test]
    fn test_valid_activity() {
        assert!(activity().validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut a = activity();
        a.title = "   ".to_string();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_bad_clock_time_rejected() {
        let mut a = activity();
        a.end_time = Some("25:61".to_string());
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_hard_deadline_marker() {
        let mut a = activity();
        assert!(a.is_hard_deadline());
        a.deadline = Some("V ".to_string());
        assert!(a.is_hard_deadline());
        a.deadline = Some("x".to_string());
        assert!(!a.is_hard_deadline());
        a.deadline = None;
        assert!(!a.is_hard_deadline());
    }

    #[test]
    fn test_custom_subject_keys() {
        let mut a = activity();
        a.subjects.insert("stage".to_string(), true);
        assert_eq!(a.custom_subject_keys(), vec!["stage"]);
    }

    #[test]
    fn test_missing_id_is_generated() {
        let json = r#"{"title":"Intro","start_date":"1-sep","end_date":"1-sep"}"#;
        let a: Activity = serde_json::from_str(json).unwrap();
        assert!(!a.id.into_inner().is_nil());
        assert!(a.phases.is_general());
        assert!(a.subjects.is_empty());
    }

    #[test]
    fn test_nested_import_validation() {
        let mut bad = activity();
        bad.title = String::new();
        let dto = ImportActivitiesDto {
            activities: vec![activity(), bad],
        };
        assert!(dto.validate().is_err());
    }
}
