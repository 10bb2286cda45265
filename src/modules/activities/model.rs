//! Activity models and DTOs, re-exported from `jaarplan-models`.

pub use jaarplan_models::activities::*;
