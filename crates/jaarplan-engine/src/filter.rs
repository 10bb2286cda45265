//! Filter predicate over enriched activity instances.
//!
//! Selecting roles does not simply narrow the result. The selection splits into
//! a student branch (`studenten`) and a staff branch (every other role); each
//! branch has its own rules and an instance is kept when any applicable branch
//! accepts it. Without a role selection a fallback branch applies.
//!
//! | branch   | role test                  | semester | phase | subject | process |
//! |----------|----------------------------|----------|-------|---------|---------|
//! | fallback | none                       | yes      | yes   | ignored | yes     |
//! | student  | has `studenten`            | yes      | yes   | yes     | ignored |
//! | staff    | shares a selected role     | yes      | yes   | ignored | yes     |
//!
//! Subject and process are OR across the selected options, phase is AND.

use std::collections::BTreeSet;

use jaarplan_models::calendar::{ActiveFilterSelection, EnrichedActivityInstance, FilterDimension};

use crate::tokenize::{TokenSet, tokenize_opt};

/// Role id of the student branch.
pub const STUDENT_ROLE: &str = "studenten";

/// Phase option matching activities without any phase flag.
pub const PHASE_GENERAL: &str = "algemeen";

/// Phase options in display order.
pub const PHASE_OPTIONS: [&str; 4] = [PHASE_GENERAL, "p", "h1", "h2h3"];

/// One role-conditioned matching path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    /// No role selected
    Fallback,
    /// `studenten` selected
    Student,
    /// Other roles selected (lowercase ids)
    Staff(BTreeSet<String>),
}

impl Branch {
    /// Branches that apply to a selection; the predicate is their union.
    pub fn applicable(selection: &ActiveFilterSelection) -> Vec<Branch> {
        let roles: BTreeSet<String> = selection
            .selected(FilterDimension::Role)
            .iter()
            .map(|role| role.to_lowercase())
            .collect();

        if roles.is_empty() {
            return vec![Branch::Fallback];
        }

        let mut branches = Vec::with_capacity(2);
        if roles.contains(STUDENT_ROLE) {
            branches.push(Branch::Student);
        }
        let staff: BTreeSet<String> = roles.into_iter().filter(|r| r != STUDENT_ROLE).collect();
        if !staff.is_empty() {
            branches.push(Branch::Staff(staff));
        }
        branches
    }

    /// Evaluates this branch alone. `roles` is the tokenized role field.
    pub fn accepts(
        &self,
        instance: &EnrichedActivityInstance,
        roles: &TokenSet,
        selection: &ActiveFilterSelection,
    ) -> bool {
        let shared = semester_matches(instance, selection) && phase_matches(instance, selection);
        match self {
            Branch::Fallback => shared && process_matches(instance, selection),
            Branch::Student => {
                roles.contains(STUDENT_ROLE) && shared && subject_matches(instance, selection)
            }
            Branch::Staff(staff) => {
                roles.intersects(staff) && shared && process_matches(instance, selection)
            }
        }
    }
}

/// Whether `instance` passes the filter selection. The selection must already
/// be sanitized; an unknown semester or role here excludes everything.
pub fn matches(instance: &EnrichedActivityInstance, selection: &ActiveFilterSelection) -> bool {
    let branches = Branch::applicable(selection);
    matches_with(instance, selection, &branches)
}

fn matches_with(
    instance: &EnrichedActivityInstance,
    selection: &ActiveFilterSelection,
    branches: &[Branch],
) -> bool {
    let roles = tokenize_opt(instance.activity.role.as_deref());
    branches
        .iter()
        .any(|branch| branch.accepts(instance, &roles, selection))
}

/// Instances passing the selection, in their original order.
pub fn apply<'a>(
    instances: &'a [EnrichedActivityInstance],
    selection: &ActiveFilterSelection,
) -> Vec<&'a EnrichedActivityInstance> {
    let branches = Branch::applicable(selection);
    instances
        .iter()
        .filter(|instance| matches_with(instance, selection, &branches))
        .collect()
}

/// Number of instances passing the selection.
pub fn count(instances: &[EnrichedActivityInstance], selection: &ActiveFilterSelection) -> usize {
    let branches = Branch::applicable(selection);
    instances
        .iter()
        .filter(|instance| matches_with(instance, selection, &branches))
        .count()
}

pub fn semester_matches(
    instance: &EnrichedActivityInstance,
    selection: &ActiveFilterSelection,
) -> bool {
    let selected = selection.selected(FilterDimension::Semester);
    selected.is_empty() || selected.contains(&instance.semester.to_string())
}

/// AND across selected phase options; unknown options are ignored.
pub fn phase_matches(instance: &EnrichedActivityInstance, selection: &ActiveFilterSelection) -> bool {
    let phases = &instance.activity.phases;
    selection
        .selected(FilterDimension::Phase)
        .iter()
        .all(|option| match option.to_lowercase().as_str() {
            PHASE_GENERAL => phases.is_general(),
            "p" => phases.p,
            "h1" => phases.h1,
            "h2h3" => phases.h2h3,
            _ => true,
        })
}

/// OR across selected subjects.
pub fn subject_matches(
    instance: &EnrichedActivityInstance,
    selection: &ActiveFilterSelection,
) -> bool {
    let selected = selection.selected(FilterDimension::Subject);
    selected.is_empty()
        || selected
            .iter()
            .any(|key| instance.activity.subjects.get(key).copied().unwrap_or(false))
}

/// OR across selected processes.
pub fn process_matches(
    instance: &EnrichedActivityInstance,
    selection: &ActiveFilterSelection,
) -> bool {
    let selected = selection.selected(FilterDimension::Process);
    selected.is_empty()
        || selected
            .iter()
            .any(|key| instance.activity.processes.get(key).copied().unwrap_or(false))
}
