//! Generated activities spread over the teaching weeks.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use fake::faker::lorem::en::{Sentence, Word};
use fake::{Fake, Faker};
use jaarplan_engine::format_token;
use jaarplan_models::activities::{Activity, HARD_DEADLINE_MARKER, KnownSubject, Phases};
use jaarplan_models::ids::ActivityId;
use jaarplan_models::weeks::WeekDescriptor;
use rayon::prelude::*;

use super::models::{SEED_LOCATIONS, SEED_PROCESSES, SEED_ROLES};

const TITLE_PREFIXES: [&str; 8] = [
    "Kick-off",
    "Intervisie",
    "Toets",
    "Inleveren",
    "Workshop",
    "Studiedag",
    "Beoordelingsgesprek",
    "Teamoverleg",
];

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items[(0..items.len()).fake::<usize>()]
}

/// One in `n` chance.
fn one_in(n: usize) -> bool {
    (0..n).fake::<usize>() == 0
}

fn generate_activity(start: NaiveDate) -> Activity {
    let end = start + Days::new((0..10u64).fake::<u64>());
    let word: String = Word().fake();
    let hour = (8..16u32).fake::<u32>();

    let subjects: BTreeMap<String, bool> = KnownSubject::ALL
        .iter()
        .map(|subject| (subject.key().to_string(), one_in(3)))
        .collect();
    let processes: BTreeMap<String, bool> = SEED_PROCESSES
        .iter()
        .filter(|_| one_in(3))
        .map(|process| (process.to_string(), true))
        .collect();
    let phases = if one_in(2) {
        Phases::default()
    } else {
        Phases {
            p: Faker.fake(),
            h1: Faker.fake(),
            h2h3: Faker.fake(),
        }
    };

    Activity {
        id: ActivityId::new(),
        title: format!("{} {}", pick(&TITLE_PREFIXES), word),
        start_date: format_token(start),
        end_date: format_token(end),
        start_time: Some(format!("{hour:02}:00")),
        end_time: Some(format!("{:02}:30", hour + 1)),
        role: Some(pick(&SEED_ROLES).to_string()),
        subjects,
        phases,
        processes,
        deadline: one_in(6).then(|| HARD_DEADLINE_MARKER.to_string()),
        description: one_in(2).then(|| Sentence(3..8).fake()),
        location: Some(pick(&SEED_LOCATIONS).to_string()),
    }
}

/// Generates activities in parallel using Rayon. Every activity starts in a
/// teaching week of `weeks`.
pub fn generate_activities(count: usize, weeks: &[WeekDescriptor]) -> Vec<Activity> {
    let teaching: Vec<NaiveDate> = weeks
        .iter()
        .filter(|week| !week.is_vacation)
        .map(|week| week.start_date)
        .collect();
    if teaching.is_empty() {
        return Vec::new();
    }

    (0..count)
        .into_par_iter()
        .map(|_| {
            let monday = teaching[(0..teaching.len()).fake::<usize>()];
            generate_activity(monday + Days::new((0..5u64).fake::<u64>()))
        })
        .collect()
}
