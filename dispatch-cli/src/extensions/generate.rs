//! Generates random problems.

#[cfg(test)]
#[path = "../../tests/unit/extensions/generate_test.rs"]
mod generate_test;

use super::formats::problem::{JobDef, ProblemDef, TechnicianDef};
use cpsearch::utils::GenericError;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::ops::RangeInclusive;

const GRID_SIZE: i64 = 60;
const DURATION_RANGE: RangeInclusive<i64> = 15..=90;
const MAX_HOURS_RANGE: RangeInclusive<i64> = 120..=480;
const EXTRA_SKILL_PROBABILITY: f64 = 0.3;

/// Generates a random problem on a grid with manhattan distances. Jobs get the first locations,
/// technicians' home bases follow them. Every job requires a skill which at least one technician
/// holds.
pub fn generate_problem(
    jobs_size: usize,
    technicians_size: usize,
    skills_size: usize,
    seed: Option<u64>,
) -> Result<ProblemDef, GenericError> {
    if skills_size == 0 {
        return Err("skills size should be positive".into());
    }

    if jobs_size > 0 && technicians_size == 0 {
        return Err("cannot generate jobs without technicians".into());
    }

    let mut rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    let skills = (1..=skills_size).map(|idx| format!("skill{idx}")).collect::<Vec<_>>();

    let technicians = (0..technicians_size)
        .map(|idx| {
            let main_skill = &skills[idx % skills_size];
            let mut own_skills = vec![main_skill.clone()];
            for skill in skills.iter().filter(|&skill| skill != main_skill) {
                if rng.gen_bool(EXTRA_SKILL_PROBABILITY) {
                    own_skills.push(skill.clone());
                }
            }

            TechnicianDef {
                id: format!("tech{}", idx + 1),
                skills: own_skills,
                max_hours: rng.gen_range(MAX_HOURS_RANGE),
                home_base: jobs_size + idx,
            }
        })
        .collect::<Vec<_>>();

    let held_skills = skills
        .iter()
        .filter(|&skill| technicians.iter().any(|technician| technician.skills.contains(skill)))
        .collect::<Vec<_>>();

    let jobs = (0..jobs_size)
        .map(|idx| {
            let skill = held_skills.choose(&mut rng).map(|skill| skill.to_string()).unwrap_or_default();

            JobDef { id: format!("job{}", idx + 1), location: idx, duration: rng.gen_range(DURATION_RANGE), skill }
        })
        .collect();

    let coordinates = (0..jobs_size + technicians_size)
        .map(|_| (rng.gen_range(0..=GRID_SIZE), rng.gen_range(0..=GRID_SIZE)))
        .collect::<Vec<_>>();
    let distances = coordinates
        .iter()
        .map(|&(x1, y1)| coordinates.iter().map(|&(x2, y2)| (x1 - x2).abs() + (y1 - y2).abs()).collect())
        .collect();

    Ok(ProblemDef { jobs, technicians, distances })
}
