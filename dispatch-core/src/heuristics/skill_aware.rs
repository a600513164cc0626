#[cfg(test)]
#[path = "../../tests/unit/heuristics/skill_aware_test.rs"]
mod skill_aware_test;

use super::*;
use chrono::Days;
use rustc_hash::FxHashMap;

/// Rotates over resources like [`RoundRobinScheduler`](super::RoundRobinScheduler), but starting
/// from the rotation pointer picks the first resource which holds all skills required by the job
/// and still has a free day in the range. Jobs without such resource are left unscheduled.
#[derive(Default)]
pub struct SkillAwareScheduler {}

impl AutoScheduler for SkillAwareScheduler {
    fn schedule(&self, request: &AssignmentRequest) -> GenericResult<Vec<(Event, EventAssignment)>> {
        check_request(request)?;

        let required_skills = request
            .jobs
            .iter()
            .map(|job| (job.id.as_str(), job.required_skills.as_slice()))
            .collect::<FxHashMap<_, _>>();
        let resource_count = request.resources.len();
        let mut next_days = vec![Some(request.date_range.start_date); resource_count];
        let mut pointer = 0;

        Ok(request
            .job_ids
            .iter()
            .filter_map(|job_id| {
                let skills = required_skills.get(job_id.as_str()).copied().unwrap_or_default();

                let resource_idx = (0..resource_count).map(|offset| (pointer + offset) % resource_count).find(|&idx| {
                    let resource = &request.resources[idx];
                    let has_skills = skills.iter().all(|skill| resource.skills.contains(skill));
                    let has_day = next_days[idx].is_some_and(|date| date <= request.date_range.end_date);

                    has_skills && has_day
                })?;

                let date = next_days[resource_idx]?;
                next_days[resource_idx] = date.checked_add_days(Days::new(1));
                pointer = (resource_idx + 1) % resource_count;

                Some(create_pair(job_id, &request.resources[resource_idx], date))
            })
            .collect())
    }
}
