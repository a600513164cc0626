#[cfg(test)]
#[path = "../../tests/unit/heuristics/round_robin_test.rs"]
mod round_robin_test;

use super::*;
use chrono::Days;

/// Rotates over resources giving every resource one job per day starting from the first date.
/// Skills are ignored. A job which would land after the last date of its resource is skipped,
/// but the rotation still moves on.
#[derive(Default)]
pub struct RoundRobinScheduler {}

impl AutoScheduler for RoundRobinScheduler {
    fn schedule(&self, request: &AssignmentRequest) -> GenericResult<Vec<(Event, EventAssignment)>> {
        check_request(request)?;

        let mut next_days = vec![Some(request.date_range.start_date); request.resources.len()];

        Ok(request
            .job_ids
            .iter()
            .enumerate()
            .filter_map(|(idx, job_id)| {
                let resource_idx = idx % request.resources.len();
                let date = next_days[resource_idx].filter(|&date| date <= request.date_range.end_date)?;

                next_days[resource_idx] = date.checked_add_days(Days::new(1));
                Some(create_pair(job_id, &request.resources[resource_idx], date))
            })
            .collect())
    }
}
