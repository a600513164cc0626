#[cfg(test)]
#[path = "../../tests/unit/formulation/bounds_test.rs"]
mod bounds_test;

use super::DistanceWeight;
use crate::models::{Problem, ValidationError};

/// A limit for any coefficient sum, objective or time bound of the model. It leaves room for the
/// objective cut and propagation slacks which add a few such values together.
pub const MAX_MAGNITUDE: i64 = i64::MAX / 4;

/// Checks that the integer program of the problem can be built and searched without overflow:
/// the objective weighted by the distance weight and the time bounds have to stay within
/// [`MAX_MAGNITUDE`].
pub fn check_value_magnitudes(
    problem: &Problem,
    working_window: i64,
    weight: &DistanceWeight,
) -> Result<(), ValidationError> {
    let limit = MAX_MAGNITUDE as i128;
    let (numerator, denominator) = (weight.numerator() as i128, weight.denominator() as i128);
    let job_count = problem.jobs().len();

    let route_bound = |technician: usize, job: usize| {
        let distance = (0..job_count)
            .filter(|&next| next != job)
            .map(|next| problem.job_distance(job, next) as i128)
            .chain([problem.home_to_job_distance(technician, job) as i128])
            .chain([problem.job_to_home_distance(job, technician) as i128])
            .fold(0_i128, i128::saturating_add);

        (denominator * problem.jobs()[job].duration as i128).saturating_add(numerator.saturating_mul(distance))
    };

    let objective_bound = (0..problem.technicians().len())
        .flat_map(|technician| (0..job_count).map(move |job| (technician, job)))
        .map(|(technician, job)| route_bound(technician, job))
        .fold(0_i128, i128::saturating_add);

    let max_duration = problem.jobs().iter().map(|job| job.duration as i128).max().unwrap_or(0);
    let max_distance = problem.distances().rows().iter().flatten().map(|&value| value as i128).max().unwrap_or(0);
    let time_bound = 2 * working_window as i128 + max_duration + max_distance;

    let mut causes = Vec::new();
    if objective_bound > limit {
        causes.push(format!("objective bound {objective_bound}"));
    }
    if time_bound > limit {
        causes.push(format!("time bound {time_bound}"));
    }

    if causes.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(
            "E1010",
            format!("values are too large for exact integer arithmetic: {}", causes.join(", ")),
            format!("reduce durations, distances, working window or distance weight to keep bounds within {limit}"),
        ))
    }
}
