#[cfg(test)]
#[path = "../../tests/unit/formulation/objective_test.rs"]
mod objective_test;

use super::VariableModel;
use crate::models::Problem;
use cpsearch::model::LinearExpr;
use cpsearch::utils::GenericResult;

const WEIGHT_SCALE: i64 = 10_000;

/// A weight of travel distance in the objective kept as an exact fraction, so the objective can
/// be optimized in integer arithmetic: `denominator * utilization - numerator * distance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceWeight {
    numerator: i64,
    denominator: i64,
}

impl Default for DistanceWeight {
    fn default() -> Self {
        Self { numerator: 1, denominator: 10 }
    }
}

impl DistanceWeight {
    /// Creates a weight from a non-negative fraction.
    pub fn new(numerator: i64, denominator: i64) -> GenericResult<Self> {
        if numerator < 0 || denominator <= 0 {
            return Err(format!("invalid distance weight fraction: {numerator}/{denominator}").into());
        }

        let divisor = gcd(numerator, denominator);

        Ok(Self { numerator: numerator / divisor, denominator: denominator / divisor })
    }

    /// Creates a weight from a float with four decimal digits of precision.
    pub fn from_f64(weight: f64) -> GenericResult<Self> {
        if !weight.is_finite() || weight < 0. || weight > 1e9 {
            return Err(format!("distance weight must be finite, non-negative and not too large, got: {weight}").into());
        }

        Self::new((weight * WEIGHT_SCALE as f64).round() as i64, WEIGHT_SCALE)
    }

    /// Returns numerator.
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Returns denominator.
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns integer objective of given utilization and distance.
    pub fn objective(&self, utilization: i64, distance: i64) -> i64 {
        self.denominator * utilization - self.numerator * distance
    }

    /// Converts integer objective back to its real value.
    pub fn unscale(&self, objective: i64) -> f64 {
        objective as f64 / self.denominator as f64
    }
}

/// Creates the objective to maximize: weighted job durations of assigned jobs minus weighted
/// travel costs of used arcs and home base legs.
pub fn create_objective(problem: &Problem, variables: &VariableModel, weight: &DistanceWeight) -> LinearExpr {
    let mut objective = LinearExpr::new();

    (0..variables.technician_count()).for_each(|technician| {
        problem.jobs().iter().enumerate().for_each(|(job, job_def)| {
            objective.add_term(weight.denominator * job_def.duration, variables.assign(job, technician));
            objective.add_term(
                -weight.numerator * problem.home_to_job_distance(technician, job),
                variables.starts_route(technician, job),
            );
            objective.add_term(
                -weight.numerator * problem.job_to_home_distance(job, technician),
                variables.ends_route(technician, job),
            );

            (0..variables.job_count()).for_each(|next| {
                if let Some(arc) = variables.arc(technician, job, next) {
                    objective.add_term(-weight.numerator * problem.job_distance(job, next), arc);
                }
            });
        });
    });

    objective
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs().max(1) } else { gcd(b, a % b) }
}
