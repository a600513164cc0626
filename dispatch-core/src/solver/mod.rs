//! Contains the solver which formulates the problem, runs the search and reconstructs the
//! solution from raw search values.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

mod config;
pub use self::config::*;

mod reconstruction;
pub use self::reconstruction::reconstruct;

use crate::formulation::{Formulation, check_value_magnitudes};
use crate::models::*;
use cpsearch::prelude::*;
use cpsearch::utils::{CompositeQuota, Parallelism};
use std::fmt;
use std::sync::Arc;

/// Specifies why the problem has no solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Infeasibility {
    /// Some jobs cannot be done by any technician as nobody has the required skill.
    NoEligibleTechnician {
        /// Ids of such jobs.
        job_ids: Vec<String>,
    },
    /// The search space is exhausted without any solution.
    Proven,
}

/// A result of solving a valid problem.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A solution is found.
    Solved(Solution),
    /// There is no solution.
    Infeasible(Infeasibility),
    /// The time limit was reached before any solution was found.
    Timeout,
}

impl Outcome {
    /// Returns solution, if found.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// An error which prevents solving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// Input is not valid.
    InvalidInput(Vec<ValidationError>),
    /// Solved values cannot be turned into routes.
    ReconstructionInconsistency {
        /// An id of the technician whose route is inconsistent, if known.
        technician: Option<String>,
        /// A description of the problem.
        reason: String,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidInput(errors) => {
                write!(f, "invalid input: {}", ValidationError::format_many(errors.as_slice(), "\n"))
            }
            SolveError::ReconstructionInconsistency { technician: Some(technician), reason } => {
                write!(f, "inconsistent route of technician '{technician}': {reason}")
            }
            SolveError::ReconstructionInconsistency { technician: None, reason } => {
                write!(f, "inconsistent solution: {reason}")
            }
        }
    }
}

impl std::error::Error for SolveError {}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SolveError::InvalidInput(errors)
    }
}

/// Solves technician dispatch problems with the given search engine.
pub struct Solver {
    config: SolverConfig,
    environment: Environment,
    engine: Arc<dyn SearchEngine + Send + Sync>,
}

impl Solver {
    /// Creates a new instance of `Solver` with the default branch-and-bound search.
    pub fn new(config: SolverConfig, environment: Environment) -> Self {
        Self { config, environment, engine: Arc::new(BranchAndBound::default()) }
    }

    /// Replaces the search engine.
    pub fn with_engine(mut self, engine: Arc<dyn SearchEngine + Send + Sync>) -> Self {
        self.engine = engine;
        self
    }

    /// Solves the problem.
    pub fn solve(&self, problem: &Problem) -> Result<Outcome, SolveError> {
        let timer = Timer::start();
        let weight = self.config.validate()?;
        check_value_magnitudes(problem, self.config.working_window, &weight).map_err(|err| vec![err])?;
        let logger = self.environment.logger.clone();

        if let Some(infeasibility) = presolve(problem) {
            logger(&format!("[{}ms] presolve detected infeasibility: {infeasibility:?}", timer.elapsed_millis()));
            return Ok(Outcome::Infeasible(infeasibility));
        }

        let formulation = Formulation::new(problem, self.config.working_window, weight);
        logger(&format!(
            "[{}ms] model created: {} jobs, {} technicians, {} variables, {} constraints",
            timer.elapsed_millis(),
            problem.jobs().len(),
            problem.technicians().len(),
            formulation.model.var_count(),
            formulation.model.constraint_count()
        ));

        let result = self.engine.search(&formulation.model, &self.create_environment());

        let optimality = match (result.status, result.values.as_ref()) {
            (SearchStatus::Optimal, Some(_)) => Optimality::Proven,
            (SearchStatus::Feasible, Some(_)) => Optimality::NotProven,
            (SearchStatus::Infeasible, _) => return Ok(Outcome::Infeasible(Infeasibility::Proven)),
            (SearchStatus::Unknown, _) => return Ok(Outcome::Timeout),
            (status, None) => {
                return Err(SolveError::ReconstructionInconsistency {
                    technician: None,
                    reason: format!("search reported {status:?} without values"),
                });
            }
        };
        let values = result.values.as_deref().unwrap_or_default();

        let solution = create_solution(problem, &formulation, values, optimality, &result.statistics)?;
        if result.objective.is_some_and(|objective| objective != solution.objective) {
            return Err(SolveError::ReconstructionInconsistency {
                technician: None,
                reason: format!("objective mismatch: search {:?}, routes {}", result.objective, solution.objective),
            });
        }

        logger(&format!(
            "[{}ms] solution reconstructed: objective {:.2}, distance {}, utilization {}, optimality {:?}",
            timer.elapsed_millis(),
            solution.objective_value,
            solution.total_distance,
            solution.total_utilization,
            solution.optimality
        ));

        Ok(Outcome::Solved(solution))
    }

    fn create_environment(&self) -> Environment {
        let mut environment = self.environment.clone();

        if let Some(max_time) = self.config.max_time {
            let time_quota: Arc<dyn Quota + Send + Sync> = Arc::new(TimeQuota::new(max_time));
            environment.quota = Some(match environment.quota.take() {
                Some(quota) => Arc::new(CompositeQuota::new(vec![quota, time_quota])),
                None => time_quota,
            });
        }

        if let Some(parallelism) = self.config.parallelism {
            environment.parallelism = Parallelism::new(parallelism);
        }

        environment
    }
}

/// Detects jobs which no technician can do.
fn presolve(problem: &Problem) -> Option<Infeasibility> {
    let job_ids = (0..problem.jobs().len())
        .filter(|&job| problem.eligible_technicians(job).next().is_none())
        .map(|job| problem.jobs()[job].id.clone())
        .collect::<Vec<_>>();

    if job_ids.is_empty() { None } else { Some(Infeasibility::NoEligibleTechnician { job_ids }) }
}

fn create_solution(
    problem: &Problem,
    formulation: &Formulation,
    values: &[i64],
    optimality: Optimality,
    statistics: &SearchStatistics,
) -> Result<Solution, SolveError> {
    let (schedule, routes) = reconstruct(problem, &formulation.variables, values)?;

    let total_distance = routes.iter().map(|route| route.distance()).sum::<i64>();
    let total_utilization = schedule.iter().map(|entry| entry.duration).sum::<i64>();
    let objective = formulation.weight.objective(total_utilization, total_distance);

    Ok(Solution {
        schedule,
        routes,
        total_distance,
        total_utilization,
        objective,
        objective_value: formulation.weight.unscale(objective),
        optimality,
        statistics: statistics.into(),
    })
}
