//! A json solution format.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/formats/solution_test.rs"]
mod solution_test;

use cpsearch::utils::GenericError;
use dispatch_core::models::{Optimality, Problem, Solution, Stop};
use dispatch_core::solver::{Infeasibility, Outcome};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// A status of the solve run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolveStatus {
    /// Solution is found and proven to be optimal.
    Optimal,
    /// Solution is found, but the time limit was reached before optimality was proven.
    Feasible,
    /// There is no solution.
    Infeasible,
    /// Time limit was reached before any solution was found.
    Timeout,
}

/// A scheduled job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Job id.
    pub job_id: String,
    /// Start time within the working window.
    pub start_time: i64,
    /// End time.
    pub end_time: i64,
    /// Travel distance from the previous stop.
    pub distance: i64,
}

/// A technician's tour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    /// Technician id.
    pub technician_id: String,
    /// Visited jobs in order.
    pub activities: Vec<Activity>,
    /// Total distance including the way back to home base.
    pub distance: i64,
    /// Total duration of the jobs.
    pub utilization: i64,
}

/// Search statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    /// Total distance.
    pub distance: i64,
    /// Total utilization.
    pub utilization: i64,
    /// Objective value.
    pub objective: f64,
    /// Amount of explored search nodes.
    pub nodes: u64,
    /// Search duration in milliseconds.
    pub duration: u128,
}

/// A solution output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionDef {
    /// Status of the run.
    pub status: SolveStatus,
    /// Solution statistics, when solution is found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Statistic>,
    /// Non empty tours.
    pub tours: Vec<Tour>,
    /// Ids of jobs which no technician can do.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassignable: Vec<String>,
}

/// Creates a solution output from the solver outcome.
pub fn create_solution_def(problem: &Problem, outcome: &Outcome) -> SolutionDef {
    match outcome {
        Outcome::Solved(solution) => {
            let status = match solution.optimality {
                Optimality::Proven => SolveStatus::Optimal,
                Optimality::NotProven => SolveStatus::Feasible,
            };

            SolutionDef {
                status,
                statistic: Some(Statistic {
                    distance: solution.total_distance,
                    utilization: solution.total_utilization,
                    objective: solution.objective_value,
                    nodes: solution.statistics.nodes,
                    duration: solution.statistics.elapsed_millis,
                }),
                tours: create_tours(problem, solution),
                unassignable: vec![],
            }
        }
        Outcome::Infeasible(infeasibility) => SolutionDef {
            status: SolveStatus::Infeasible,
            statistic: None,
            tours: vec![],
            unassignable: match infeasibility {
                Infeasibility::NoEligibleTechnician { job_ids } => job_ids.clone(),
                Infeasibility::Proven => vec![],
            },
        },
        Outcome::Timeout => {
            SolutionDef { status: SolveStatus::Timeout, statistic: None, tours: vec![], unassignable: vec![] }
        }
    }
}

fn create_tours(problem: &Problem, solution: &Solution) -> Vec<Tour> {
    solution
        .routes
        .iter()
        .filter(|route| !route.is_empty())
        .map(|route| {
            let activities = route
                .legs
                .iter()
                .filter_map(|leg| match leg.to {
                    Stop::Job(job) => solution.entry(job).map(|entry| Activity {
                        job_id: entry.job_id.clone(),
                        start_time: entry.start_time,
                        end_time: entry.end_time(),
                        distance: leg.distance,
                    }),
                    Stop::Home => None,
                })
                .collect::<Vec<_>>();

            Tour {
                technician_id: problem.technicians()[route.technician].id.clone(),
                utilization: route.jobs().map(|job| problem.jobs()[job].duration).sum(),
                distance: route.distance(),
                activities,
            }
        })
        .collect()
}

/// Writes solution output as json.
pub fn write_solution<W: Write>(writer: BufWriter<W>, problem: &Problem, outcome: &Outcome) -> Result<(), GenericError> {
    serde_json::to_writer_pretty(writer, &create_solution_def(problem, outcome))
        .map_err(|err| format!("cannot write solution: '{err}'").into())
}

/// Deserializes solution output from json.
pub fn deserialize_solution<R: Read>(reader: BufReader<R>) -> Result<SolutionDef, GenericError> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize solution: '{err}'").into())
}
