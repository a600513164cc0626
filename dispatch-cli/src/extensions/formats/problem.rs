//! A json problem format.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/formats/problem_test.rs"]
mod problem_test;

use cpsearch::utils::GenericError;
use dispatch_core::models::{DistanceMatrix, Job, Problem, Technician, ValidationError};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// A job definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDef {
    /// Job id.
    pub id: String,
    /// Location index in the distance matrix.
    pub location: usize,
    /// Duration in time units.
    pub duration: i64,
    /// A required skill.
    pub skill: String,
}

/// A technician definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianDef {
    /// Technician id.
    pub id: String,
    /// Technician skills.
    pub skills: Vec<String>,
    /// Total working time budget.
    pub max_hours: i64,
    /// Home base location index in the distance matrix.
    pub home_base: usize,
}

/// A problem definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDef {
    /// Jobs to assign.
    pub jobs: Vec<JobDef>,
    /// Available technicians.
    pub technicians: Vec<TechnicianDef>,
    /// A square matrix of travel distances between locations.
    pub distances: Vec<Vec<i64>>,
}

/// Deserializes problem definition from json.
pub fn deserialize_problem<R: Read>(reader: BufReader<R>) -> Result<ProblemDef, GenericError> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize problem: '{err}'").into())
}

/// Serializes problem definition as json.
pub fn serialize_problem<W: Write>(writer: BufWriter<W>, problem: &ProblemDef) -> Result<(), GenericError> {
    serde_json::to_writer_pretty(writer, problem).map_err(|err| format!("cannot serialize problem: '{err}'").into())
}

/// Reads and validates a problem from json.
pub fn read_problem<R: Read>(reader: BufReader<R>) -> Result<Problem, GenericError> {
    deserialize_problem(reader).and_then(|problem| create_problem(&problem))
}

/// Creates a validated problem from its definition.
pub fn create_problem(problem: &ProblemDef) -> Result<Problem, GenericError> {
    let jobs = problem.jobs.iter().map(|job| Job::new(job.id.as_str(), job.location, job.duration, job.skill.as_str()));
    let technicians = problem.technicians.iter().map(|technician| {
        Technician::new(technician.id.as_str(), technician.skills.clone(), technician.max_hours, technician.home_base)
    });

    Problem::new(jobs.collect(), technicians.collect(), DistanceMatrix::new(problem.distances.clone())).map_err(
        |errors| {
            format!("problem has validation errors:\n{}", ValidationError::format_many(errors.as_slice(), "\n")).into()
        },
    )
}
