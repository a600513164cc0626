#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use super::{ValidationContext, ValidationError};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

/// Represents a field-service job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// A unique job id.
    pub id: String,
    /// An index of the job location in the distance matrix.
    pub location: usize,
    /// Job duration in time units.
    pub duration: i64,
    /// A skill which technician must have to do the job.
    pub skill: String,
}

impl Job {
    /// Creates a new instance of `Job`.
    pub fn new(id: impl Into<String>, location: usize, duration: i64, skill: impl Into<String>) -> Self {
        Self { id: id.into(), location, duration, skill: skill.into() }
    }
}

/// Represents a mobile technician.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Technician {
    /// A unique technician id.
    pub id: String,
    /// Skills of the technician.
    pub skills: Vec<String>,
    /// A maximum amount of working time (sum of assigned job durations).
    pub max_hours: i64,
    /// An index of the home base location in the distance matrix.
    pub home_base: usize,
}

impl Technician {
    /// Creates a new instance of `Technician`.
    pub fn new<S: Into<String>>(id: impl Into<String>, skills: Vec<S>, max_hours: i64, home_base: usize) -> Self {
        Self { id: id.into(), skills: skills.into_iter().map(|skill| skill.into()).collect(), max_hours, home_base }
    }

    /// Returns true if technician has given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|own| own == skill)
    }
}

/// A square table of travel costs between locations, not necessary symmetric.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<i64>>,
}

impl DistanceMatrix {
    /// Creates a new instance of `DistanceMatrix` from rows.
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// Returns amount of locations.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if every row has as many values as there are rows.
    pub fn is_square(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.rows.len())
    }

    /// Returns travel cost from one location to another.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.rows[from][to]
    }

    /// Returns rows of the matrix.
    pub fn rows(&self) -> &[Vec<i64>] {
        self.rows.as_slice()
    }
}

/// A validated technician dispatch problem.
#[derive(Clone, Debug)]
pub struct Problem {
    jobs: Vec<Job>,
    technicians: Vec<Technician>,
    distances: DistanceMatrix,
    eligibility: Vec<FixedBitSet>,
    job_index: FxHashMap<String, usize>,
    technician_index: FxHashMap<String, usize>,
}

impl Problem {
    /// Creates a new problem, returns all validation errors if input is not consistent.
    pub fn new(
        jobs: Vec<Job>,
        technicians: Vec<Technician>,
        distances: DistanceMatrix,
    ) -> Result<Self, Vec<ValidationError>> {
        ValidationContext::new(&jobs, &technicians, &distances).validate()?;

        let eligibility = jobs
            .iter()
            .map(|job| {
                let mut mask = FixedBitSet::with_capacity(technicians.len());
                technicians
                    .iter()
                    .enumerate()
                    .filter(|(_, technician)| technician.has_skill(job.skill.as_str()))
                    .for_each(|(idx, _)| mask.insert(idx));
                mask
            })
            .collect();

        let job_index = jobs.iter().enumerate().map(|(idx, job)| (job.id.clone(), idx)).collect();
        let technician_index =
            technicians.iter().enumerate().map(|(idx, technician)| (technician.id.clone(), idx)).collect();

        Ok(Self { jobs, technicians, distances, eligibility, job_index, technician_index })
    }

    /// Returns jobs.
    pub fn jobs(&self) -> &[Job] {
        self.jobs.as_slice()
    }

    /// Returns technicians.
    pub fn technicians(&self) -> &[Technician] {
        self.technicians.as_slice()
    }

    /// Returns the distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns true if technician holds the skill required by the job.
    #[inline]
    pub fn is_eligible(&self, job: usize, technician: usize) -> bool {
        self.eligibility[job].contains(technician)
    }

    /// Returns indices of technicians eligible for the job.
    pub fn eligible_technicians(&self, job: usize) -> impl Iterator<Item = usize> + '_ {
        self.eligibility[job].ones()
    }

    /// Returns travel cost between two jobs.
    pub fn job_distance(&self, from_job: usize, to_job: usize) -> i64 {
        self.distances.distance(self.jobs[from_job].location, self.jobs[to_job].location)
    }

    /// Returns travel cost from technician's home base to the job.
    pub fn home_to_job_distance(&self, technician: usize, job: usize) -> i64 {
        self.distances.distance(self.technicians[technician].home_base, self.jobs[job].location)
    }

    /// Returns travel cost from the job back to technician's home base.
    pub fn job_to_home_distance(&self, job: usize, technician: usize) -> i64 {
        self.distances.distance(self.jobs[job].location, self.technicians[technician].home_base)
    }

    /// Returns job index by its id.
    pub fn job_index(&self, id: &str) -> Option<usize> {
        self.job_index.get(id).copied()
    }

    /// Returns technician index by its id.
    pub fn technician_index(&self, id: &str) -> Option<usize> {
        self.technician_index.get(id).copied()
    }
}
