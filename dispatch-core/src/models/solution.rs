use cpsearch::search::SearchStatistics;

/// A stop on technician's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stop {
    /// Technician's home base.
    Home,
    /// A job specified by its index in the problem.
    Job(usize),
}

/// A direct travel between two stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    /// Where the leg starts.
    pub from: Stop,
    /// Where the leg ends.
    pub to: Stop,
    /// Travel cost.
    pub distance: i64,
}

/// An ordered route of a technician: `home -> jobs -> home` or no legs at all when technician
/// has no jobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Technician index.
    pub technician: usize,
    /// Technician id.
    pub technician_id: String,
    /// Ordered legs.
    pub legs: Vec<Leg>,
}

impl Route {
    /// Returns job indices in visiting order.
    pub fn jobs(&self) -> impl Iterator<Item = usize> + '_ {
        self.legs.iter().filter_map(|leg| match leg.to {
            Stop::Job(job) => Some(job),
            Stop::Home => None,
        })
    }

    /// Returns total travel cost of the route including home base legs.
    pub fn distance(&self) -> i64 {
        self.legs.iter().map(|leg| leg.distance).sum()
    }

    /// Returns true if technician has no jobs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// Specifies when and by whom the job is done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Job index.
    pub job: usize,
    /// Job id.
    pub job_id: String,
    /// Technician index.
    pub technician: usize,
    /// Technician id.
    pub technician_id: String,
    /// Start time within working window.
    pub start_time: i64,
    /// Job duration.
    pub duration: i64,
}

impl ScheduleEntry {
    /// Returns the time when the job is finished.
    pub fn end_time(&self) -> i64 {
        self.start_time + self.duration
    }
}

/// Specifies whether solution is proven to be optimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Optimality {
    /// Search space is exhausted, no better solution exists.
    Proven,
    /// Search was stopped before optimality was proven.
    NotProven,
}

/// Keeps some statistics about the search which produced the solution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStatistics {
    /// Amount of explored search nodes.
    pub nodes: u64,
    /// Amount of failed search nodes.
    pub failures: u64,
    /// Amount of improving solutions.
    pub solutions: u64,
    /// Total duration in milliseconds.
    pub elapsed_millis: u128,
}

impl From<&SearchStatistics> for SolveStatistics {
    fn from(statistics: &SearchStatistics) -> Self {
        Self {
            nodes: statistics.nodes,
            failures: statistics.failures,
            solutions: statistics.solutions,
            elapsed_millis: statistics.elapsed_millis,
        }
    }
}

/// A solution of technician dispatch problem.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Schedule entries ordered by job index.
    pub schedule: Vec<ScheduleEntry>,
    /// Routes ordered by technician index.
    pub routes: Vec<Route>,
    /// Total travel cost including home base legs.
    pub total_distance: i64,
    /// Total duration of assigned jobs.
    pub total_utilization: i64,
    /// Objective value scaled by the distance weight denominator.
    pub objective: i64,
    /// Objective value: `utilization - weight * distance`.
    pub objective_value: f64,
    /// Optimality flag.
    pub optimality: Optimality,
    /// Search statistics.
    pub statistics: SolveStatistics,
}

impl Solution {
    /// Returns schedule entry of the job.
    pub fn entry(&self, job: usize) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|entry| entry.job == job)
    }

    /// Returns route of the technician.
    pub fn route(&self, technician: usize) -> Option<&Route> {
        self.routes.iter().find(|route| route.technician == technician)
    }
}
