#[cfg(test)]
#[path = "../../tests/unit/solver/config_test.rs"]
mod config_test;

use crate::formulation::DistanceWeight;
use crate::models::ValidationError;

/// A default working window length.
pub const DEFAULT_WORKING_WINDOW: i64 = 480;

/// A default weight of distance in the objective.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.1;

/// Specifies solver settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// All job start times lie in `[0, working_window]`.
    pub working_window: i64,
    /// A weight of travel distance in the objective.
    pub distance_weight: f64,
    /// A time limit in seconds.
    pub max_time: Option<f64>,
    /// Amount of search workers, all available CPUs when not set.
    pub parallelism: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            working_window: DEFAULT_WORKING_WINDOW,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            max_time: None,
            parallelism: None,
        }
    }
}

impl SolverConfig {
    /// Sets working window.
    pub fn with_working_window(mut self, working_window: i64) -> Self {
        self.working_window = working_window;
        self
    }

    /// Sets distance weight.
    pub fn with_distance_weight(mut self, distance_weight: f64) -> Self {
        self.distance_weight = distance_weight;
        self
    }

    /// Sets time limit in seconds.
    pub fn with_max_time(mut self, max_time: Option<f64>) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets amount of search workers.
    pub fn with_parallelism(mut self, parallelism: Option<usize>) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Checks settings and returns the distance weight as an exact fraction.
    pub fn validate(&self) -> Result<DistanceWeight, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.working_window < 0 {
            errors.push(format!("working window is negative: {}", self.working_window));
        }

        if self.max_time.is_some_and(|max_time| !max_time.is_finite() || max_time < 0.) {
            errors.push(format!("max time is invalid: {:?}", self.max_time));
        }

        if self.parallelism == Some(0) {
            errors.push("parallelism must be positive".to_string());
        }

        let weight = DistanceWeight::from_f64(self.distance_weight).map_err(|err| errors.push(err.to_string())).ok();

        match (errors.is_empty(), weight) {
            (true, Some(weight)) => Ok(weight),
            _ => Err(errors
                .into_iter()
                .map(|message| ValidationError::new("E1009", message, "fix solver configuration".to_string()))
                .collect()),
        }
    }
}
