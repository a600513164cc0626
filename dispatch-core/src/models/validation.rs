#[cfg(test)]
#[path = "../../tests/unit/models/validation_test.rs"]
mod validation_test;

use super::{DistanceMatrix, Job, Technician};
use rustc_hash::FxHashSet;
use std::fmt;

/// A validation error with a code from the error registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// An error code in registry.
    pub code: String,
    /// A possible error cause.
    pub message: String,
    /// An action to take in order to recover from error.
    pub action: String,
}

impl ValidationError {
    /// Creates a new instance of `ValidationError`.
    pub fn new(code: &str, message: String, action: String) -> Self {
        Self { code: code.to_string(), message, action }
    }

    /// Formats multiple validation errors into string.
    pub fn format_many(errors: &[Self], separator: &str) -> String {
        errors.iter().map(|err| err.to_string()).collect::<Vec<_>>().join(separator)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, cause: '{}', action: '{}'.", self.code, self.message, self.action)
    }
}

impl std::error::Error for ValidationError {}

/// Keeps raw problem data to be validated.
pub struct ValidationContext<'a> {
    jobs: &'a [Job],
    technicians: &'a [Technician],
    distances: &'a DistanceMatrix,
}

impl<'a> ValidationContext<'a> {
    /// Creates an instance of `ValidationContext`.
    pub fn new(jobs: &'a [Job], technicians: &'a [Technician], distances: &'a DistanceMatrix) -> Self {
        Self { jobs, technicians, distances }
    }

    /// Validates problem on set of rules.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        combine_error_results(&[
            check_e1000_no_jobs_with_duplicate_ids(self),
            check_e1001_no_technicians_with_duplicate_ids(self),
            check_e1002_distance_matrix_is_square(self),
            check_e1003_no_negative_distances(self),
            check_e1004_job_locations_in_range(self),
            check_e1005_home_bases_in_range(self),
            check_e1006_home_bases_are_not_job_locations(self),
            check_e1007_no_negative_durations(self),
            check_e1008_no_negative_budgets(self),
        ])
    }

    fn has_valid_matrix(&self) -> bool {
        self.distances.size() > 0 && self.distances.is_square()
    }
}

/// Combines error results into one.
pub fn combine_error_results<T: Clone>(results: &[Result<(), T>]) -> Result<(), Vec<T>> {
    let errors = results.iter().cloned().flat_map(|result| result.err().into_iter()).collect::<Vec<T>>();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn get_duplicates<'a>(ids: impl Iterator<Item = &'a String>) -> Option<Vec<String>> {
    let mut seen = FxHashSet::default();
    let mut reported = FxHashSet::default();
    let duplicates =
        ids.filter(|id| !seen.insert(*id)).filter(|id| reported.insert(*id)).cloned().collect::<Vec<_>>();

    if duplicates.is_empty() { None } else { Some(duplicates) }
}

fn to_error(code: &str, ids: Vec<String>, message: &str, action: &str) -> Result<(), ValidationError> {
    if ids.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(code, message.to_string(), format!("{action}, ids: '{}'", ids.join(", "))))
    }
}

/// Checks that there are no jobs with duplicate ids.
fn check_e1000_no_jobs_with_duplicate_ids(ctx: &ValidationContext) -> Result<(), ValidationError> {
    to_error(
        "E1000",
        get_duplicates(ctx.jobs.iter().map(|job| &job.id)).unwrap_or_default(),
        "duplicated job ids",
        "remove duplicated jobs or give them unique ids",
    )
}

/// Checks that there are no technicians with duplicate ids.
fn check_e1001_no_technicians_with_duplicate_ids(ctx: &ValidationContext) -> Result<(), ValidationError> {
    to_error(
        "E1001",
        get_duplicates(ctx.technicians.iter().map(|technician| &technician.id)).unwrap_or_default(),
        "duplicated technician ids",
        "remove duplicated technicians or give them unique ids",
    )
}

/// Checks that distance matrix is square and not empty when there is anything to route.
fn check_e1002_distance_matrix_is_square(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let has_locations = !ctx.jobs.is_empty() || !ctx.technicians.is_empty();
    let is_empty = ctx.distances.size() == 0;

    if !ctx.distances.is_square() || (is_empty && has_locations) {
        Err(ValidationError::new(
            "E1002",
            "distance matrix is not square or it is empty".to_string(),
            format!(
                "provide matrix with the same amount of values in every row as the amount of rows, rows: '{}'",
                ctx.distances.size()
            ),
        ))
    } else {
        Ok(())
    }
}

/// Checks that distance matrix has no negative values.
fn check_e1003_no_negative_distances(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let cells = ctx
        .distances
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(from, row)| {
            row.iter().enumerate().filter(|(_, value)| **value < 0).map(move |(to, _)| format!("[{from}][{to}]"))
        })
        .collect::<Vec<_>>();

    if cells.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(
            "E1003",
            "distance matrix has negative values".to_string(),
            format!("use non-negative travel costs, cells: '{}'", cells.join(", ")),
        ))
    }
}

/// Checks that job locations are inside the distance matrix.
fn check_e1004_job_locations_in_range(ctx: &ValidationContext) -> Result<(), ValidationError> {
    if !ctx.has_valid_matrix() {
        return Ok(());
    }

    to_error(
        "E1004",
        ctx.jobs.iter().filter(|job| job.location >= ctx.distances.size()).map(|job| job.id.clone()).collect(),
        "job location is outside of distance matrix",
        "use location index which is less than the matrix size",
    )
}

/// Checks that home bases are inside the distance matrix.
fn check_e1005_home_bases_in_range(ctx: &ValidationContext) -> Result<(), ValidationError> {
    if !ctx.has_valid_matrix() {
        return Ok(());
    }

    to_error(
        "E1005",
        ctx.technicians
            .iter()
            .filter(|technician| technician.home_base >= ctx.distances.size())
            .map(|technician| technician.id.clone())
            .collect(),
        "technician home base is outside of distance matrix",
        "use location index which is less than the matrix size",
    )
}

/// Checks that no technician's home base is used as a job location.
fn check_e1006_home_bases_are_not_job_locations(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let job_locations = ctx.jobs.iter().map(|job| job.location).collect::<FxHashSet<_>>();

    to_error(
        "E1006",
        ctx.technicians
            .iter()
            .filter(|technician| job_locations.contains(&technician.home_base))
            .map(|technician| technician.id.clone())
            .collect(),
        "technician home base coincides with a job location",
        "use a dedicated location for the home base",
    )
}

/// Checks that job durations are not negative.
fn check_e1007_no_negative_durations(ctx: &ValidationContext) -> Result<(), ValidationError> {
    to_error(
        "E1007",
        ctx.jobs.iter().filter(|job| job.duration < 0).map(|job| job.id.clone()).collect(),
        "job has negative duration",
        "use non-negative duration",
    )
}

/// Checks that technician budgets are not negative.
fn check_e1008_no_negative_budgets(ctx: &ValidationContext) -> Result<(), ValidationError> {
    to_error(
        "E1008",
        ctx.technicians
            .iter()
            .filter(|technician| technician.max_hours < 0)
            .map(|technician| technician.id.clone())
            .collect(),
        "technician has negative working time budget",
        "use non-negative budget",
    )
}
