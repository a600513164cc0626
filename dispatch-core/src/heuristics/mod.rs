//! Contains simple rotation based assignment heuristics which work on calendar days only: they
//! ignore routing and produce one all-day event per job.

mod round_robin;
pub use self::round_robin::RoundRobinScheduler;

mod skill_aware;
pub use self::skill_aware::SkillAwareScheduler;

use crate::models::{Event, EventAssignment};
use chrono::NaiveDate;
use cpsearch::utils::GenericResult;
use serde::{Deserialize, Serialize};

/// A date range, both ends are inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date.
    pub start_date: NaiveDate,
    /// The last date.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Returns an error when the range ends before it starts.
    pub fn validate(&self) -> GenericResult<()> {
        if self.end_date < self.start_date {
            Err(format!("end date '{}' cannot be before start date '{}'", self.end_date, self.start_date).into())
        } else {
            Ok(())
        }
    }

    /// Returns amount of days in the range.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// A resource (technician) which can be assigned to jobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource id.
    pub id: String,
    /// Resource skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A job description used by the heuristics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestJob {
    /// Job id.
    pub id: String,
    /// Skills which the resource must have.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// An input of the assignment heuristics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// Ids of jobs to schedule, in processing order.
    pub job_ids: Vec<String>,
    /// Job descriptions.
    #[serde(default)]
    pub jobs: Vec<RequestJob>,
    /// Resources to rotate over.
    pub resources: Vec<Resource>,
    /// Days available for scheduling.
    pub date_range: DateRange,
}

/// Assigns jobs to resources and days.
pub trait AutoScheduler {
    /// Returns a list of events with their assignments. Jobs which cannot be scheduled within
    /// the date range are omitted.
    fn schedule(&self, request: &AssignmentRequest) -> GenericResult<Vec<(Event, EventAssignment)>>;
}

fn check_request(request: &AssignmentRequest) -> GenericResult<()> {
    request.date_range.validate()?;

    if !request.job_ids.is_empty() && request.resources.is_empty() {
        return Err("cannot schedule jobs without resources".into());
    }

    Ok(())
}

fn create_pair(job_id: &str, resource: &Resource, date: NaiveDate) -> (Event, EventAssignment) {
    (Event::new_all_day(job_id, date), EventAssignment::new(resource.id.as_str()))
}
