#[cfg(test)]
#[path = "../../tests/unit/models/events_test.rs"]
mod events_test;

use super::Solution;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use cpsearch::utils::GenericResult;
use serde::{Deserialize, Serialize};

/// A calendar event which represents a scheduled job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Human readable name.
    pub name: String,
    /// An id of the job.
    pub job_id: String,
    /// A date when the job starts.
    pub start_date: NaiveDate,
    /// A date when the job ends.
    pub end_date: NaiveDate,
    /// A start time, if known.
    pub start_time: Option<NaiveTime>,
    /// An end time, if known.
    pub end_time: Option<NaiveTime>,
}

impl Event {
    /// Creates an all-day event of the job.
    pub fn new_all_day(job_id: &str, date: NaiveDate) -> Self {
        Self {
            name: format!("Job {job_id}"),
            job_id: job_id.to_string(),
            start_date: date,
            end_date: date,
            start_time: None,
            end_time: None,
        }
    }
}

/// Links an event to the resource (technician) which handles it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAssignment {
    /// An assignment id, if persisted.
    pub id: Option<usize>,
    /// An event id, if persisted.
    pub event_id: Option<usize>,
    /// A resource id.
    pub resource_id: String,
    /// An optional external key.
    pub key: Option<String>,
}

impl EventAssignment {
    /// Creates a not persisted assignment to the resource.
    pub fn new(resource_id: &str) -> Self {
        Self { id: None, event_id: None, resource_id: resource_id.to_string(), key: None }
    }
}

impl Solution {
    /// Projects the schedule onto calendar events: start time is an offset in minutes from the
    /// beginning of the reference date, end time is start time plus job duration.
    pub fn to_events(&self, reference_date: NaiveDate) -> GenericResult<Vec<(Event, EventAssignment)>> {
        let origin = reference_date.and_time(NaiveTime::MIN);
        let shift = |minutes: i64| -> GenericResult<NaiveDateTime> {
            TimeDelta::try_minutes(minutes)
                .and_then(|delta| origin.checked_add_signed(delta))
                .ok_or_else(|| format!("cannot shift reference date by {minutes} minutes").into())
        };

        self.schedule
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let start = shift(entry.start_time)?;
                let end = shift(entry.end_time())?;

                let event = Event {
                    name: format!("Job {}", entry.job_id),
                    job_id: entry.job_id.clone(),
                    start_date: start.date(),
                    end_date: end.date(),
                    start_time: Some(start.time()),
                    end_time: Some(end.time()),
                };
                let assignment = EventAssignment {
                    id: Some(idx),
                    event_id: Some(idx),
                    resource_id: entry.technician_id.clone(),
                    key: None,
                };

                Ok((event, assignment))
            })
            .collect()
    }
}
