//! Exports (event, assignment) pairs as json or csv.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/formats/events_test.rs"]
mod events_test;

pub use self::actual::write_events_csv;

use cpsearch::utils::GenericError;
use dispatch_core::models::{Event, EventAssignment};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// A scheduled event with its assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// An event.
    pub event: Event,
    /// Event's assignment.
    pub event_assignment: EventAssignment,
}

/// Writes events as a pretty printed json array.
pub fn write_events_json<W: Write>(
    writer: BufWriter<W>,
    events: &[(Event, EventAssignment)],
) -> Result<(), GenericError> {
    let records = events
        .iter()
        .map(|(event, assignment)| EventRecord { event: event.clone(), event_assignment: assignment.clone() })
        .collect::<Vec<_>>();

    serde_json::to_writer_pretty(writer, &records).map_err(|err| format!("cannot write events: '{err}'").into())
}

/// Reads events from a json array.
pub fn read_events_json<R: Read>(reader: BufReader<R>) -> Result<Vec<(Event, EventAssignment)>, GenericError> {
    serde_json::from_reader::<_, Vec<EventRecord>>(reader)
        .map(|records| records.into_iter().map(|record| (record.event, record.event_assignment)).collect())
        .map_err(|err| format!("cannot read events: '{err}'").into())
}

#[cfg(feature = "csv-format")]
mod actual {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[derive(Debug, Serialize)]
    struct CsvEvent<'a> {
        name: &'a str,
        job_id: &'a str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        id: Option<usize>,
        event_id: Option<usize>,
        resource_id: &'a str,
        key: Option<&'a str>,
    }

    /// Writes events as csv, one row per event.
    pub fn write_events_csv<W: Write>(
        writer: BufWriter<W>,
        events: &[(Event, EventAssignment)],
    ) -> Result<(), GenericError> {
        let mut writer = csv::Writer::from_writer(writer);

        events.iter().try_for_each(|(event, assignment)| {
            writer.serialize(CsvEvent {
                name: event.name.as_str(),
                job_id: event.job_id.as_str(),
                start_date: event.start_date,
                end_date: event.end_date,
                start_time: event.start_time,
                end_time: event.end_time,
                id: assignment.id,
                event_id: assignment.event_id,
                resource_id: assignment.resource_id.as_str(),
                key: assignment.key.as_deref(),
            })
        })
        .map_err(|err| format!("cannot write events as csv: '{err}'"))?;

        writer.flush().map_err(GenericError::from)
    }
}

#[cfg(not(feature = "csv-format"))]
mod actual {
    use super::*;

    /// Writes events as csv, one row per event.
    pub fn write_events_csv<W: Write>(_: BufWriter<W>, _: &[(Event, EventAssignment)]) -> Result<(), GenericError> {
        Err("csv format is not enabled".into())
    }
}
