//! Renders a schedule as a text table: technicians as rows, dates as columns.

#[cfg(test)]
#[path = "../../tests/unit/extensions/render_test.rs"]
mod render_test;

use chrono::{Days, NaiveDate};
use dispatch_core::heuristics::AssignmentRequest;
use dispatch_core::models::{Event, EventAssignment};
use std::collections::{BTreeSet, HashMap};

/// Renders events as a text table. When the request is known, its resources become rows
/// labelled with their skills, all dates of its range become columns and every job is shown
/// with its required skills. Otherwise, rows and columns are taken from the events.
pub fn render_schedule(events: &[(Event, EventAssignment)], request: Option<&AssignmentRequest>) -> String {
    let rows = get_rows(events, request);
    let dates = get_dates(events, request);

    let job_skills = request
        .map(|request| request.jobs.iter().map(|job| (job.id.as_str(), job.required_skills.join(", "))).collect())
        .unwrap_or_else(HashMap::<&str, String>::new);

    let mut cells = HashMap::<(&str, NaiveDate), Vec<String>>::new();
    events.iter().for_each(|(event, assignment)| {
        let label = match job_skills.get(event.job_id.as_str()) {
            Some(skills) if !skills.is_empty() => format!("{} ({skills})", event.job_id),
            _ => event.job_id.clone(),
        };
        cells.entry((assignment.resource_id.as_str(), event.start_date)).or_default().push(label);
    });

    let header = std::iter::once("technician".to_string()).chain(dates.iter().map(|date| date.to_string()));
    let lines = rows
        .iter()
        .map(|(id, label)| {
            std::iter::once(label.clone())
                .chain(dates.iter().map(|&date| cells.get(&(*id, date)).map(|jobs| jobs.join(", ")).unwrap_or_default()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    format_table(header.collect(), lines)
}

fn get_rows<'a>(
    events: &'a [(Event, EventAssignment)],
    request: Option<&'a AssignmentRequest>,
) -> Vec<(&'a str, String)> {
    let mut rows = request
        .map(|request| {
            request
                .resources
                .iter()
                .map(|resource| {
                    let label = if resource.skills.is_empty() {
                        resource.id.clone()
                    } else {
                        format!("{} ({})", resource.id, resource.skills.join(", "))
                    };
                    (resource.id.as_str(), label)
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    events.iter().for_each(|(_, assignment)| {
        let id = assignment.resource_id.as_str();
        if !rows.iter().any(|(row_id, _)| *row_id == id) {
            rows.push((id, id.to_string()));
        }
    });

    rows
}

fn get_dates(events: &[(Event, EventAssignment)], request: Option<&AssignmentRequest>) -> Vec<NaiveDate> {
    let mut dates = events.iter().map(|(event, _)| event.start_date).collect::<BTreeSet<_>>();

    if let Some(range) = request.map(|request| &request.date_range) {
        let mut date = Some(range.start_date);
        while let Some(current) = date.filter(|&date| date <= range.end_date) {
            dates.insert(current);
            date = current.checked_add_days(Days::new(1));
        }
    }

    dates.into_iter().collect()
}

fn format_table(header: Vec<String>, lines: Vec<Vec<String>>) -> String {
    let widths = (0..header.len())
        .map(|column| {
            std::iter::once(&header)
                .chain(lines.iter())
                .map(|line| line[column].chars().count())
                .max()
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    let format_line = |line: &[String]| {
        let cells = line.iter().zip(widths.iter()).map(|(cell, &width)| format!(" {cell:<width$} ")).collect::<Vec<_>>();
        format!("|{}|", cells.join("|"))
    };
    let separator = format!("|{}|", widths.iter().map(|&width| "-".repeat(width + 2)).collect::<Vec<_>>().join("|"));

    std::iter::once(format_line(&header))
        .chain(std::iter::once(separator))
        .chain(lines.iter().map(|line| format_line(line)))
        .collect::<Vec<_>>()
        .join("\n")
}
