#[cfg(test)]
#[path = "../../tests/unit/solver/reconstruction_test.rs"]
mod reconstruction_test;

use super::SolveError;
use crate::formulation::VariableModel;
use crate::models::{Leg, Problem, Route, ScheduleEntry, Stop};
use cpsearch::model::VarId;
use fixedbitset::FixedBitSet;

/// A state of the walk along technician's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RouteState {
    AtHome,
    AtJob(usize),
    Done,
}

/// Builds schedule entries ordered by job index and routes ordered by technician index from
/// solved variable values. It is a pure function of its inputs.
pub fn reconstruct(
    problem: &Problem,
    variables: &VariableModel,
    values: &[i64],
) -> Result<(Vec<ScheduleEntry>, Vec<Route>), SolveError> {
    let is_set = |var: VarId| values[var.index()] == 1;

    let schedule = (0..variables.job_count())
        .map(|job| {
            let technicians =
                (0..variables.technician_count()).filter(|&t| is_set(variables.assign(job, t))).collect::<Vec<_>>();

            match technicians.as_slice() {
                &[technician] => Ok(ScheduleEntry {
                    job,
                    job_id: problem.jobs()[job].id.clone(),
                    technician,
                    technician_id: problem.technicians()[technician].id.clone(),
                    start_time: values[variables.start(job).index()],
                    duration: problem.jobs()[job].duration,
                }),
                _ => Err(SolveError::ReconstructionInconsistency {
                    technician: None,
                    reason: format!(
                        "job '{}' is assigned to {} technicians",
                        problem.jobs()[job].id,
                        technicians.len()
                    ),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let routes = (0..variables.technician_count())
        .map(|technician| reconstruct_route(problem, variables, technician, &is_set))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((schedule, routes))
}

fn reconstruct_route(
    problem: &Problem,
    variables: &VariableModel,
    technician: usize,
    is_set: &impl Fn(VarId) -> bool,
) -> Result<Route, SolveError> {
    let technician_id = problem.technicians()[technician].id.clone();
    let inconsistency =
        |reason: String| SolveError::ReconstructionInconsistency { technician: Some(technician_id.clone()), reason };
    let job_id = |job: usize| problem.jobs()[job].id.as_str();

    let jobs = 0..variables.job_count();
    let mut assigned = FixedBitSet::with_capacity(variables.job_count());
    assigned.extend(jobs.clone().filter(|&job| is_set(variables.assign(job, technician))));
    let route_starts = jobs.clone().filter(|&job| is_set(variables.starts_route(technician, job))).collect::<Vec<_>>();
    let route_ends = jobs.clone().filter(|&job| is_set(variables.ends_route(technician, job))).collect::<Vec<_>>();

    let mut visited = FixedBitSet::with_capacity(variables.job_count());
    let mut legs = Vec::new();
    let mut state = RouteState::AtHome;

    while state != RouteState::Done {
        state = match state {
            RouteState::AtHome => match route_starts.as_slice() {
                [] => RouteState::Done,
                &[first] => {
                    if !assigned.contains(first) {
                        return Err(inconsistency(format!("route starts at not assigned job '{}'", job_id(first))));
                    }

                    visited.insert(first);
                    legs.push(Leg {
                        from: Stop::Home,
                        to: Stop::Job(first),
                        distance: problem.home_to_job_distance(technician, first),
                    });
                    RouteState::AtJob(first)
                }
                _ => return Err(inconsistency(format!("route has {} starts", route_starts.len()))),
            },
            RouteState::AtJob(current) => {
                let next = jobs
                    .clone()
                    .filter(|&next| variables.arc(technician, current, next).is_some_and(is_set))
                    .collect::<Vec<_>>();

                match next.as_slice() {
                    [] => {
                        if route_ends != [current] {
                            return Err(inconsistency(format!(
                                "route leaves job '{}' without outgoing arc, but route ends are: {:?}",
                                job_id(current),
                                route_ends.iter().map(|&job| job_id(job)).collect::<Vec<_>>()
                            )));
                        }

                        legs.push(Leg {
                            from: Stop::Job(current),
                            to: Stop::Home,
                            distance: problem.job_to_home_distance(current, technician),
                        });
                        RouteState::Done
                    }
                    &[next] => {
                        if visited.contains(next) {
                            return Err(inconsistency(format!("job '{}' is visited twice", job_id(next))));
                        }
                        if !assigned.contains(next) {
                            return Err(inconsistency(format!("route visits not assigned job '{}'", job_id(next))));
                        }

                        visited.insert(next);
                        legs.push(Leg {
                            from: Stop::Job(current),
                            to: Stop::Job(next),
                            distance: problem.job_distance(current, next),
                        });
                        RouteState::AtJob(next)
                    }
                    _ => {
                        return Err(inconsistency(format!(
                            "job '{}' has {} outgoing arcs",
                            job_id(current),
                            next.len()
                        )));
                    }
                }
            }
            RouteState::Done => RouteState::Done,
        };
    }

    if legs.is_empty() && !route_ends.is_empty() {
        return Err(inconsistency("route has an end without a start".to_string()));
    }

    if visited != assigned {
        let missing = assigned.difference(&visited).map(job_id).collect::<Vec<_>>();
        return Err(inconsistency(format!("assigned jobs are left off the route: {}", missing.join(", "))));
    }

    let has_unused_arcs = jobs
        .clone()
        .filter(|&from| !visited.contains(from))
        .any(|from| jobs.clone().any(|to| variables.arc(technician, from, to).is_some_and(is_set)));
    if has_unused_arcs {
        return Err(inconsistency("route has arcs which are not on the path".to_string()));
    }

    Ok(Route { technician, technician_id, legs })
}
