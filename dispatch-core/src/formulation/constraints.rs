#[cfg(test)]
#[path = "../../tests/unit/formulation/constraints_test.rs"]
mod constraints_test;

use super::VariableModel;
use crate::models::Problem;
use cpsearch::model::{LinearConstraint, LinearExpr, Model};

/// Adds all constraints of the problem to the model.
pub fn add_constraints(problem: &Problem, variables: &VariableModel, model: &mut Model) {
    add_job_constraints(problem, variables, model);

    (0..variables.technician_count()).for_each(|technician| {
        add_capacity_constraint(problem, variables, technician, model);
        add_cardinality_constraints(problem, variables, technician, model);

        (0..variables.job_count()).for_each(|job| {
            add_path_constraints(problem, variables, technician, job, model);
            add_time_constraints(problem, variables, technician, job, model);
        });
    });
}

/// Every job is covered exactly once and only by technicians with the required skill.
fn add_job_constraints(problem: &Problem, variables: &VariableModel, model: &mut Model) {
    problem.jobs().iter().enumerate().for_each(|(job, job_def)| {
        let assignments = LinearExpr::sum((0..variables.technician_count()).map(|t| variables.assign(job, t)));
        model.add_constraint(LinearConstraint::eq(assignments, 1).with_name(format!("coverage[{}]", job_def.id)));

        (0..variables.technician_count()).filter(|&technician| !problem.is_eligible(job, technician)).for_each(
            |technician| {
                let name = format!("eligibility[{},{}]", job_def.id, problem.technicians()[technician].id);
                model.add_constraint(LinearConstraint::eq(variables.assign(job, technician).into(), 0).with_name(name));
            },
        );
    });
}

/// Sum of assigned job durations does not exceed technician's budget.
fn add_capacity_constraint(problem: &Problem, variables: &VariableModel, technician: usize, model: &mut Model) {
    let technician_def = &problem.technicians()[technician];
    let load = problem
        .jobs()
        .iter()
        .enumerate()
        .fold(LinearExpr::new(), |acc, (job, job_def)| acc.term(job_def.duration, variables.assign(job, technician)));

    model.add_constraint(
        LinearConstraint::le(load, technician_def.max_hours).with_name(format!("capacity[{}]", technician_def.id)),
    );
}

/// A technician has exactly one route start and one route end when at least one job is assigned,
/// none otherwise.
fn add_cardinality_constraints(problem: &Problem, variables: &VariableModel, technician: usize, model: &mut Model) {
    let id = &problem.technicians()[technician].id;
    let jobs = 0..variables.job_count();
    let starts = LinearExpr::sum(jobs.clone().map(|job| variables.starts_route(technician, job)));
    let ends = LinearExpr::sum(jobs.clone().map(|job| variables.ends_route(technician, job)));

    model.add_constraint(LinearConstraint::le(starts.clone(), 1).with_name(format!("single_start[{id}]")));
    model.add_constraint(LinearConstraint::le(ends.clone(), 1).with_name(format!("single_end[{id}]")));

    jobs.for_each(|job| {
        let assign = variables.assign(job, technician);
        let job_id = &problem.jobs()[job].id;

        let mut has_start = starts.clone();
        has_start.add_term(-1, assign);
        model.add_constraint(LinearConstraint::ge(has_start, 0).with_name(format!("has_start[{id},{job_id}]")));

        let mut has_end = ends.clone();
        has_end.add_term(-1, assign);
        model.add_constraint(LinearConstraint::ge(has_end, 0).with_name(format!("has_end[{id},{job_id}]")));
    });
}

/// Links arcs and route boundaries to assignment and keeps a single path through assigned jobs.
fn add_path_constraints(
    problem: &Problem,
    variables: &VariableModel,
    technician: usize,
    job: usize,
    model: &mut Model,
) {
    let suffix = format!("[{},{}]", problem.technicians()[technician].id, problem.jobs()[job].id);
    let assign = variables.assign(job, technician);
    let starts_route = variables.starts_route(technician, job);
    let ends_route = variables.ends_route(technician, job);

    // an arc is used only between jobs of the same technician
    variables.outgoing_arcs(technician, job).chain(variables.incoming_arcs(technician, job)).for_each(|arc| {
        let name = format!("arc_link{suffix}:{}", model.var_name(arc));
        model.add_constraint(LinearConstraint::le(LinearExpr::from(arc).term(-1, assign), 0).with_name(name));
    });

    let incoming = LinearExpr::sum(variables.incoming_arcs(technician, job));
    let outgoing = LinearExpr::sum(variables.outgoing_arcs(technician, job));

    let mut flow = incoming.clone().term(1, starts_route);
    flow.extend(outgoing.negated().term(-1, ends_route));
    model.add_constraint(LinearConstraint::eq(flow, 0).with_name(format!("flow{suffix}")));

    model.add_constraint(
        LinearConstraint::eq(incoming.term(1, starts_route).term(-1, assign), 0).with_name(format!("in_degree{suffix}")),
    );
    model.add_constraint(
        LinearConstraint::eq(outgoing.term(1, ends_route).term(-1, assign), 0).with_name(format!("out_degree{suffix}")),
    );

    model.add_constraint(
        LinearConstraint::le(LinearExpr::from(starts_route).term(-1, assign), 0)
            .with_name(format!("start_link{suffix}")),
    );
    model.add_constraint(
        LinearConstraint::le(LinearExpr::from(ends_route).term(-1, assign), 0).with_name(format!("end_link{suffix}")),
    );
}

/// Start times follow travel from home and from the previous job, ranks grow along the route.
fn add_time_constraints(problem: &Problem, variables: &VariableModel, technician: usize, job: usize, model: &mut Model) {
    let technician_id = &problem.technicians()[technician].id;
    let job_def = &problem.jobs()[job];

    model.add_constraint(
        LinearConstraint::ge(variables.start(job).into(), problem.home_to_job_distance(technician, job))
            .only_enforce_if(variables.starts_route(technician, job))
            .with_name(format!("home_travel[{technician_id},{}]", job_def.id)),
    );

    (0..variables.job_count()).for_each(|next| {
        let Some(arc) = variables.arc(technician, job, next) else { return };
        let suffix = format!("[{technician_id},{},{}]", job_def.id, problem.jobs()[next].id);

        model.add_constraint(
            LinearConstraint::ge(
                LinearExpr::from(variables.start(next)).term(-1, variables.start(job)),
                job_def.duration + problem.job_distance(job, next),
            )
            .only_enforce_if(arc)
            .with_name(format!("sequence{suffix}")),
        );

        model.add_constraint(
            LinearConstraint::ge(LinearExpr::from(variables.rank(next)).term(-1, variables.rank(job)), 1)
                .only_enforce_if(arc)
                .with_name(format!("rank{suffix}")),
        );
    });
}
