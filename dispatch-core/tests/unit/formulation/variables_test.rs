use super::*;
use crate::helpers::models::*;
use cpsearch::model::Domain;

#[test]
fn can_create_variables() {
    let problem = create_example_problem();
    let mut model = Model::new("test");

    let variables = VariableModel::new(&problem, 480, &mut model);

    // assign 3x2, arcs 2x3x2, starts 3, route boundaries 2x2x3, ranks 3
    assert_eq!(model.var_count(), 6 + 12 + 3 + 12 + 3);
    assert_eq!((variables.job_count(), variables.technician_count()), (3, 2));
    assert_eq!(variables.arc(0, 1, 1), None);
    assert_eq!(model.var_name(variables.assign(1, 0)), "x[job2,tech1]");
    assert_eq!(model.var_name(variables.arc(1, 0, 2).unwrap()), "arc[tech2,job1,job3]");
    assert_eq!(model.var_name(variables.starts_route(1, 2)), "startsRoute[tech2,job3]");
    assert_eq!(model.var_name(variables.ends_route(0, 0)), "endsRoute[tech1,job1]");
    assert_eq!(model.domain(variables.start(0)), Domain::new(0, 480));
    assert_eq!(model.domain(variables.rank(2)), Domain::new(0, 2));
}

#[test]
fn can_list_incoming_and_outgoing_arcs() {
    let problem = create_example_problem();
    let mut model = Model::new("test");
    let variables = VariableModel::new(&problem, 480, &mut model);

    let names = |vars: Vec<VarId>| vars.into_iter().map(|var| model.var_name(var).to_string()).collect::<Vec<_>>();

    assert_eq!(names(variables.incoming_arcs(0, 1).collect()), vec!["arc[tech1,job1,job2]", "arc[tech1,job3,job2]"]);
    assert_eq!(names(variables.outgoing_arcs(1, 2).collect()), vec!["arc[tech2,job3,job1]", "arc[tech2,job3,job2]"]);
}

#[test]
fn can_order_decisions() {
    let problem = create_example_problem();
    let mut model = Model::new("test");
    let variables = VariableModel::new(&problem, 480, &mut model);

    let decisions = variables
        .decisions(&problem)
        .into_iter()
        .map(|(var, preferred)| (model.var_name(var).to_string(), preferred))
        .collect::<Vec<_>>();

    assert!(decisions.iter().all(|(_, preferred)| *preferred == 1));
    let names = decisions.into_iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            // job1 is closer to tech1, job2 is only for tech2, job3 is closer to tech1
            "x[job1,tech1]",
            "x[job1,tech2]",
            "x[job2,tech2]",
            "x[job3,tech1]",
            "x[job3,tech2]",
            // tech1: jobs 1 and 3 only
            "startsRoute[tech1,job1]",
            "startsRoute[tech1,job3]",
            "arc[tech1,job1,job3]",
            "arc[tech1,job3,job1]",
            "endsRoute[tech1,job1]",
            "endsRoute[tech1,job3]",
            // tech2: all jobs
            "startsRoute[tech2,job1]",
            "startsRoute[tech2,job2]",
            "startsRoute[tech2,job3]",
            "arc[tech2,job1,job2]",
            "arc[tech2,job2,job1]",
            "arc[tech2,job2,job3]",
            "arc[tech2,job3,job2]",
            "arc[tech2,job1,job3]",
            "arc[tech2,job3,job1]",
            "endsRoute[tech2,job1]",
            "endsRoute[tech2,job2]",
            "endsRoute[tech2,job3]",
        ]
    );
}
