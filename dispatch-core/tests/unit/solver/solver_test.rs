use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;
use std::sync::Mutex;

fn solve(problem: &Problem, config: SolverConfig) -> Outcome {
    Solver::new(config, create_test_environment()).solve(problem).expect("no solve errors")
}

fn get_solution(outcome: Outcome) -> Solution {
    match outcome {
        Outcome::Solved(solution) => solution,
        other => panic!("expected solution, got: {other:?}"),
    }
}

/// Checks properties which every solution has to satisfy.
fn check_solution_properties(problem: &Problem, solution: &Solution, working_window: i64) {
    // every job belongs to exactly one eligible technician
    assert_eq!(solution.schedule.len(), problem.jobs().len());
    solution.schedule.iter().enumerate().for_each(|(job, entry)| {
        assert_eq!(entry.job, job);
        assert!(problem.is_eligible(job, entry.technician));
        assert!((0..=working_window).contains(&entry.start_time));
    });

    solution.routes.iter().enumerate().for_each(|(technician, route)| {
        assert_eq!(route.technician, technician);
        let route_jobs = route.jobs().collect::<Vec<_>>();
        let assigned =
            solution.schedule.iter().filter(|entry| entry.technician == technician).map(|entry| entry.job).count();

        // budget is respected
        let load = route_jobs.iter().map(|&job| problem.jobs()[job].duration).sum::<i64>();
        assert!(load <= problem.technicians()[technician].max_hours);

        // single path home -> every assigned job once -> home
        assert_eq!(route_jobs.len(), assigned);
        if route.is_empty() {
            return;
        }
        assert_eq!(route.legs.len(), route_jobs.len() + 1);
        assert_eq!(route.legs.first().map(|leg| leg.from), Some(Stop::Home));
        assert_eq!(route.legs.last().map(|leg| leg.to), Some(Stop::Home));
        route.legs.windows(2).for_each(|pair| assert_eq!(pair[0].to, pair[1].from));

        // start times follow travel along the path
        let first = route_jobs[0];
        assert!(solution.schedule[first].start_time >= problem.home_to_job_distance(technician, first));
        route_jobs.windows(2).for_each(|pair| {
            let (prev, next) = (&solution.schedule[pair[0]], &solution.schedule[pair[1]]);
            assert!(next.start_time >= prev.end_time() + problem.job_distance(pair[0], pair[1]));
        });
    });

    assert_eq!(solution.total_distance, solution.routes.iter().map(|route| route.distance()).sum::<i64>());
}

#[test]
fn can_solve_example_problem() {
    let problem = create_example_problem();

    let solution = get_solution(solve(&problem, SolverConfig::default()));

    check_solution_properties(&problem, &solution, 480);
    assert_eq!(solution.optimality, Optimality::Proven);
    assert_eq!(solution.total_distance, 85);
    assert_eq!(solution.total_utilization, 6);
    assert_eq!(solution.objective, -25);
    assert!((solution.objective_value - -2.5).abs() < 1e-9);
    assert!(solution.schedule.iter().all(|entry| entry.technician_id == "tech2"));
    assert!(solution.routes[0].is_empty());
    let route = solution.routes[1].jobs().collect::<Vec<_>>();
    assert!(route == vec![0, 1, 2] || route == vec![2, 1, 0], "unexpected route: {route:?}");
}

#[test]
fn can_assign_job_to_technician_with_skill() {
    let problem = create_example_problem();

    let solution = get_solution(solve(&problem, SolverConfig::default()));

    assert_eq!(solution.entry(1).map(|entry| entry.technician_id.as_str()), Some("tech2"));
}

#[test]
fn can_detect_job_without_eligible_technician() {
    let mut jobs = create_example_jobs();
    jobs.push(create_test_job("job4", 1, 1, "carpenter"));
    let problem = Problem::new(jobs, create_example_technicians(8), create_example_distances()).unwrap();

    let outcome = solve(&problem, SolverConfig::default());

    match outcome {
        Outcome::Infeasible(Infeasibility::NoEligibleTechnician { job_ids }) => assert_eq!(job_ids, vec!["job4"]),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn can_shift_job_when_capacity_is_reduced() {
    let problem =
        Problem::new(create_example_jobs(), create_example_technicians(4), create_example_distances()).unwrap();

    let solution = get_solution(solve(&problem, SolverConfig::default()));

    check_solution_properties(&problem, &solution, 480);
    assert_eq!(solution.optimality, Optimality::Proven);
    assert_eq!(solution.entry(0).map(|entry| entry.technician_id.as_str()), Some("tech1"));
    assert_eq!(solution.total_distance, 110);
    assert_eq!(solution.objective, 60 - 110);
}

#[test]
fn can_solve_problem_without_jobs() {
    let problem = Problem::new(vec![], create_example_technicians(8), create_example_distances()).unwrap();

    let solution = get_solution(solve(&problem, SolverConfig::default()));

    assert_eq!(solution.routes.len(), 2);
    assert!(solution.routes.iter().all(|route| route.is_empty()));
    assert!(solution.schedule.is_empty());
    assert_eq!((solution.total_distance, solution.objective), (0, 0));
    assert_eq!(solution.optimality, Optimality::Proven);
}

parameterized_test! {can_prove_infeasibility, (jobs, working_window), {
    let problem = Problem::new(jobs, create_example_technicians(8), create_example_distances()).unwrap();

    let outcome = solve(&problem, SolverConfig::default().with_working_window(working_window));

    assert!(matches!(outcome, Outcome::Infeasible(Infeasibility::Proven)), "unexpected outcome: {outcome:?}");
}}

can_prove_infeasibility! {
    case01_too_long_job: (vec![create_test_job("job1", 0, 9, ELECTRICIAN)], 480),
    case02_too_far_job: (vec![create_test_job("job1", 2, 1, PLUMBER)], 34),
    case03_no_capacity_left: (vec![create_test_job("job1", 0, 5, PLUMBER), create_test_job("job2", 1, 4, PLUMBER)], 480),
}

#[test]
fn can_respect_working_window() {
    let problem = create_example_problem();

    let solution = get_solution(solve(&problem, SolverConfig::default().with_working_window(40)));

    check_solution_properties(&problem, &solution, 40);
    assert_eq!(solution.optimality, Optimality::Proven);
}

#[test]
fn can_solve_single_job_with_wide_working_window_within_time_limit() {
    let problem = Problem::new(
        vec![create_test_job("job1", 1, 30, "plumber")],
        vec![create_test_technician("tech1", &["plumber"], 100, 0)],
        DistanceMatrix::new(vec![vec![0, 5], vec![5, 0]]),
    )
    .unwrap();
    let config = SolverConfig::default().with_working_window(5_000_000).with_max_time(Some(0.05));
    let timer = Timer::start();

    let solution = get_solution(solve(&problem, config));

    assert!(timer.elapsed_secs_as_float() < 5.);
    check_solution_properties(&problem, &solution, 5_000_000);
    assert_eq!(solution.total_distance, 10);
}

#[test]
fn can_reject_values_too_large_for_integer_arithmetic() {
    let problem = Problem::new(
        vec![create_test_job("job1", 1, i64::MAX / 4, "plumber")],
        vec![create_test_technician("tech1", &["plumber"], i64::MAX / 4, 0)],
        DistanceMatrix::new(vec![vec![0, 5], vec![5, 0]]),
    )
    .unwrap();

    let result = Solver::new(SolverConfig::default(), create_test_environment()).solve(&problem);

    match result {
        Err(SolveError::InvalidInput(errors)) => {
            assert_eq!(errors.iter().map(|err| err.code.as_str()).collect::<Vec<_>>(), vec!["E1010"]);
        }
        other => panic!("expected invalid input, got: {other:?}"),
    }
}

#[test]
fn can_return_timeout_without_incumbent() {
    let problem = create_example_problem();
    let solver = Solver::new(SolverConfig::default().with_parallelism(Some(1)), create_timed_out_environment())
        .with_engine(Arc::new(BranchAndBound::new(1, 1)));

    let outcome = solver.solve(&problem).unwrap();

    assert!(matches!(outcome, Outcome::Timeout));
}

#[test]
fn can_return_not_proven_solution() {
    let problem = create_example_problem();
    let formulation = Formulation::new(&problem, 480, Default::default());
    let values = create_route_values(
        &problem,
        &formulation.variables,
        formulation.model.var_count(),
        &[(0, vec![0, 2]), (1, vec![1])],
    );
    let engine = FixedValuesEngine { status: SearchStatus::Feasible, values: Some(values) };

    let outcome = Solver::new(SolverConfig::default(), create_test_environment())
        .with_engine(Arc::new(engine))
        .solve(&problem)
        .unwrap();

    let solution = get_solution(outcome);
    assert_eq!(solution.optimality, Optimality::NotProven);
    assert_eq!(solution.total_distance, 120);
}

#[test]
fn can_report_reconstruction_inconsistency() {
    let problem = create_example_problem();
    let var_count = Formulation::new(&problem, 480, Default::default()).model.var_count();
    let engine = FixedValuesEngine { status: SearchStatus::Optimal, values: Some(vec![0; var_count]) };

    let result = Solver::new(SolverConfig::default(), create_test_environment())
        .with_engine(Arc::new(engine))
        .solve(&problem);

    assert!(matches!(result, Err(SolveError::ReconstructionInconsistency { technician: None, .. })));
}

#[test]
fn can_reject_invalid_config() {
    let problem = create_example_problem();

    let result = Solver::new(SolverConfig::default().with_distance_weight(-1.), create_test_environment()).solve(&problem);

    match result {
        Err(SolveError::InvalidInput(errors)) => assert_eq!(errors[0].code, "E1009"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn can_log_solver_phases() {
    let problem = create_example_problem();
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let environment = Environment::new(None, Parallelism::new(1), {
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    });

    Solver::new(SolverConfig::default(), environment).solve(&problem).unwrap();

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|msg| msg.contains("model created: 3 jobs, 2 technicians")));
    assert!(messages.iter().any(|msg| msg.contains("new incumbent")));
    assert!(messages.iter().any(|msg| msg.contains("solution reconstructed")));
}

parameterized_test! {can_keep_solution_properties_on_grid, (jobs, technicians, working_window), {
    let problem = create_grid_problem(&jobs, &technicians);

    let solution = get_solution(solve(&problem, SolverConfig::default().with_working_window(working_window)));

    check_solution_properties(&problem, &solution, working_window);
    let routes = solution.routes.iter().map(|route| (route.technician, route.jobs().collect())).collect::<Vec<_>>();
    let (formulation, values) = create_formulation_with_routes(&problem, &routes);
    let (_, reconstructed) = reconstruct(&problem, &formulation.variables, &values).expect("consistent values");
    assert_eq!(reconstructed, solution.routes);
}}

can_keep_solution_properties_on_grid! {
    case01_shared_skills: (
        vec![(0, 0, 2, ELECTRICIAN), (4, 0, 3, ELECTRICIAN), (0, 4, 1, ELECTRICIAN), (4, 4, 2, ELECTRICIAN)],
        vec![(2, 0, 5, &[ELECTRICIAN][..]), (2, 4, 5, &[ELECTRICIAN][..])],
        480
    ),
    case02_mixed_skills: (
        vec![(0, 0, 2, PLUMBER), (4, 0, 3, ELECTRICIAN), (0, 4, 1, ELECTRICIAN), (4, 4, 2, PLUMBER)],
        vec![(2, 0, 8, &[ELECTRICIAN, PLUMBER][..]), (2, 4, 4, &[PLUMBER][..])],
        480
    ),
    case03_tight_window: (
        vec![(1, 0, 30, ELECTRICIAN), (3, 0, 30, ELECTRICIAN), (5, 0, 30, ELECTRICIAN)],
        vec![(0, 0, 100, &[ELECTRICIAN][..]), (6, 0, 100, &[ELECTRICIAN][..])],
        40
    ),
}
