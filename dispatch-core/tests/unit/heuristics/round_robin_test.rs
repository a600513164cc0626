use super::*;
use crate::helpers::heuristics::*;
use rustc_hash::FxHashMap;

fn create_job_ids(amount: usize) -> Vec<String> {
    (1..=amount).map(|idx| format!("job{idx}")).collect()
}

fn create_request(jobs: usize, resources: usize, days: (u32, u32)) -> AssignmentRequest {
    let job_ids = create_job_ids(jobs);
    let jobs = job_ids.iter().map(|id| (id.as_str(), &[][..])).collect::<Vec<_>>();
    let resources = (1..=resources).map(|idx| create_test_resource(&format!("res{idx}"), &[])).collect();

    create_test_request(jobs.as_slice(), resources, days)
}

#[test]
fn can_distribute_jobs_evenly() {
    let request = create_request(10, 2, (1, 5));

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert_eq!(events.len(), 10);
    let per_resource = get_assignments(&events).into_iter().fold(FxHashMap::default(), |mut acc, (_, res, _)| {
        *acc.entry(res).or_insert(0) += 1;
        acc
    });
    assert_eq!(per_resource.get("res1"), Some(&5));
    assert_eq!(per_resource.get("res2"), Some(&5));
}

#[test]
fn can_rotate_resources_and_days() {
    let request = create_request(5, 2, (1, 5));

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert_eq!(
        get_assignments(&events),
        vec![
            ("job1".to_string(), "res1".to_string(), 1),
            ("job2".to_string(), "res2".to_string(), 1),
            ("job3".to_string(), "res1".to_string(), 2),
            ("job4".to_string(), "res2".to_string(), 2),
            ("job5".to_string(), "res1".to_string(), 3),
        ]
    );
}

parameterized_test! {can_skip_jobs_outside_date_range, (jobs, resources, days, expected), {
    let request = create_request(jobs, resources, days);

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert_eq!(events.len(), expected);
    assert!(events.iter().all(|(event, _)| event.start_date <= request.date_range.end_date));
}}

can_skip_jobs_outside_date_range! {
    case01_single_resource: (4, 1, (1, 2), 2),
    case02_two_resources: (7, 2, (1, 3), 6),
    case03_single_day: (3, 3, (1, 1), 3),
    case04_fits: (3, 1, (1, 3), 3),
}

#[test]
fn can_handle_empty_input() {
    let request = create_request(0, 0, (1, 5));

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert!(events.is_empty());
}

#[test]
fn can_reject_jobs_without_resources() {
    let request = create_request(2, 0, (1, 5));

    let result = RoundRobinScheduler::default().schedule(&request);

    assert_eq!(result.map_err(|err| err.to_string()), Err("cannot schedule jobs without resources".to_string()));
}

#[test]
fn can_reject_invalid_date_range() {
    let request = create_request(2, 1, (5, 1));

    let result = RoundRobinScheduler::default().schedule(&request);

    assert!(result.is_err());
}

#[test]
fn can_create_all_day_events() {
    let request = create_request(1, 1, (3, 4));

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert_eq!(events.len(), 1);
    let (event, assignment) = &events[0];
    assert_eq!(event.name, "Job job1");
    assert_eq!(event.job_id, "job1");
    assert_eq!((event.start_date, event.end_date), (create_date(3), create_date(3)));
    assert_eq!((event.start_time, event.end_time), (None, None));
    assert_eq!(assignment, &crate::models::EventAssignment::new("res1"));
}

#[test]
fn can_ignore_skills() {
    let request = create_test_request(
        &[("job1", &["welder"]), ("job2", &["welder"])],
        vec![create_test_resource("res1", &[]), create_test_resource("res2", &["welder"])],
        (1, 1),
    );

    let events = RoundRobinScheduler::default().schedule(&request).unwrap();

    assert_eq!(
        get_assignments(&events),
        vec![("job1".to_string(), "res1".to_string(), 1), ("job2".to_string(), "res2".to_string(), 1)]
    );
}
