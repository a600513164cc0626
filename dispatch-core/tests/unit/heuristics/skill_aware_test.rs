use super::*;
use crate::helpers::heuristics::*;

const ELECTRICIAN: &str = "electrician";
const PLUMBER: &str = "plumber";

fn assignments(list: &[(&str, &str, u32)]) -> Vec<(String, String, u32)> {
    list.iter().map(|&(job, res, day)| (job.to_string(), res.to_string(), day)).collect()
}

#[test]
fn can_assign_jobs_to_resources_with_skills() {
    let request = create_test_request(
        &[("job1", &[PLUMBER]), ("job2", &[ELECTRICIAN]), ("job3", &[PLUMBER])],
        vec![create_test_resource("res1", &[ELECTRICIAN]), create_test_resource("res2", &[PLUMBER])],
        (1, 5),
    );

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(
        get_assignments(&events),
        assignments(&[("job1", "res2", 1), ("job2", "res1", 1), ("job3", "res2", 2)])
    );
}

#[test]
fn can_rotate_like_round_robin_without_skills() {
    let request = create_test_request(
        &[("job1", &[]), ("job2", &[]), ("job3", &[]), ("job4", &[])],
        vec![create_test_resource("res1", &[]), create_test_resource("res2", &[])],
        (1, 5),
    );

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(
        get_assignments(&events),
        assignments(&[("job1", "res1", 1), ("job2", "res2", 1), ("job3", "res1", 2), ("job4", "res2", 2)])
    );
}

#[test]
fn can_skip_job_without_capable_resource() {
    let request = create_test_request(
        &[("job1", &[ELECTRICIAN]), ("job2", &["welder"]), ("job3", &[ELECTRICIAN])],
        vec![create_test_resource("res1", &[ELECTRICIAN]), create_test_resource("res2", &[ELECTRICIAN])],
        (1, 5),
    );

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(get_assignments(&events), assignments(&[("job1", "res1", 1), ("job3", "res2", 1)]));
}

#[test]
fn can_require_all_skills() {
    let request = create_test_request(
        &[("job1", &[ELECTRICIAN, PLUMBER])],
        vec![create_test_resource("res1", &[ELECTRICIAN]), create_test_resource("res2", &[PLUMBER, ELECTRICIAN])],
        (1, 1),
    );

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(get_assignments(&events), assignments(&[("job1", "res2", 1)]));
}

#[test]
fn can_move_to_other_resource_when_days_are_exhausted() {
    let request = create_test_request(
        &[("job1", &[]), ("job2", &[]), ("job3", &[]), ("job4", &[])],
        vec![create_test_resource("res1", &[]), create_test_resource("res2", &[PLUMBER])],
        (1, 1),
    );

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(get_assignments(&events), assignments(&[("job1", "res1", 1), ("job2", "res2", 1)]));
}

#[test]
fn can_treat_unknown_job_as_not_requiring_skills() {
    let mut request = create_test_request(&[], vec![create_test_resource("res1", &[])], (1, 2));
    request.job_ids = vec!["job1".to_string()];

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert_eq!(get_assignments(&events), assignments(&[("job1", "res1", 1)]));
}

#[test]
fn can_handle_empty_input() {
    let request = create_test_request(&[], vec![], (1, 5));

    let events = SkillAwareScheduler::default().schedule(&request).unwrap();

    assert!(events.is_empty());
}

#[test]
fn can_reject_invalid_date_range() {
    let request = create_test_request(&[("job1", &[])], vec![create_test_resource("res1", &[])], (3, 2));

    assert!(SkillAwareScheduler::default().schedule(&request).is_err());
}
