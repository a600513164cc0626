use super::*;
use crate::helpers::models::*;

#[test]
fn can_precompute_eligibility() {
    let problem = create_example_problem();

    assert!(problem.is_eligible(0, 0));
    assert!(problem.is_eligible(0, 1));
    assert!(!problem.is_eligible(1, 0));
    assert!(problem.is_eligible(1, 1));
    assert_eq!(problem.eligible_technicians(1).collect::<Vec<_>>(), vec![1]);
    assert_eq!(problem.eligible_technicians(2).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn can_get_distances_by_locations() {
    let problem = create_example_problem();

    assert_eq!(problem.job_distance(0, 1), 10);
    assert_eq!(problem.job_distance(2, 0), 20);
    assert_eq!(problem.home_to_job_distance(0, 2), 25);
    assert_eq!(problem.job_to_home_distance(1, 1), 30);
}

#[test]
fn can_find_entities_by_id() {
    let problem = create_example_problem();

    assert_eq!(problem.job_index("job3"), Some(2));
    assert_eq!(problem.job_index("job4"), None);
    assert_eq!(problem.technician_index("tech2"), Some(1));
}

#[test]
fn can_use_asymmetric_distances() {
    let distances = DistanceMatrix::new(vec![vec![0, 5], vec![7, 0]]);

    assert!(distances.is_square());
    assert_eq!(distances.distance(0, 1), 5);
    assert_eq!(distances.distance(1, 0), 7);
}

#[test]
fn can_check_technician_skills() {
    let technician = create_test_technician("tech", &[ELECTRICIAN, PLUMBER], 8, 0);

    assert!(technician.has_skill(PLUMBER));
    assert!(!technician.has_skill("carpenter"));
}
