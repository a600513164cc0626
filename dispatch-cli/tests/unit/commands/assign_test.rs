use super::*;
use dispatch_cli::extensions::formats::events::read_events_json;
use std::fs::File;

const REQUEST_PATH: &str = "../data/request.basic.json";

fn run_assign_to_file(params: &[&str]) -> (tempfile::NamedTempFile, Result<(), GenericError>) {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    let path = tmpfile.path().to_str().unwrap().to_string();
    let args = [&["assign", REQUEST_PATH, "--out-result", path.as_str()], params].concat();
    let matches = get_assign_app().try_get_matches_from(args).unwrap();

    let result = run_assign(&matches);

    (tmpfile, result)
}

#[test]
fn can_assign_jobs_with_skill_aware_method() {
    let (tmpfile, result) = run_assign_to_file(&["--method", "skill-aware"]);

    result.unwrap();
    let events = read_events_json(BufReader::new(File::open(tmpfile.path()).unwrap())).unwrap();
    let assignments = events
        .iter()
        .map(|(event, assignment)| (event.job_id.as_str(), assignment.resource_id.as_str(), event.start_date.to_string()))
        .collect::<Vec<_>>();
    assert_eq!(
        assignments,
        vec![
            ("job1", "res2", "2024-01-01".to_string()),
            ("job2", "res1", "2024-01-01".to_string()),
            ("job3", "res2", "2024-01-02".to_string()),
            ("job5", "res1", "2024-01-02".to_string()),
        ]
    );
}

#[test]
fn can_assign_jobs_with_round_robin_method() {
    let (tmpfile, result) = run_assign_to_file(&["-m", "round-robin"]);

    result.unwrap();
    let events = read_events_json(BufReader::new(File::open(tmpfile.path()).unwrap())).unwrap();
    assert_eq!(events.len(), 5);
}

#[test]
fn can_write_events_as_csv() {
    let (tmpfile, result) = run_assign_to_file(&["--format", "csv"]);

    result.unwrap();
    let content = std::fs::read_to_string(tmpfile.path()).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(content.starts_with("name,job_id,start_date"));
}

#[test]
fn can_reject_unknown_method() {
    get_assign_app().try_get_matches_from(vec!["assign", REQUEST_PATH, "--method", "random"]).unwrap_err();
}
