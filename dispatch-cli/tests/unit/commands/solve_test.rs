use super::*;
use dispatch_cli::extensions::formats::solution::{SolveStatus, deserialize_solution};
use std::fs::File;

const PROBLEM_PATH: &str = "../data/problem.basic.json";
const INVALID_PROBLEM_PATH: &str = "../data/problem.invalid.json";
const CONFIG_PATH: &str = "../data/config.full.json";

struct DummyWrite {}

impl Write for DummyWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn get_solve_matches(params: &[&str]) -> ArgMatches {
    let args = [&["solve", PROBLEM_PATH], params].concat();

    get_solve_app().try_get_matches_from(args).unwrap()
}

fn run_solve_with_dummy_writer(matches: &ArgMatches) -> Result<(), GenericError> {
    run_solve(matches, |_| BufWriter::new(Box::new(DummyWrite {})))
}

fn run_solve_with_file_writer(matches: &ArgMatches) -> Result<(), GenericError> {
    run_solve(matches, |path| create_write_buffer(path.map(|path| create_file(path, "out result"))))
}

#[test]
fn can_solve_problem_with_defaults() {
    run_solve_with_dummy_writer(&get_solve_matches(&[])).unwrap();
}

#[test]
fn can_solve_problem_with_all_settings() {
    let matches = get_solve_matches(&[
        "--max-time",
        "60",
        "--threads",
        "2",
        "--window",
        "240",
        "--distance-weight",
        "0.5",
        "--config",
        CONFIG_PATH,
    ]);

    run_solve_with_dummy_writer(&matches).unwrap();
}

#[test]
fn can_write_solution_to_file() {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    let path = tmpfile.path().to_str().unwrap();

    run_solve_with_file_writer(&get_solve_matches(&["--out-result", path])).unwrap();

    let solution = deserialize_solution(BufReader::new(File::open(path).unwrap())).unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.tours.len(), 1);
    assert_eq!(solution.statistic.map(|statistic| statistic.distance), Some(85));
}

#[test]
fn can_export_events_as_csv() {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    let path = tmpfile.path().to_str().unwrap();
    let matches = get_solve_matches(&["--reference-date", "2024-01-15", "--format", "csv", "-o", path]);

    run_solve_with_file_writer(&matches).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(content.lines().skip(1).all(|line| line.contains("2024-01-15") && line.contains("tech2")));
}

#[test]
fn can_export_events_as_json() {
    let tmpfile = tempfile::NamedTempFile::new().unwrap();
    let path = tmpfile.path().to_str().unwrap();

    run_solve_with_file_writer(&get_solve_matches(&["--reference-date", "2024-01-15", "-o", path])).unwrap();

    let events = dispatch_cli::extensions::formats::events::read_events_json(BufReader::new(File::open(path).unwrap()))
        .unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|(event, assignment)| event.start_time.is_some() && assignment.resource_id == "tech2"));
}

#[test]
fn can_require_problem_path() {
    get_solve_app().try_get_matches_from(vec!["solve"]).unwrap_err();
}

#[test]
fn can_reject_unknown_format() {
    get_solve_app().try_get_matches_from(vec!["solve", PROBLEM_PATH, "--format", "xml"]).unwrap_err();
}

#[test]
fn can_reject_invalid_problem() {
    let matches = get_solve_app().try_get_matches_from(vec!["solve", INVALID_PROBLEM_PATH]).unwrap();

    let err = run_solve_with_dummy_writer(&matches).unwrap_err().to_string();

    assert!(err.starts_with("cannot read problem from"));
    assert!(err.contains("E1000"));
}

#[test]
fn can_reject_invalid_values() {
    for (params, expected) in [
        (vec!["--max-time", "abc"], "cannot get float value"),
        (vec!["--threads", "two"], "cannot get integer value"),
        (vec!["--reference-date", "15.01.2024"], "cannot get date value"),
        (vec!["--format", "csv"], "csv format requires reference date"),
        (vec!["--distance-weight=-1"], "E1009"),
    ] {
        let err = run_solve_with_dummy_writer(&get_solve_matches(params.as_slice())).unwrap_err().to_string();

        assert!(err.contains(expected), "unexpected error: '{err}'");
    }
}

#[test]
fn can_parse_solve_subcommand() {
    let matches = crate::cli::get_app().try_get_matches_from(vec!["dispatch", "solve", PROBLEM_PATH, "--log"]).unwrap();

    let (name, matches) = matches.subcommand().expect("subcommand");
    assert_eq!(name, "solve");
    assert!(matches.get_flag("log"));
}
