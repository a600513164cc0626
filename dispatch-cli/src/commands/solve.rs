#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use dispatch_cli::extensions::config::*;
use dispatch_cli::extensions::formats::events::{write_events_csv, write_events_json};
use dispatch_cli::extensions::formats::problem::read_problem;
use dispatch_cli::extensions::formats::solution::write_solution;
use dispatch_cli::extensions::interruption::create_interruption_quota;
use dispatch_core::solver::Outcome;
use std::io::BufReader;

const PROBLEM_ARG_NAME: &str = "PROBLEM";
const CONFIG_ARG_NAME: &str = "config";
const TIME_ARG_NAME: &str = "max-time";
const THREADS_ARG_NAME: &str = "threads";
const WINDOW_ARG_NAME: &str = "window";
const DISTANCE_WEIGHT_ARG_NAME: &str = "distance-weight";
const REFERENCE_DATE_ARG_NAME: &str = "reference-date";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const FORMAT_ARG_NAME: &str = "format";
const LOG_ARG_NAME: &str = "log";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Assigns jobs to technicians, builds their routes and schedules the jobs")
        .arg(Arg::new(PROBLEM_ARG_NAME).help("Sets the problem file to use").required(true).index(1))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to the solver config file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies max time of the search in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(THREADS_ARG_NAME)
                .help("Specifies amount of search worker threads")
                .long(THREADS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(WINDOW_ARG_NAME)
                .help("Specifies the latest allowed job start time")
                .short('w')
                .long(WINDOW_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(DISTANCE_WEIGHT_ARG_NAME)
                .help("Specifies a weight of the travel distance in the objective")
                .short('d')
                .long(DISTANCE_WEIGHT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(REFERENCE_DATE_ARG_NAME)
                .help("Exports the schedule as calendar events which start on given date (YYYY-MM-DD)")
                .short('r')
                .long(REFERENCE_DATE_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to the file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(FORMAT_ARG_NAME)
                .help("Specifies output format of calendar events")
                .short('f')
                .long(FORMAT_ARG_NAME)
                .value_parser(["json", "csv"])
                .default_value("json")
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether search progress should be written to stdout")
                .short('l')
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
}

pub fn run_solve(
    matches: &ArgMatches,
    out_writer_func: fn(Option<&str>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), GenericError> {
    let problem_path = matches.get_one::<String>(PROBLEM_ARG_NAME).ok_or("problem file is not specified")?;
    let problem = read_problem(BufReader::new(open_file(problem_path, "problem")))
        .map_err(|err| err.with_context(&format!("cannot read problem from '{problem_path}'")))?;

    let config = get_config(matches)?;
    let reference_date = parse_date_value(matches, REFERENCE_DATE_ARG_NAME, "reference date")?;
    let format = matches.get_one::<String>(FORMAT_ARG_NAME).map(String::as_str).unwrap_or("json");

    if format == "csv" && reference_date.is_none() {
        return Err("csv format requires reference date".into());
    }

    let quota = Some(create_interruption_quota(config.max_time()));
    let outcome = create_solver_from_config(&config, quota).solve(&problem).map_err(|err| err.to_string())?;

    let out_buffer = out_writer_func(matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(String::as_str));

    match (reference_date, &outcome) {
        (None, _) => write_solution(out_buffer, &problem, &outcome),
        (Some(reference_date), Outcome::Solved(solution)) => {
            let events = solution.to_events(reference_date)?;
            match format {
                "csv" => write_events_csv(out_buffer, events.as_slice()),
                _ => write_events_json(out_buffer, events.as_slice()),
            }
        }
        (Some(_), outcome) => Err(format!("cannot export events: no solution found, outcome: {outcome:?}").into()),
    }
}

/// Reads config file, if specified, and overrides its settings with command line arguments.
fn get_config(matches: &ArgMatches) -> Result<Config, GenericError> {
    let mut config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(BufReader::new(open_file(path, "config")))?,
        None => Config::default(),
    };

    if let Some(max_time) = parse_float_value::<f64>(matches, TIME_ARG_NAME, "max time")? {
        config.termination = Some(TerminationConfig { max_time: Some(max_time) });
    }

    if let Some(num_threads) = parse_int_value::<usize>(matches, THREADS_ARG_NAME, "threads")? {
        config.environment = Some(EnvironmentConfig { parallelism: Some(ParallelismConfig { num_threads }) });
    }

    let working_window = parse_int_value::<i64>(matches, WINDOW_ARG_NAME, "working window")?;
    let distance_weight = parse_float_value::<f64>(matches, DISTANCE_WEIGHT_ARG_NAME, "distance weight")?;
    if working_window.is_some() || distance_weight.is_some() {
        let model = config.model.get_or_insert_with(ModelConfig::default);
        model.working_window = working_window.or(model.working_window);
        model.distance_weight = distance_weight.or(model.distance_weight);
    }

    if matches.get_flag(LOG_ARG_NAME) {
        config.telemetry = Some(TelemetryConfig { logging: Some(LoggingConfig { enabled: true, prefix: None }) });
    }

    Ok(config)
}
