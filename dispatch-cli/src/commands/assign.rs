#[cfg(test)]
#[path = "../../tests/unit/commands/assign_test.rs"]
mod assign_test;

use super::*;
use clap::{Arg, Command};
use dispatch_cli::extensions::formats::events::{write_events_csv, write_events_json};
use dispatch_cli::extensions::formats::request::read_request;
use dispatch_core::heuristics::{AutoScheduler, RoundRobinScheduler, SkillAwareScheduler};
use std::io::BufReader;

const REQUEST_ARG_NAME: &str = "REQUEST";
const METHOD_ARG_NAME: &str = "method";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const FORMAT_ARG_NAME: &str = "format";

pub fn get_assign_app() -> Command {
    Command::new("assign")
        .about("Assigns jobs to resources and days using a simple rotation heuristic")
        .arg(Arg::new(REQUEST_ARG_NAME).help("Sets the assignment request file to use").required(true).index(1))
        .arg(
            Arg::new(METHOD_ARG_NAME)
                .help("Specifies the heuristic")
                .short('m')
                .long(METHOD_ARG_NAME)
                .value_parser(["round-robin", "skill-aware"])
                .default_value("skill-aware")
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
                .help("Specifies output format")
                .short('f')
                .long(FORMAT_ARG_NAME)
                .value_parser(["json", "csv"])
                .default_value("json")
                .required(false),
        )
}

pub fn run_assign(matches: &ArgMatches) -> Result<(), GenericError> {
    let request_path = matches.get_one::<String>(REQUEST_ARG_NAME).ok_or("request file is not specified")?;
    let request = read_request(BufReader::new(open_file(request_path, "request")))?;

    let scheduler: Box<dyn AutoScheduler> = match matches.get_one::<String>(METHOD_ARG_NAME).map(String::as_str) {
        Some("round-robin") => Box::new(RoundRobinScheduler::default()),
        Some("skill-aware") | None => Box::new(SkillAwareScheduler::default()),
        Some(method) => return Err(format!("unknown method: '{method}'").into()),
    };
    let events = scheduler.schedule(&request)?;

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));
    let out_buffer = create_write_buffer(out_result);

    match matches.get_one::<String>(FORMAT_ARG_NAME).map(String::as_str) {
        Some("csv") => write_events_csv(out_buffer, events.as_slice()),
        _ => write_events_json(out_buffer, events.as_slice()),
    }
}
