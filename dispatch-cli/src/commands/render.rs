#[cfg(test)]
#[path = "../../tests/unit/commands/render_test.rs"]
mod render_test;

use super::*;
use clap::{Arg, Command};
use dispatch_cli::extensions::formats::events::read_events_json;
use dispatch_cli::extensions::formats::request::read_request;
use dispatch_cli::extensions::render::render_schedule;
use std::io::BufReader;

const EVENTS_ARG_NAME: &str = "EVENTS";
const REQUEST_ARG_NAME: &str = "request";
const OUT_RESULT_ARG_NAME: &str = "out-result";

pub fn get_render_app() -> Command {
    Command::new("render")
        .about("Renders exported events as a text table with technicians as rows and dates as columns")
        .arg(Arg::new(EVENTS_ARG_NAME).help("Sets the events file in json format").required(true).index(1))
        .arg(
            Arg::new(REQUEST_ARG_NAME)
                .help("Specifies path to the assignment request to show skills and the whole date range")
                .long(REQUEST_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to the file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
}

pub fn run_render(matches: &ArgMatches) -> Result<(), GenericError> {
    let events_path = matches.get_one::<String>(EVENTS_ARG_NAME).ok_or("events file is not specified")?;
    let events = read_events_json(BufReader::new(open_file(events_path, "events")))?;

    let request = matches
        .get_one::<String>(REQUEST_ARG_NAME)
        .map(|path| read_request(BufReader::new(open_file(path, "request"))))
        .transpose()?;

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));
    let mut out_buffer = create_write_buffer(out_result);

    writeln!(out_buffer, "{}", render_schedule(events.as_slice(), request.as_ref()))?;
    out_buffer.flush().map_err(GenericError::from)
}
