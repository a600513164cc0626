#[cfg(test)]
#[path = "../../tests/unit/commands/generate_test.rs"]
mod generate_test;

use super::*;
use clap::{Arg, Command};
use dispatch_cli::extensions::formats::problem::{create_problem, serialize_problem};
use dispatch_cli::extensions::generate::generate_problem;

const JOBS_SIZE_ARG_NAME: &str = "jobs-size";
const TECHNICIANS_SIZE_ARG_NAME: &str = "technicians-size";
const SKILLS_SIZE_ARG_NAME: &str = "skills-size";
const SEED_ARG_NAME: &str = "seed";
const OUT_RESULT_ARG_NAME: &str = "out-result";

pub fn get_generate_app() -> Command {
    Command::new("generate")
        .about("Provides the way to generate random problems for testing")
        .arg(
            Arg::new(JOBS_SIZE_ARG_NAME)
                .help("Amount of jobs in generated problem")
                .short('j')
                .long(JOBS_SIZE_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(TECHNICIANS_SIZE_ARG_NAME)
                .help("Amount of technicians in generated problem")
                .short('t')
                .long(TECHNICIANS_SIZE_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(SKILLS_SIZE_ARG_NAME)
                .help("Amount of distinct skills")
                .short('s')
                .long(SKILLS_SIZE_ARG_NAME)
                .default_value("2")
                .required(false),
        )
        .arg(
            Arg::new(SEED_ARG_NAME)
                .help("Specifies a random seed to get reproducible problems")
                .long(SEED_ARG_NAME)
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

pub fn run_generate(matches: &ArgMatches) -> Result<(), GenericError> {
    let jobs_size = parse_int_value::<usize>(matches, JOBS_SIZE_ARG_NAME, "jobs size")?.unwrap_or_default();
    let technicians_size =
        parse_int_value::<usize>(matches, TECHNICIANS_SIZE_ARG_NAME, "technicians size")?.unwrap_or_default();
    let skills_size = parse_int_value::<usize>(matches, SKILLS_SIZE_ARG_NAME, "skills size")?.unwrap_or(2);
    let seed = parse_int_value::<u64>(matches, SEED_ARG_NAME, "seed")?;

    let problem = generate_problem(jobs_size, technicians_size, skills_size, seed)
        .map_err(|err| err.with_context("cannot generate problem"))?;
    create_problem(&problem).map_err(|err| err.with_context("generated problem is not valid"))?;

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));

    serialize_problem(create_write_buffer(out_result), &problem)
}
