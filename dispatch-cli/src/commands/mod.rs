use clap::ArgMatches;
use cpsearch::utils::GenericError;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::process;
use std::str::FromStr;

pub mod assign;
pub mod generate;
pub mod render;
pub mod solve;

pub(crate) fn create_write_buffer(out_file: Option<File>) -> BufWriter<Box<dyn Write>> {
    if let Some(out_file) = out_file {
        BufWriter::new(Box::new(out_file))
    } else {
        BufWriter::new(Box::new(stdout()))
    }
}

pub(crate) fn open_file(path: &str, description: &str) -> File {
    File::open(path).unwrap_or_else(|err| {
        eprintln!("cannot open {description} file '{path}': '{err}'");
        process::exit(1);
    })
}

pub(crate) fn create_file(path: &str, description: &str) -> File {
    File::create(path).unwrap_or_else(|err| {
        eprintln!("cannot create {description} file '{path}': '{err}'");
        process::exit(1);
    })
}

fn parse_float_value<T: FromStr<Err = std::num::ParseFloatError>>(
    matches: &ArgMatches,
    arg_name: &str,
    arg_desc: &str,
) -> Result<Option<T>, GenericError> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.parse::<T>()
                .map_err(|err| format!("cannot get float value, error: '{err}': '{arg_desc}'").into())
                .map(Some)
        })
        .unwrap_or(Ok(None))
}

fn parse_int_value<T: FromStr<Err = std::num::ParseIntError>>(
    matches: &ArgMatches,
    arg_name: &str,
    arg_desc: &str,
) -> Result<Option<T>, GenericError> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.parse::<T>()
                .map_err(|err| format!("cannot get integer value, error: '{err}': '{arg_desc}'").into())
                .map(Some)
        })
        .unwrap_or(Ok(None))
}

fn parse_date_value(matches: &ArgMatches, arg_name: &str, arg_desc: &str) -> Result<Option<chrono::NaiveDate>, GenericError> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            chrono::NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map_err(|err| format!("cannot get date value, error: '{err}': '{arg_desc}'").into())
                .map(Some)
        })
        .unwrap_or(Ok(None))
}
