//! A command line interface to *technician dispatch* solver.
//!
//! ## Usage
//!
//! - solve a problem specified in json format within 10 seconds and write the solution:
//!
//!     `dispatch solve problem.json --max-time 10 -o solution.json`
//!
//! - solve a problem and export the schedule as calendar events starting from the given date:
//!
//!     `dispatch solve problem.json --reference-date 2024-01-15 --format csv`
//!
//! - assign jobs to days with a rotation heuristic and render the result:
//!
//!     `dispatch assign request.json --method skill-aware -o events.json`
//!
//!     `dispatch render events.json --request request.json`
//!
//! For more details, simply run `dispatch --help`.

mod commands;

fn main() {
    let matches = cli::get_app().get_matches();

    cli::run_subcommand(matches);
}

mod cli {
    use super::commands::assign::{get_assign_app, run_assign};
    use super::commands::generate::{get_generate_app, run_generate};
    use super::commands::render::{get_render_app, run_render};
    use super::commands::solve::{get_solve_app, run_solve};
    use super::commands::{create_file, create_write_buffer};
    use clap::{ArgMatches, Command};
    use cpsearch::utils::GenericError;
    use std::process;

    pub fn get_app() -> Command {
        Command::new("Technician Dispatch Solver")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to technician dispatch solver")
            .subcommand(get_solve_app())
            .subcommand(get_assign_app())
            .subcommand(get_generate_app())
            .subcommand(get_render_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches) {
        let result: Result<(), GenericError> = match arg_matches.subcommand() {
            Some(("solve", matches)) => {
                run_solve(matches, |path| create_write_buffer(path.map(|path| create_file(path, "out result"))))
            }
            Some(("assign", matches)) => run_assign(matches),
            Some(("generate", matches)) => run_generate(matches),
            Some(("render", matches)) => run_render(matches),
            _ => Err("no subcommand was used. Use -h to print help information.".into()),
        };

        if let Err(err) = result {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
