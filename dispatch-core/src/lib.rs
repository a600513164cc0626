//! Core crate contains the building blocks to solve a ***technician dispatch*** problem: assign
//! field-service jobs to mobile technicians, order every technician's visits into a route which
//! starts and ends at the technician's home base and compute a start time for every job.
//!
//! The problem is formulated as an integer program over boolean assignment, arc and route
//! boundary variables plus integer start times:
//!
//! - every job is done by exactly one eligible technician and within the technician's budget;
//! - arcs and route boundaries describe a single path `home -> jobs -> home` per technician;
//! - start times respect travel distances and job durations along the path.
//!
//! The objective maximizes utilization (assigned work) minus weighted travel distance. The
//! model is solved by any [`cpsearch::search::SearchEngine`], the default one is a parallel
//! branch-and-bound, and the raw values are turned back into ordered routes and a schedule.
//!
//! # Examples
//!
//! ```
//! use dispatch_core::prelude::*;
//! use std::sync::Arc;
//!
//! let problem = Problem::new(
//!     vec![Job::new("job1", 0, 2, "electrician")],
//!     vec![Technician::new("tech1", vec!["electrician"], 8, 1)],
//!     DistanceMatrix::new(vec![vec![0, 10], vec![10, 0]]),
//! )
//! .expect("valid problem");
//!
//! let environment = Environment::new(None, Default::default(), Environment::silent_logger());
//! let outcome = Solver::new(SolverConfig::default(), environment).solve(&problem).expect("no errors");
//!
//! let solution = outcome.solution().expect("solved");
//! assert_eq!(solution.total_distance, 20);
//! assert_eq!(solution.schedule[0].start_time, 10);
//! ```

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod formulation;
pub mod heuristics;
pub mod models;
pub mod prelude;
pub mod solver;

pub use cpsearch;
