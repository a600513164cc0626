//! A command line interface to the *technician dispatch* solver: reads problems in a json format,
//! runs the solver or one of the rotation heuristics and writes solutions, calendar events or a
//! text table of the schedule.
//!
//! The binary is a thin layer over the [`extensions`] module which can be reused from other tools.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

pub mod extensions;
