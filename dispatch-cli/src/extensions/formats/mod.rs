//! Contains json and csv formats used to read problems and write results.

pub mod events;
pub mod problem;
pub mod request;
pub mod solution;
