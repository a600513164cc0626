//! This crate exposes building blocks to model small integer optimization problems and solve them
//! with bounds propagation and a parallel branch-and-bound search.
//!
//! A problem is described by a [`model::Model`]: integer variables with bounded domains (booleans
//! are integers in `[0, 1]`), linear constraints which can be conditional on a boolean literal and
//! a linear objective to maximize. Any [`search::SearchEngine`] implementation can solve it, the
//! provided one is [`search::BranchAndBound`].

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod model;
pub mod prelude;
pub mod search;
pub mod utils;
