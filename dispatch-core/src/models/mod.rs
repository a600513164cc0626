//! A collection of models to represent the problem and its solution.

mod events;
pub use self::events::*;

mod problem;
pub use self::problem::*;

mod solution;
pub use self::solution::*;

mod validation;
pub use self::validation::*;
