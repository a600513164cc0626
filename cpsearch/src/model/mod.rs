//! Contains types to describe an optimization problem: variables with integer domains,
//! linear constraints with optional enforcement literals and a linear objective.

mod domain;
pub use self::domain::*;

mod linear;
pub use self::linear::*;

#[allow(clippy::module_inception)]
mod model;
pub use self::model::*;
