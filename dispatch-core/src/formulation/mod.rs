//! Contains logic to formulate the dispatch problem as an integer program.

mod bounds;
pub use self::bounds::{MAX_MAGNITUDE, check_value_magnitudes};

mod constraints;
pub use self::constraints::add_constraints;

mod objective;
pub use self::objective::{DistanceWeight, create_objective};

mod variables;
pub use self::variables::VariableModel;

use crate::models::Problem;
use cpsearch::model::Model;

/// Keeps the integer program of the problem together with its variable layout.
pub struct Formulation {
    /// An optimization model.
    pub model: Model,
    /// A variable layout.
    pub variables: VariableModel,
    /// A weight of distance in the objective.
    pub weight: DistanceWeight,
}

impl Formulation {
    /// Creates variables, constraints, objective and branching decisions of the problem.
    /// Magnitudes of the problem values are expected to pass [`check_value_magnitudes`].
    pub fn new(problem: &Problem, working_window: i64, weight: DistanceWeight) -> Self {
        let mut model = Model::new("dispatch");

        let variables = VariableModel::new(problem, working_window, &mut model);
        add_constraints(problem, &variables, &mut model);
        model.maximize(create_objective(problem, &variables, &weight));
        variables.decisions(problem).into_iter().for_each(|(var, preferred)| model.add_decision(var, preferred));

        Self { model, variables, weight }
    }
}
