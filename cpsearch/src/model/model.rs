#[cfg(test)]
#[path = "../../tests/unit/model/model_test.rs"]
mod model_test;

use super::*;
use crate::utils::GenericResult;

/// A branching hint: the variable to decide on and the value to try first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// A variable to branch on.
    pub var: VarId,
    /// A value which is tried first.
    pub preferred: i64,
}

/// An optimization model: variables, constraints and a linear objective to maximize.
pub struct Model {
    name: String,
    domains: Vec<Domain>,
    var_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    decisions: Vec<Decision>,
}

impl Model {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains: vec![],
            var_names: vec![],
            constraints: vec![],
            objective: LinearExpr::default(),
            decisions: vec![],
        }
    }

    /// Returns model name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Adds a new boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.new_var(Domain::boolean(), name)
    }

    /// Adds a new integer variable with `[lb, ub]` domain.
    pub fn new_int_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> VarId {
        self.new_var(Domain::new(lb, ub), name)
    }

    fn new_var(&mut self, domain: Domain, name: impl Into<String>) -> VarId {
        let id = VarId(self.domains.len());
        self.domains.push(domain);
        self.var_names.push(name.into());

        id
    }

    /// Adds a constraint and returns its index.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> usize {
        debug_assert!(constraint.expr.terms().iter().all(|(_, var)| var.index() < self.domains.len()));
        debug_assert!(constraint.enforcement.is_none_or(|literal| self.domains[literal.index()] == Domain::boolean()));

        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Sets the objective to maximize.
    pub fn maximize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Sets the objective to minimize. Internally it is kept as maximization of the negated
    /// expression, so reported objective values are negated too.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective.negated();
    }

    /// Appends a branching decision. Decisions are explored in insertion order before any other
    /// unfixed variable.
    pub fn add_decision(&mut self, var: VarId, preferred: i64) {
        self.decisions.push(Decision { var, preferred });
    }

    /// Returns amount of variables.
    pub fn var_count(&self) -> usize {
        self.domains.len()
    }

    /// Returns amount of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the initial domain of the variable.
    pub fn domain(&self, var: VarId) -> Domain {
        self.domains[var.index()]
    }

    /// Returns all initial domains indexed by variable.
    pub fn domains(&self) -> &[Domain] {
        self.domains.as_slice()
    }

    /// Returns the variable name.
    pub fn var_name(&self, var: VarId) -> &str {
        self.var_names[var.index()].as_str()
    }

    /// Returns constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        self.constraints.as_slice()
    }

    /// Returns the objective (maximization).
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Returns branching decisions.
    pub fn decisions(&self) -> &[Decision] {
        self.decisions.as_slice()
    }

    /// Checks that values are within domains and satisfy all constraints.
    pub fn check_values(&self, values: &[i64]) -> GenericResult<()> {
        if values.len() != self.domains.len() {
            return Err(format!("expected {} values, got {}", self.domains.len(), values.len()).into());
        }

        if let Some((idx, _)) = self.domains.iter().zip(values.iter()).enumerate().find(|(_, (d, v))| !d.contains(**v))
        {
            return Err(format!("value of '{}' is out of its domain", self.var_names[idx]).into());
        }

        match self.constraints.iter().enumerate().find(|(_, constraint)| !constraint.is_satisfied(values)) {
            Some((idx, constraint)) => {
                Err(format!("constraint '{}' is violated", constraint.name.clone().unwrap_or_else(|| idx.to_string()))
                    .into())
            }
            None => Ok(()),
        }
    }
}
