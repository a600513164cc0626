#[cfg(test)]
#[path = "../../tests/unit/model/linear_test.rs"]
mod linear_test;

use super::VarId;

/// A linear expression `Σ coefficient * variable + constant`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(i64, VarId)>,
    constant: i64,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an expression which sums given variables with unit coefficients.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self { terms: vars.into_iter().map(|var| (1, var)).collect(), constant: 0 }
    }

    /// Adds a term and returns the expression.
    pub fn term(mut self, coefficient: i64, var: VarId) -> Self {
        self.add_term(coefficient, var);
        self
    }

    /// Adds a constant and returns the expression.
    pub fn constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    /// Adds a term in place. Zero coefficients are ignored.
    pub fn add_term(&mut self, coefficient: i64, var: VarId) {
        if coefficient != 0 {
            self.terms.push((coefficient, var));
        }
    }

    /// Appends all terms and the constant of another expression.
    pub fn extend(&mut self, other: LinearExpr) {
        self.terms.extend(other.terms.into_iter().filter(|(coefficient, _)| *coefficient != 0));
        self.constant += other.constant;
    }

    /// Returns expression terms.
    pub fn terms(&self) -> &[(i64, VarId)] {
        self.terms.as_slice()
    }

    /// Returns the constant part of the expression.
    pub fn get_constant(&self) -> i64 {
        self.constant
    }

    /// Returns expression with all coefficients and the constant negated.
    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|&(coefficient, var)| (-coefficient, var)).collect(),
            constant: -self.constant,
        }
    }

    /// Evaluates expression on the full assignment of values indexed by variable.
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms.iter().map(|&(coefficient, var)| coefficient * values[var.index()]).sum::<i64>() + self.constant
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        Self::new().term(1, var)
    }
}

/// A relation between linear expression and right hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Less or equal.
    Le,
    /// Greater or equal.
    Ge,
    /// Equal.
    Eq,
}

/// A linear constraint `expr (<=|>=|==) rhs`, optionally enforced only when a boolean literal
/// is true (a conditional constraint).
#[derive(Clone, Debug)]
pub struct LinearConstraint {
    /// A left hand side.
    pub expr: LinearExpr,
    /// A relation.
    pub relation: Relation,
    /// A right hand side.
    pub rhs: i64,
    /// A boolean variable which has to be `1` for the constraint to be active.
    pub enforcement: Option<VarId>,
    /// A name used in diagnostics.
    pub name: Option<String>,
}

impl LinearConstraint {
    /// Creates a new constraint.
    pub fn new(expr: LinearExpr, relation: Relation, rhs: i64) -> Self {
        Self { expr, relation, rhs, enforcement: None, name: None }
    }

    /// Creates `expr <= rhs` constraint.
    pub fn le(expr: LinearExpr, rhs: i64) -> Self {
        Self::new(expr, Relation::Le, rhs)
    }

    /// Creates `expr >= rhs` constraint.
    pub fn ge(expr: LinearExpr, rhs: i64) -> Self {
        Self::new(expr, Relation::Ge, rhs)
    }

    /// Creates `expr == rhs` constraint.
    pub fn eq(expr: LinearExpr, rhs: i64) -> Self {
        Self::new(expr, Relation::Eq, rhs)
    }

    /// Makes the constraint active only when given boolean variable is true.
    pub fn only_enforce_if(mut self, literal: VarId) -> Self {
        self.enforcement = Some(literal);
        self
    }

    /// Sets the constraint name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Checks the constraint on the full assignment of values indexed by variable.
    /// An inactive conditional constraint is always satisfied.
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        if self.enforcement.is_some_and(|literal| values[literal.index()] == 0) {
            return true;
        }

        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Le => lhs <= self.rhs,
            Relation::Ge => lhs >= self.rhs,
            Relation::Eq => lhs == self.rhs,
        }
    }
}
