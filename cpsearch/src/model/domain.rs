#[cfg(test)]
#[path = "../../tests/unit/model/domain_test.rs"]
mod domain_test;

use std::fmt;

/// An identifier of a variable inside a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Returns the position of the variable inside the model.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An inclusive integer interval of values a variable can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domain {
    /// A lower bound.
    pub lb: i64,
    /// An upper bound.
    pub ub: i64,
}

impl Domain {
    /// Creates a new domain `[lb, ub]`.
    pub fn new(lb: i64, ub: i64) -> Self {
        Self { lb, ub }
    }

    /// Creates a boolean domain `[0, 1]`.
    pub fn boolean() -> Self {
        Self { lb: 0, ub: 1 }
    }

    /// Creates a domain with a single value.
    pub fn fixed(value: i64) -> Self {
        Self { lb: value, ub: value }
    }

    /// Returns true if domain has exactly one value.
    pub fn is_fixed(&self) -> bool {
        self.lb == self.ub
    }

    /// Returns true if domain has no values.
    pub fn is_empty(&self) -> bool {
        self.lb > self.ub
    }

    /// Checks whether value belongs to the domain.
    pub fn contains(&self, value: i64) -> bool {
        self.lb <= value && value <= self.ub
    }

    /// Returns amount of values in the domain.
    pub fn size(&self) -> u64 {
        if self.is_empty() { 0 } else { self.ub.abs_diff(self.lb) + 1 }
    }
}
