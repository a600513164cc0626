#[cfg(test)]
#[path = "../../tests/unit/search/store_test.rs"]
mod store_test;

use super::Conflict;
use crate::model::Domain;

/// Keeps current variable bounds and a trail of changes to restore them on backtracking.
#[derive(Clone, Debug)]
pub struct DomainStore {
    lbs: Vec<i64>,
    ubs: Vec<i64>,
    trail: Vec<(usize, i64, i64)>,
}

impl DomainStore {
    /// Creates a new store from initial domains.
    pub fn new(domains: &[Domain]) -> Self {
        Self {
            lbs: domains.iter().map(|domain| domain.lb).collect(),
            ubs: domains.iter().map(|domain| domain.ub).collect(),
            trail: vec![],
        }
    }

    /// Returns amount of variables.
    pub fn len(&self) -> usize {
        self.lbs.len()
    }

    /// Returns true if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.lbs.is_empty()
    }

    /// Returns the lower bound of the variable.
    #[inline]
    pub fn lb(&self, var: usize) -> i64 {
        self.lbs[var]
    }

    /// Returns the upper bound of the variable.
    #[inline]
    pub fn ub(&self, var: usize) -> i64 {
        self.ubs[var]
    }

    /// Returns the current domain of the variable.
    pub fn domain(&self, var: usize) -> Domain {
        Domain::new(self.lbs[var], self.ubs[var])
    }

    /// Returns true if variable has a single value.
    #[inline]
    pub fn is_fixed(&self, var: usize) -> bool {
        self.lbs[var] == self.ubs[var]
    }

    /// Returns true if all variables have a single value.
    pub fn is_all_fixed(&self) -> bool {
        self.lbs.iter().zip(self.ubs.iter()).all(|(lb, ub)| lb == ub)
    }

    /// Raises the lower bound. Returns true if the domain has changed.
    pub fn set_lb(&mut self, var: usize, value: i64) -> Result<bool, Conflict> {
        if value <= self.lbs[var] {
            return Ok(false);
        }

        if value > self.ubs[var] {
            return Err(Conflict);
        }

        self.trail.push((var, self.lbs[var], self.ubs[var]));
        self.lbs[var] = value;

        Ok(true)
    }

    /// Lowers the upper bound. Returns true if the domain has changed.
    pub fn set_ub(&mut self, var: usize, value: i64) -> Result<bool, Conflict> {
        if value >= self.ubs[var] {
            return Ok(false);
        }

        if value < self.lbs[var] {
            return Err(Conflict);
        }

        self.trail.push((var, self.lbs[var], self.ubs[var]));
        self.ubs[var] = value;

        Ok(true)
    }

    /// Returns a checkpoint to backtrack to.
    pub fn checkpoint(&self) -> usize {
        self.trail.len()
    }

    /// Restores all domains changed after given checkpoint.
    pub fn backtrack(&mut self, checkpoint: usize) {
        while self.trail.len() > checkpoint {
            if let Some((var, lb, ub)) = self.trail.pop() {
                self.lbs[var] = lb;
                self.ubs[var] = ub;
            }
        }
    }

    /// Returns a copy of the store without the trail.
    pub fn snapshot(&self) -> Self {
        Self { lbs: self.lbs.clone(), ubs: self.ubs.clone(), trail: vec![] }
    }

    /// Returns values when all variables are fixed.
    pub fn values(&self) -> Option<Vec<i64>> {
        if self.is_all_fixed() { Some(self.lbs.clone()) } else { None }
    }
}
