#[cfg(test)]
#[path = "../../tests/unit/search/incumbent_test.rs"]
mod incumbent_test;

use super::Values;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

const NO_OBJECTIVE: i64 = i64::MIN;

/// Keeps the best solution found by concurrent workers.
///
/// The objective is mirrored in an atomic to allow cheap reads while the values are guarded by
/// a mutex. A candidate replaces the incumbent only when it strictly improves the objective.
#[derive(Debug)]
pub struct SharedIncumbent {
    best_objective: AtomicI64,
    best: Mutex<Option<(i64, Values)>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self { best_objective: AtomicI64::new(NO_OBJECTIVE), best: Mutex::new(None) }
    }
}

impl SharedIncumbent {
    /// Returns objective of the best known solution without locking.
    #[inline]
    pub fn peek(&self) -> Option<i64> {
        match self.best_objective.load(Ordering::Acquire) {
            NO_OBJECTIVE => None,
            objective => Some(objective),
        }
    }

    /// Tries to replace the incumbent. Returns true if candidate was accepted.
    pub fn try_update(&self, objective: i64, values: &[i64]) -> bool {
        if self.peek().is_some_and(|best| objective <= best) {
            return false;
        }

        let mut best_guard = self.best.lock();
        if best_guard.as_ref().is_some_and(|(best, _)| objective <= *best) {
            return false;
        }

        *best_guard = Some((objective, values.to_vec()));
        self.best_objective.store(objective, Ordering::Release);

        true
    }

    /// Consumes the incumbent returning the best known solution.
    pub fn into_inner(self) -> Option<(i64, Values)> {
        self.best.into_inner()
    }
}
