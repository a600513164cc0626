#[cfg(test)]
#[path = "../../tests/unit/search/propagation_test.rs"]
mod propagation_test;

use super::DomainStore;
use crate::model::{LinearExpr, Model, Relation};
use std::collections::VecDeque;

/// Signals that current domains cannot satisfy constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict;

/// A normalized constraint `Σ a_i * x_i <= rhs` active when enforcement literal is true.
struct LessEqual {
    terms: Vec<(i64, usize)>,
    rhs: i64,
    enforcement: Option<usize>,
}

/// Keeps constraints waiting for propagation.
pub struct PropagationQueue {
    queue: VecDeque<usize>,
    in_queue: Vec<bool>,
}

impl PropagationQueue {
    fn new(size: usize) -> Self {
        Self { queue: VecDeque::with_capacity(size), in_queue: vec![false; size] }
    }

    fn push(&mut self, idx: usize) {
        if !self.in_queue[idx] {
            self.in_queue[idx] = true;
            self.queue.push_back(idx);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let idx = self.queue.pop_front()?;
        self.in_queue[idx] = false;

        Some(idx)
    }

    fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

/// Propagates variable bounds through linear constraints until a fixpoint is reached.
///
/// Equalities are split into two inequalities, `>=` is negated into `<=`. A conditional
/// constraint is propagated only when its literal is true; when the literal is undecided and the
/// constraint cannot hold anymore, the literal is fixed to false. The objective cut
/// `objective >= cut` is kept as the last constraint and is active only when a cut is given.
pub struct Propagator {
    constraints: Vec<LessEqual>,
    watches: Vec<Vec<usize>>,
    cut_index: usize,
}

impl Propagator {
    /// Creates a new instance of `Propagator` for the model.
    pub fn new(model: &Model) -> Self {
        let mut constraints = Vec::with_capacity(model.constraint_count() + 1);

        model.constraints().iter().for_each(|constraint| {
            let enforcement = constraint.enforcement.map(|literal| literal.index());
            let rhs = constraint.rhs - constraint.expr.get_constant();
            let terms = merge_terms(&constraint.expr);
            let negated = || terms.iter().map(|&(a, v)| (-a, v)).collect::<Vec<_>>();

            match constraint.relation {
                Relation::Le => constraints.push(LessEqual { terms: terms.clone(), rhs, enforcement }),
                Relation::Ge => constraints.push(LessEqual { terms: negated(), rhs: -rhs, enforcement }),
                Relation::Eq => {
                    constraints.push(LessEqual { terms: terms.clone(), rhs, enforcement });
                    constraints.push(LessEqual { terms: negated(), rhs: -rhs, enforcement });
                }
            }
        });

        let objective = merge_terms(model.objective());
        let objective_constant = model.objective().get_constant();
        let cut_index = constraints.len();
        // rhs of the cut is computed on demand from the incumbent
        constraints.push(LessEqual {
            terms: objective.iter().map(|&(a, v)| (-a, v)).collect(),
            rhs: objective_constant,
            enforcement: None,
        });

        let mut watches = vec![Vec::new(); model.var_count()];
        constraints.iter().enumerate().for_each(|(idx, constraint)| {
            constraint.terms.iter().for_each(|&(_, var)| watches[var].push(idx));
            if let Some(literal) = constraint.enforcement {
                watches[literal].push(idx);
            }
        });

        Self { constraints, watches, cut_index }
    }

    /// Creates a queue which fits all constraints of this propagator.
    pub fn create_queue(&self) -> PropagationQueue {
        PropagationQueue::new(self.constraints.len())
    }

    /// Schedules all constraints for propagation.
    pub fn schedule_all(&self, queue: &mut PropagationQueue) {
        (0..self.constraints.len()).for_each(|idx| queue.push(idx));
    }

    /// Schedules constraints which depend on the variable.
    pub fn schedule_var(&self, var: usize, queue: &mut PropagationQueue) {
        self.watches[var].iter().for_each(|&idx| queue.push(idx));
    }

    /// Schedules the objective cut.
    pub fn schedule_cut(&self, queue: &mut PropagationQueue) {
        queue.push(self.cut_index);
    }

    /// Runs propagation of scheduled constraints until the fixpoint is reached. The cut, when
    /// specified, forces the objective to be at least of its value.
    pub fn propagate(
        &self,
        store: &mut DomainStore,
        queue: &mut PropagationQueue,
        cut: Option<i64>,
    ) -> Result<(), Conflict> {
        while let Some(idx) = queue.pop() {
            if let Err(conflict) = self.propagate_constraint(idx, store, queue, cut) {
                queue.clear();
                return Err(conflict);
            }
        }

        Ok(())
    }

    fn propagate_constraint(
        &self,
        idx: usize,
        store: &mut DomainStore,
        queue: &mut PropagationQueue,
        cut: Option<i64>,
    ) -> Result<(), Conflict> {
        let constraint = &self.constraints[idx];
        let rhs = if idx == self.cut_index {
            match cut {
                Some(cut) => constraint.rhs - cut,
                None => return Ok(()),
            }
        } else {
            constraint.rhs
        };

        let min_activity = constraint.terms.iter().map(|&(a, v)| min_term(a, v, store)).sum::<i64>();

        if let Some(literal) = constraint.enforcement {
            if store.ub(literal) == 0 {
                return Ok(());
            }

            if store.lb(literal) == 0 {
                if min_activity > rhs && store.set_ub(literal, 0)? {
                    self.schedule_var(literal, queue);
                }
                return Ok(());
            }
        }

        if min_activity > rhs {
            return Err(Conflict);
        }

        for &(a, v) in constraint.terms.iter() {
            let slack = rhs - (min_activity - min_term(a, v, store));
            let changed = if a > 0 {
                store.set_ub(v, slack.div_euclid(a))?
            } else {
                store.set_lb(v, -slack.div_euclid(-a))?
            };

            if changed {
                self.schedule_var(v, queue);
            }
        }

        Ok(())
    }
}

#[inline]
fn min_term(a: i64, var: usize, store: &DomainStore) -> i64 {
    if a > 0 { a * store.lb(var) } else { a * store.ub(var) }
}

/// Merges coefficients of repeated variables and drops zero terms.
fn merge_terms(expr: &LinearExpr) -> Vec<(i64, usize)> {
    let mut terms = expr.terms().iter().map(|&(a, var)| (var.index(), a)).collect::<Vec<_>>();
    terms.sort_by_key(|&(var, _)| var);

    terms
        .chunk_by(|left, right| left.0 == right.0)
        .map(|chunk| (chunk.iter().map(|&(_, a)| a).sum::<i64>(), chunk[0].0))
        .filter(|&(a, _)| a != 0)
        .collect()
}
