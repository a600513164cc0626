#[cfg(test)]
#[path = "../../tests/unit/search/branch_bound_test.rs"]
mod branch_bound_test;

use super::*;
use crate::utils::{Timer, parallel_into_collect};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// A branch-and-bound search with bounds propagation.
///
/// The tree is explored depth first: decisions of the model come first, in their order and
/// with their preferred value tried first, then the remaining variables with the smallest domain.
/// Every node is propagated to a fixpoint together with the cut `objective >= incumbent + 1`, so
/// only strictly improving solutions are accepted. The top of the tree is split into subproblems
/// which are explored in parallel sharing the incumbent and the stop signal.
pub struct BranchAndBound {
    subproblems_per_worker: usize,
    quota_check_frequency: u64,
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self { subproblems_per_worker: 4, quota_check_frequency: 64 }
    }
}

impl BranchAndBound {
    /// Creates a new instance of `BranchAndBound`.
    pub fn new(subproblems_per_worker: usize, quota_check_frequency: u64) -> Self {
        Self { subproblems_per_worker: subproblems_per_worker.max(1), quota_check_frequency: quota_check_frequency.max(1) }
    }
}

impl SearchEngine for BranchAndBound {
    fn search(&self, model: &Model, environment: &Environment) -> SearchResult {
        let timer = Timer::start();
        let context = SearchContext {
            model,
            environment,
            propagator: Propagator::new(model),
            incumbent: SharedIncumbent::default(),
            stop: AtomicBool::new(false),
            incomplete: AtomicBool::new(false),
            quota_check_frequency: self.quota_check_frequency,
            timer: timer.clone(),
        };

        let mut statistics = SearchStatistics::default();
        let subproblems = self.split(&context, &mut statistics);
        statistics.subproblems = subproblems.len();

        (environment.logger)(&format!(
            "[{}ms] search '{}' started: {} variables, {} constraints, {} subproblems on {} workers",
            timer.elapsed_millis(),
            model.name(),
            model.var_count(),
            model.constraint_count(),
            subproblems.len(),
            environment.parallelism.available_cpus()
        ));

        let worker_statistics = environment.parallelism.thread_pool_execute(|| {
            parallel_into_collect(subproblems, |store| Worker::new(&context).run(store))
        });
        worker_statistics.iter().for_each(|other| statistics.merge(other));
        statistics.elapsed_millis = timer.elapsed_millis();

        // a stop signal alone does not matter when every subproblem was exhausted before it
        let is_incomplete = context.incomplete.load(Ordering::Acquire);
        let best = context.incumbent.into_inner();
        let status = match (best.is_some(), is_incomplete) {
            (true, false) => SearchStatus::Optimal,
            (true, true) => SearchStatus::Feasible,
            (false, false) => SearchStatus::Infeasible,
            (false, true) => SearchStatus::Unknown,
        };

        (environment.logger)(&format!(
            "[{}ms] search finished with {:?}: objective {}, nodes {}, failures {}, solutions {}",
            statistics.elapsed_millis,
            status,
            best.as_ref().map_or("none".to_string(), |(objective, _)| objective.to_string()),
            statistics.nodes,
            statistics.failures,
            statistics.solutions
        ));

        let (objective, values) = best.map_or((None, None), |(objective, values)| (Some(objective), Some(values)));

        SearchResult { status, values, objective, statistics }
    }
}

impl BranchAndBound {
    /// Expands the top of the search tree breadth first until there are enough open nodes to
    /// keep all workers busy. A narrow tree can keep the frontier small for long, so the quota
    /// and the incumbent cut apply here as well. Open nodes left after a stop are still returned:
    /// workers mark them as unexplored.
    fn split(&self, context: &SearchContext, statistics: &mut SearchStatistics) -> Vec<DomainStore> {
        let mut root = DomainStore::new(context.model.domains());
        let mut queue = context.propagator.create_queue();
        context.propagator.schedule_all(&mut queue);
        statistics.nodes += 1;

        if context.propagator.propagate(&mut root, &mut queue, None).is_err() {
            statistics.failures += 1;
            return vec![];
        }

        let target = context.environment.parallelism.available_cpus() * self.subproblems_per_worker;
        let mut frontier = VecDeque::from(vec![root]);
        let mut iterations = 0_u64;

        while frontier.len() < target {
            iterations += 1;
            if context.should_stop(iterations) {
                break;
            }

            let Some(store) = frontier.pop_front() else { break };

            match select_branches(context.model, &store) {
                None => context.submit(&store, statistics),
                Some(branches) => branches.into_iter().for_each(|branch| {
                    let mut child = store.snapshot();
                    statistics.nodes += 1;

                    let cut = context.cut();
                    if cut.is_some() {
                        context.propagator.schedule_cut(&mut queue);
                    }
                    if apply_branch(branch, &mut child, &context.propagator, &mut queue, cut).is_ok() {
                        frontier.push_back(child);
                    } else {
                        statistics.failures += 1;
                    }
                }),
            }
        }

        frontier.into()
    }
}

/// Specifies how the domain of a variable is reduced in a child node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
    Fix(usize, i64),
    AtLeast(usize, i64),
    AtMost(usize, i64),
}

/// A state shared by all workers.
struct SearchContext<'a> {
    model: &'a Model,
    environment: &'a Environment,
    propagator: Propagator,
    incumbent: SharedIncumbent,
    stop: AtomicBool,
    incomplete: AtomicBool,
    quota_check_frequency: u64,
    timer: Timer,
}

impl SearchContext<'_> {
    /// Returns the lower bound for the objective of any new incumbent.
    fn cut(&self) -> Option<i64> {
        self.incumbent.peek().map(|best| best + 1)
    }

    /// Checks the shared stop signal, the quota is consulted every `quota_check_frequency` calls.
    fn should_stop(&self, counter: u64) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        if counter % self.quota_check_frequency == 0 && self.environment.is_quota_reached() {
            self.stop.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Verifies a leaf and offers it to the incumbent.
    fn submit(&self, store: &DomainStore, statistics: &mut SearchStatistics) {
        let Some(values) = store.values() else { return };

        if let Err(err) = self.model.check_values(&values) {
            statistics.failures += 1;
            (self.environment.logger)(&format!("leaf rejected on verification: {err}"));
            return;
        }

        let objective = self.model.objective().evaluate(&values);
        if self.incumbent.try_update(objective, &values) {
            statistics.solutions += 1;
            (self.environment.logger)(&format!(
                "[{}ms] new incumbent with objective {objective}",
                self.timer.elapsed_millis()
            ));
        }
    }
}

/// A node of the explicit depth first stack.
struct Frame {
    checkpoint: usize,
    branches: Vec<Branch>,
    next: usize,
}

/// Explores one subproblem depth first.
struct Worker<'a> {
    context: &'a SearchContext<'a>,
    queue: PropagationQueue,
    statistics: SearchStatistics,
}

impl<'a> Worker<'a> {
    fn new(context: &'a SearchContext<'a>) -> Self {
        Self { context, queue: context.propagator.create_queue(), statistics: SearchStatistics::default() }
    }

    fn run(mut self, mut store: DomainStore) -> SearchStatistics {
        let mut stack = Vec::new();
        stack.extend(self.expand(&mut store));

        while !stack.is_empty() && !self.should_stop() {
            let (checkpoint, branch) = match stack.last_mut() {
                Some(frame) => {
                    let branch = frame.branches.get(frame.next).copied();
                    frame.next += 1;
                    (frame.checkpoint, branch)
                }
                None => break,
            };

            store.backtrack(checkpoint);

            let Some(branch) = branch else {
                stack.pop();
                continue;
            };

            let cut = self.context.cut();
            if apply_branch(branch, &mut store, &self.context.propagator, &mut self.queue, cut).is_err() {
                self.statistics.failures += 1;
                continue;
            }

            stack.extend(self.expand(&mut store));
        }

        if stack.iter().any(|frame| frame.next < frame.branches.len()) {
            self.context.incomplete.store(true, Ordering::Release);
        }

        self.statistics
    }

    /// Processes a node: applies the latest cut, submits a leaf or returns a frame to branch on.
    fn expand(&mut self, store: &mut DomainStore) -> Option<Frame> {
        self.statistics.nodes += 1;

        let cut = self.context.cut();
        if cut.is_some() {
            self.context.propagator.schedule_cut(&mut self.queue);
            if self.context.propagator.propagate(store, &mut self.queue, cut).is_err() {
                self.statistics.failures += 1;
                return None;
            }
        }

        match select_branches(self.context.model, store) {
            Some(branches) => Some(Frame { checkpoint: store.checkpoint(), branches, next: 0 }),
            None => {
                self.context.submit(store, &mut self.statistics);
                None
            }
        }
    }

    fn should_stop(&self) -> bool {
        self.context.should_stop(self.statistics.nodes)
    }
}

/// Returns branches for the next variable or `None` when all variables are fixed.
fn select_branches(model: &Model, store: &DomainStore) -> Option<Vec<Branch>> {
    if let Some(decision) = model.decisions().iter().find(|decision| !store.is_fixed(decision.var.index())) {
        let var = decision.var.index();
        let (lb, ub) = (store.lb(var), store.ub(var));
        let preferred = decision.preferred.clamp(lb, ub);

        return Some(if preferred == lb {
            vec![Branch::Fix(var, preferred), Branch::AtLeast(var, preferred + 1)]
        } else if preferred == ub {
            vec![Branch::Fix(var, preferred), Branch::AtMost(var, preferred - 1)]
        } else {
            vec![Branch::Fix(var, preferred), Branch::AtMost(var, preferred - 1), Branch::AtLeast(var, preferred + 1)]
        });
    }

    (0..store.len())
        .filter(|&var| !store.is_fixed(var))
        .min_by_key(|&var| (store.domain(var).size(), var))
        .map(|var| vec![Branch::Fix(var, store.lb(var)), Branch::AtLeast(var, store.lb(var) + 1)])
}

fn apply_branch(
    branch: Branch,
    store: &mut DomainStore,
    propagator: &Propagator,
    queue: &mut PropagationQueue,
    cut: Option<i64>,
) -> Result<(), Conflict> {
    let (var, changed) = match branch {
        Branch::Fix(var, value) => {
            let lb_changed = store.set_lb(var, value)?;
            let ub_changed = store.set_ub(var, value)?;
            (var, lb_changed || ub_changed)
        }
        Branch::AtLeast(var, value) => (var, store.set_lb(var, value)?),
        Branch::AtMost(var, value) => (var, store.set_ub(var, value)?),
    };

    if changed {
        propagator.schedule_var(var, queue);
    }

    propagator.propagate(store, queue, cut)
}
