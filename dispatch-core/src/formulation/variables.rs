#[cfg(test)]
#[path = "../../tests/unit/formulation/variables_test.rs"]
mod variables_test;

use crate::models::Problem;
use cpsearch::model::{Model, VarId};

/// Keeps decision variables of the problem and maps problem entities to them.
///
/// For `J` jobs and `T` technicians the model has:
/// - `x[j,t]`: job `j` is assigned to technician `t`;
/// - `arc[t,i,j]`, `i != j`: technician `t` travels directly from job `i` to job `j`;
/// - `start[j]`: job start time in `[0, W]`;
/// - `startsRoute[t,j]`, `endsRoute[t,j]`: job `j` is the first/last stop of technician `t`;
/// - `rank[j]`: job position in its route, in `[0, J - 1]`.
pub struct VariableModel {
    jobs: usize,
    technicians: usize,
    assign: Vec<VarId>,
    arcs: Vec<Option<VarId>>,
    starts: Vec<VarId>,
    starts_route: Vec<VarId>,
    ends_route: Vec<VarId>,
    ranks: Vec<VarId>,
}

impl VariableModel {
    /// Creates all variables of the problem inside the model.
    pub fn new(problem: &Problem, working_window: i64, model: &mut Model) -> Self {
        let (jobs, technicians) = (problem.jobs(), problem.technicians());
        let (job_count, technician_count) = (jobs.len(), technicians.len());

        let assign = jobs
            .iter()
            .flat_map(|job| technicians.iter().map(move |technician| (job, technician)))
            .map(|(job, technician)| model.new_bool_var(format!("x[{},{}]", job.id, technician.id)))
            .collect();

        let mut arcs = Vec::with_capacity(technician_count * job_count * job_count);
        for technician in technicians {
            for (from_idx, from) in jobs.iter().enumerate() {
                for (to_idx, to) in jobs.iter().enumerate() {
                    arcs.push(if from_idx == to_idx {
                        None
                    } else {
                        Some(model.new_bool_var(format!("arc[{},{},{}]", technician.id, from.id, to.id)))
                    });
                }
            }
        }

        let starts =
            jobs.iter().map(|job| model.new_int_var(0, working_window, format!("start[{}]", job.id))).collect();

        let mut create_boundary = |prefix: &str| -> Vec<VarId> {
            technicians
                .iter()
                .flat_map(|technician| jobs.iter().map(move |job| (technician, job)))
                .map(|(technician, job)| model.new_bool_var(format!("{prefix}[{},{}]", technician.id, job.id)))
                .collect()
        };
        let starts_route = create_boundary("startsRoute");
        let ends_route = create_boundary("endsRoute");

        let max_rank = job_count.saturating_sub(1) as i64;
        let ranks = jobs.iter().map(|job| model.new_int_var(0, max_rank, format!("rank[{}]", job.id))).collect();

        Self { jobs: job_count, technicians: technician_count, assign, arcs, starts, starts_route, ends_route, ranks }
    }

    /// Returns amount of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs
    }

    /// Returns amount of technicians.
    pub fn technician_count(&self) -> usize {
        self.technicians
    }

    /// Returns `x[j,t]` variable.
    pub fn assign(&self, job: usize, technician: usize) -> VarId {
        self.assign[job * self.technicians + technician]
    }

    /// Returns `arc[t,i,j]` variable or `None` for a self loop.
    pub fn arc(&self, technician: usize, from_job: usize, to_job: usize) -> Option<VarId> {
        self.arcs[(technician * self.jobs + from_job) * self.jobs + to_job]
    }

    /// Returns `start[j]` variable.
    pub fn start(&self, job: usize) -> VarId {
        self.starts[job]
    }

    /// Returns `startsRoute[t,j]` variable.
    pub fn starts_route(&self, technician: usize, job: usize) -> VarId {
        self.starts_route[technician * self.jobs + job]
    }

    /// Returns `endsRoute[t,j]` variable.
    pub fn ends_route(&self, technician: usize, job: usize) -> VarId {
        self.ends_route[technician * self.jobs + job]
    }

    /// Returns `rank[j]` variable.
    pub fn rank(&self, job: usize) -> VarId {
        self.ranks[job]
    }

    /// Returns incoming arcs of the job for the technician.
    pub fn incoming_arcs(&self, technician: usize, job: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.jobs).filter_map(move |from| self.arc(technician, from, job))
    }

    /// Returns outgoing arcs of the job for the technician.
    pub fn outgoing_arcs(&self, technician: usize, job: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.jobs).filter_map(move |to| self.arc(technician, job, to))
    }

    /// Returns the branching order with preferred values: assignments of every job to its
    /// eligible technicians (closest home base first), then per technician route starts (closest
    /// to home first), arcs in ascending distance and route ends.
    pub fn decisions(&self, problem: &Problem) -> Vec<(VarId, i64)> {
        let mut decisions = Vec::new();

        (0..self.jobs).for_each(|job| {
            let mut technicians = problem.eligible_technicians(job).collect::<Vec<_>>();
            technicians.sort_by_key(|&technician| (problem.home_to_job_distance(technician, job), technician));
            decisions.extend(technicians.into_iter().map(|technician| (self.assign(job, technician), 1)));
        });

        (0..self.technicians).for_each(|technician| {
            let mut jobs = (0..self.jobs).filter(|&job| problem.is_eligible(job, technician)).collect::<Vec<_>>();
            jobs.sort_by_key(|&job| (problem.home_to_job_distance(technician, job), job));
            decisions.extend(jobs.iter().map(|&job| (self.starts_route(technician, job), 1)));

            let mut arcs = jobs
                .iter()
                .flat_map(|&from| jobs.iter().map(move |&to| (from, to)))
                .filter(|(from, to)| from != to)
                .map(|(from, to)| (problem.job_distance(from, to), from, to))
                .collect::<Vec<_>>();
            arcs.sort_unstable();
            decisions.extend(
                arcs.into_iter().filter_map(|(_, from, to)| self.arc(technician, from, to)).map(|arc| (arc, 1)),
            );

            decisions.extend(jobs.iter().map(|&job| (self.ends_route(technician, job), 1)));
        });

        decisions
    }
}
