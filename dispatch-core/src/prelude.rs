//! This module reimports commonly used types.

pub use crate::models::DistanceMatrix;
pub use crate::models::Event;
pub use crate::models::EventAssignment;
pub use crate::models::Job;
pub use crate::models::Leg;
pub use crate::models::Optimality;
pub use crate::models::Problem;
pub use crate::models::Route;
pub use crate::models::ScheduleEntry;
pub use crate::models::Solution;
pub use crate::models::Stop;
pub use crate::models::Technician;
pub use crate::models::ValidationError;

pub use crate::solver::Infeasibility;
pub use crate::solver::Outcome;
pub use crate::solver::SolveError;
pub use crate::solver::Solver;
pub use crate::solver::SolverConfig;

pub use crate::heuristics::AssignmentRequest;
pub use crate::heuristics::AutoScheduler;
pub use crate::heuristics::RoundRobinScheduler;
pub use crate::heuristics::SkillAwareScheduler;

pub use cpsearch::prelude::Environment;
pub use cpsearch::prelude::GenericError;
pub use cpsearch::prelude::GenericResult;
pub use cpsearch::prelude::SearchEngine;
