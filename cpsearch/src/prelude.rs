//! This module reimports a common used types.

pub use crate::model::Domain;
pub use crate::model::LinearConstraint;
pub use crate::model::LinearExpr;
pub use crate::model::Model;
pub use crate::model::Relation;
pub use crate::model::VarId;

pub use crate::search::BranchAndBound;
pub use crate::search::SearchEngine;
pub use crate::search::SearchResult;
pub use crate::search::SearchStatistics;
pub use crate::search::SearchStatus;
pub use crate::search::Values;

pub use crate::utils::Environment;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::Quota;
pub use crate::utils::TimeQuota;
pub use crate::utils::Timer;
