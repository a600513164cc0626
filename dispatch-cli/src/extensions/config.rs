//! Solver configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

use cpsearch::prelude::*;
use cpsearch::utils::Parallelism;
use dispatch_core::solver::{Solver, SolverConfig};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// A solver configuration. All settings are optional, missing ones get default values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies model settings.
    pub model: Option<ModelConfig>,
    /// Specifies search engine settings.
    pub search: Option<SearchConfig>,
    /// Specifies search termination settings.
    pub termination: Option<TerminationConfig>,
    /// Specifies environment settings.
    pub environment: Option<EnvironmentConfig>,
    /// Specifies telemetry settings.
    pub telemetry: Option<TelemetryConfig>,
}

/// A model configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// The latest allowed job start time.
    pub working_window: Option<i64>,
    /// A weight of travel distance in the objective.
    pub distance_weight: Option<f64>,
}

/// A branch-and-bound search configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Amount of subproblems created per worker thread.
    pub subproblems_per_worker: Option<usize>,
    /// Amount of search nodes between quota checks.
    pub quota_check_frequency: Option<u64>,
}

/// A termination configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminationConfig {
    /// Max time in seconds.
    pub max_time: Option<f64>,
}

/// An environment configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Specifies data parallelism settings.
    pub parallelism: Option<ParallelismConfig>,
}

/// A data parallelism configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelismConfig {
    /// Amount of worker threads.
    pub num_threads: usize,
}

/// A telemetry configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Specifies logging settings.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Enables logging to stdout.
    pub enabled: bool,
    /// A prefix of every log message.
    pub prefix: Option<String>,
}

impl Config {
    /// Returns max time, if specified.
    pub fn max_time(&self) -> Option<f64> {
        self.termination.as_ref().and_then(|termination| termination.max_time)
    }

    /// Returns true if logging is enabled.
    pub fn is_logging_enabled(&self) -> bool {
        self.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref()).is_some_and(|logging| logging.enabled)
    }
}

/// Reads config from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates a solver configuration. Time limit and parallelism are left to the environment.
pub fn create_solver_config(config: &Config) -> SolverConfig {
    let model = config.model.clone().unwrap_or_default();
    let solver_config = SolverConfig::default();

    SolverConfig {
        working_window: model.working_window.unwrap_or(solver_config.working_window),
        distance_weight: model.distance_weight.unwrap_or(solver_config.distance_weight),
        ..solver_config
    }
}

/// Creates a search engine.
pub fn create_search_engine(config: &Config) -> Arc<dyn SearchEngine + Send + Sync> {
    match config.search.as_ref() {
        Some(search) => Arc::new(BranchAndBound::new(
            search.subproblems_per_worker.unwrap_or(4),
            search.quota_check_frequency.unwrap_or(64),
        )),
        None => Arc::new(BranchAndBound::default()),
    }
}

/// Creates an environment with given quota.
pub fn create_environment(config: &Config, quota: Option<Arc<dyn Quota + Send + Sync>>) -> Environment {
    let parallelism = get_num_threads(config).map(Parallelism::new).unwrap_or_default();

    Environment::new(quota, parallelism, create_logger(config))
}

/// Creates a solver from config.
pub fn create_solver_from_config(config: &Config, quota: Option<Arc<dyn Quota + Send + Sync>>) -> Solver {
    Solver::new(create_solver_config(config), create_environment(config, quota)).with_engine(create_search_engine(config))
}

fn create_logger(config: &Config) -> InfoLogger {
    let logging = config.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref());

    match logging {
        Some(LoggingConfig { enabled: true, prefix }) => {
            let prefix = prefix.clone().unwrap_or_default();
            Arc::new(move |msg: &str| println!("{prefix}{msg}"))
        }
        _ => Environment::silent_logger(),
    }
}

fn get_num_threads(config: &Config) -> Option<usize> {
    config.environment.as_ref().and_then(|environment| environment.parallelism.as_ref()).map(|p| p.num_threads)
}
