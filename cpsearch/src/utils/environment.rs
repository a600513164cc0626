use super::{Quota, ThreadPool};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the solver.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies amount of worker threads used by the search and the way to run work on them.
#[derive(Clone)]
pub struct Parallelism {
    available_cpus: usize,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Default for Parallelism {
    fn default() -> Self {
        Self { available_cpus: get_cpus(), thread_pool: None }
    }
}

impl Parallelism {
    /// Creates an instance of `Parallelism` with a dedicated thread pool of given size.
    pub fn new(num_threads: usize) -> Self {
        let num_threads = num_threads.max(1);
        Self { available_cpus: num_threads, thread_pool: Some(Arc::new(ThreadPool::new(num_threads))) }
    }

    /// Amount of available CPUs (workers).
    pub fn available_cpus(&self) -> usize {
        self.available_cpus
    }

    /// Executes operation on the dedicated thread pool when it is configured,
    /// on the global one otherwise.
    pub fn thread_pool_execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        if let Some(thread_pool) = self.thread_pool.as_ref() { thread_pool.execute(op) } else { op() }
    }
}

/// Keeps track of environment specific information which influences search behavior.
#[derive(Clone)]
pub struct Environment {
    /// A computational quota for a search.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(quota: Option<Arc<dyn Quota + Send + Sync>>, parallelism: Parallelism, logger: InfoLogger) -> Self {
        Self { quota, parallelism, logger }
    }

    /// Returns true when the quota is set and reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }

    /// Creates a logger which does nothing.
    pub fn silent_logger() -> InfoLogger {
        Arc::new(|_: &str| {})
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(None, Parallelism::default(), Arc::new(|msg: &str| println!("{msg}")))
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
