use std::time::Instant;

/// Implements a performance timer used to measure search phases and to drive time quotas.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns elapsed time in seconds as a float.
    pub fn elapsed_secs_as_float(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Returns elapsed time in milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}
