//! Interruption handler.

use cpsearch::utils::{Quota, TimeQuota};
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static SHOULD_INTERRUPT: AtomicBool = AtomicBool::new(false);
static HANDLER: Once = Once::new();

/// Creates interruption quota which is reached on Ctrl-C or when max time is exceeded.
pub fn create_interruption_quota(max_time: Option<f64>) -> Arc<dyn Quota + Send + Sync> {
    let inner = max_time.map::<Arc<dyn Quota + Send + Sync>, _>(|time| Arc::new(TimeQuota::new(time)));

    // the handler can be set only once per process
    HANDLER.call_once(|| {
        if let Err(err) = ctrlc::set_handler(|| SHOULD_INTERRUPT.store(true, Ordering::Relaxed)) {
            eprintln!("cannot set interruption handler: '{err}'");
        }
    });

    Arc::new(InterruptionQuota { inner })
}

struct InterruptionQuota {
    inner: Option<Arc<dyn Quota + Send + Sync>>,
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is_reached()) || SHOULD_INTERRUPT.load(Ordering::Relaxed)
    }
}
