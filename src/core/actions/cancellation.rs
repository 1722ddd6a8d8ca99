use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// How many cells a worker computes between two cancellation polls.
pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "render cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Cancels a job once a newer generation has been submitted or the owner is
/// shutting down.
#[derive(Debug, Clone, Copy)]
pub struct SupersededBy<'a> {
    job_generation: u64,
    latest_generation: &'a AtomicU64,
    shutdown: &'a AtomicBool,
}

impl<'a> SupersededBy<'a> {
    #[must_use]
    pub fn new(job_generation: u64, latest_generation: &'a AtomicU64, shutdown: &'a AtomicBool) -> Self {
        Self {
            job_generation,
            latest_generation,
            shutdown,
        }
    }
}

impl CancelToken for SupersededBy<'_> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
            || self.job_generation != self.latest_generation.load(Ordering::Relaxed)
    }
}
