//! Cooperative cancellation and progress reporting, threaded through every
//! stage as a per-call parameter rather than held as global state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheap, cloneable flag checked at every documented suspension point
/// (file boundary, directory boundary, node visit, component/layer
/// iteration start).
#[derive(Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken { flag: Arc::new(AtomicBool::new(false)) }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A single progress event surfaced by a running stage.
#[derive(Debug, Clone)]
pub struct Progress {
    pub stage: &'static str,
    pub files_seen: u64,
    pub directories_seen: u64,
    pub bytes_seen: u64,
    pub current_path: Option<String>,
}

impl Progress {
    pub fn new(stage: &'static str) -> Self {
        Progress { stage, files_seen: 0, directories_seen: 0, bytes_seen: 0, current_path: None }
    }
}

/// A sink for progress events. Must be `Send + Sync` so it can be shared
/// across a worker pool; the pipeline never assumes a specific reporter
/// implementation (log line, channel, no-op).
pub type ProgressReporter = Arc<dyn Fn(&Progress) + Send + Sync>;

/// A reporter that discards every event — the default when the caller
/// doesn't care about progress.
pub fn silent_reporter() -> ProgressReporter {
    Arc::new(|_progress: &Progress| {})
}
