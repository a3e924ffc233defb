//! Node/time budget and cooperative stop token for one top-level search.
//!
//! Every visited node calls [`SearchBudget::tick`]. The node limit is
//! checked on every call. The clock and the external stop flag are polled
//! every [`SearchBudget::POLL_INTERVAL`] nodes. Once tripped the budget
//! stays stopped, and callers unwind by returning static evaluations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct SearchBudget {
    nodes: u64,
    started: Instant,
    max_time_ms: u64,
    max_nodes: u64,
    stopped: bool,
    stop_signal: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub const POLL_INTERVAL: u64 = 100;

    /// `u64::MAX` disables a limit.
    pub fn new(max_time_ms: u64, max_nodes: u64, stop_signal: Option<Arc<AtomicBool>>) -> Self {
        Self {
            nodes: 0,
            started: Instant::now(),
            max_time_ms,
            max_nodes,
            stopped: false,
            stop_signal,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX, u64::MAX, None)
    }

    /// Count one node and report whether the search must stop.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        self.nodes += 1;
        if self.nodes >= self.max_nodes {
            self.trip("node limit");
            return true;
        }

        if self.nodes % Self::POLL_INTERVAL == 0 {
            if self.elapsed_ms() >= self.max_time_ms {
                self.trip("time limit");
            } else if self
                .stop_signal
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                self.trip("stop signal");
            }
        }

        self.stopped
    }

    fn trip(&mut self, reason: &str) {
        self.stopped = true;
        log::debug!(
            "search budget tripped by {reason} after {} nodes, {} ms",
            self.nodes,
            self.elapsed_ms()
        );
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
