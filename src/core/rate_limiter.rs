//! In-memory sliding-window rate limiter.
//!
//! Each identifier (usually the caller's network address) owns a queue of
//! request timestamps. A request is admitted while fewer than `max_requests`
//! timestamps fall inside the trailing window ending at "now".
//!
//! State is per-process and is lost on restart. Several gateway instances do
//! not share a budget.
//!
//! # Concurrency
//!
//! The identifier map is guarded by a `parking_lot::RwLock`, and every
//! identifier has its own `Mutex`. A `check` only holds the map lock long
//! enough to clone the identifier's handle, so callers with different
//! identifiers never wait on each other while their windows are evaluated,
//! and two calls for the same identifier are fully serialized.
//!
//! The cleanup sweep takes the map write lock and only removes entries whose
//! handle is not held by anyone else, so it never evicts an entry a `check`
//! is in the middle of updating.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Default interval between two cleanup sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

type Timestamps = Arc<Mutex<VecDeque<Instant>>>;

/// Outcome of a single [`RateLimiter::check`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request was admitted (and counted).
    pub allowed: bool,
    /// Requests still available in the current window after this one.
    pub remaining: u32,
    /// Instant at which the oldest counted request leaves the window.
    pub reset_at: Instant,
    /// Budget of the limiter that produced this decision.
    pub limit: u32,
}

/// Sliding-window rate limiter keyed by caller identifier.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    entries: RwLock<HashMap<String, Timestamps>>,
}

impl RateLimiter {
    /// Creates a limiter admitting at most `max_requests` per `window`.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero or `max_requests` is zero. Configuration
    /// validation rejects both before a limiter is ever built.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        assert!(!window.is_zero(), "rate limit window must be positive");
        assert!(max_requests > 0, "rate limit budget must be positive");

        Self {
            window,
            max_requests,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Evaluates and, if admitted, records a request for `identifier`.
    ///
    /// The prune, count and append steps run under the identifier's own
    /// lock, so concurrent calls for one identifier can never admit more
    /// than `max_requests` within a window.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        let handle = self.handle_for(identifier);
        let mut timestamps = handle.lock();

        let now = Instant::now();
        prune(&mut timestamps, now, self.window);

        let count = timestamps.len();
        let allowed = count < self.max_requests as usize;
        let consumed = count + usize::from(allowed);
        let remaining = (self.max_requests as usize).saturating_sub(consumed) as u32;
        let reset_at = timestamps.front().copied().unwrap_or(now) + self.window;

        if allowed {
            timestamps.push_back(now);
        }

        RateLimitDecision {
            allowed,
            remaining,
            reset_at,
            limit: self.max_requests,
        }
    }

    /// Forgets every recorded request for `identifier`.
    pub fn reset(&self, identifier: &str) {
        self.entries.write().remove(identifier);
    }

    /// Number of requests for `identifier` inside the current window.
    ///
    /// Read-only: expired timestamps are skipped, not removed.
    pub fn get_count(&self, identifier: &str) -> usize {
        let handle = match self.entries.read().get(identifier) {
            Some(handle) => Arc::clone(handle),
            None => return 0,
        };

        let now = Instant::now();
        let timestamps = handle.lock();
        timestamps
            .iter()
            .filter(|ts| is_live(**ts, now, self.window))
            .count()
    }

    /// Number of identifiers currently tracked.
    pub fn tracked_identifiers(&self) -> usize {
        self.entries.read().len()
    }

    /// Prunes every identifier and drops the ones left without timestamps.
    ///
    /// Entries whose handle is shared with an in-flight `check` are skipped;
    /// the next sweep will pick them up. Returns the number of identifiers
    /// removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();

        entries.retain(|_, handle| {
            // The write lock prevents new clones, so a count of one means no
            // `check` currently holds this entry.
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            let mut timestamps = handle.lock();
            prune(&mut timestamps, now, self.window);
            !timestamps.is_empty()
        });

        let removed = before - entries.len();
        debug!(
            removed,
            remaining = entries.len(),
            "Rate limiter cleanup sweep finished"
        );
        removed
    }

    /// Spawns the periodic cleanup sweep on the current tokio runtime.
    ///
    /// The task holds only a weak reference and ends once the limiter is
    /// dropped.
    pub fn spawn_cleanup(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let limiter: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match limiter.upgrade() {
                    Some(limiter) => {
                        limiter.cleanup();
                    }
                    None => break,
                }
            }
        })
    }

    fn handle_for(&self, identifier: &str) -> Timestamps {
        if let Some(handle) = self.entries.read().get(identifier) {
            return Arc::clone(handle);
        }

        let mut entries = self.entries.write();
        Arc::clone(entries.entry(identifier.to_string()).or_default())
    }
}

fn is_live(timestamp: Instant, now: Instant, window: Duration) -> bool {
    now.saturating_duration_since(timestamp) < window
}

fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    // Timestamps are appended in order, so expired ones sit at the front.
    while let Some(oldest) = timestamps.front() {
        if is_live(*oldest, now, window) {
            break;
        }
        timestamps.pop_front();
    }
}
