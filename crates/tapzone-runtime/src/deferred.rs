#![forbid(unsafe_code)]

//! Cancellable deferred actions for reset scheduling.
//!
//! [`DeferredReset`] runs a closure once after a delay unless cancelled
//! first. It backs the debounce-reset contract of the tap path: at most one
//! timer outstanding at a time, always cancelled before being replaced, and
//! cancelled on teardown so it can never fire against a disposed surface.
//!
//! The timer thread parks on a condvar with timeout rather than sleeping,
//! so cancellation wakes it immediately instead of leaving a stray thread
//! behind for the full delay.
//!
//! # Example
//!
//! ```
//! use tapzone_runtime::DeferredReset;
//! use std::time::Duration;
//!
//! let timer = DeferredReset::schedule(Duration::from_millis(5), || {
//!     // interpret the pending tap
//! });
//!
//! // Teardown before the deadline: the closure never runs.
//! timer.cancel();
//! assert!(timer.is_cancelled());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use web_time::{Duration, Instant};

struct DeferredInner {
    cancelled: AtomicBool,
    fired: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

/// A one-shot deferred action with guaranteed-if-early cancellation.
///
/// Cancelling before the deadline guarantees the closure never starts.
/// Cancelling is idempotent, and dropping the handle cancels.
pub struct DeferredReset {
    inner: Arc<DeferredInner>,
}

impl std::fmt::Debug for DeferredReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredReset")
            .field("cancelled", &self.is_cancelled())
            .field("fired", &self.has_fired())
            .finish()
    }
}

impl DeferredReset {
    /// Schedule `action` to run once after `delay`.
    pub fn schedule(delay: Duration, action: impl FnOnce() + Send + 'static) -> Self {
        let inner = Arc::new(DeferredInner {
            cancelled: AtomicBool::new(false),
            fired: AtomicBool::new(false),
            notify: (Mutex::new(()), Condvar::new()),
        });

        let thread_inner = Arc::clone(&inner);
        std::thread::spawn(move || {
            if thread_inner.wait_cancelled(delay) {
                return;
            }
            thread_inner.fired.store(true, Ordering::Release);
            action();
        });

        Self { inner }
    }

    /// Cancel the pending action. Idempotent; a no-op once fired.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let (lock, cvar) = &self.inner.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Whether the action has started running.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }
}

impl Drop for DeferredReset {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl DeferredInner {
    /// Block until either cancellation or the deadline. Returns `true` if
    /// cancelled before the deadline.
    fn wait_cancelled(&self, delay: Duration) -> bool {
        let (lock, cvar) = &self.notify;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();
        let mut remaining = delay;
        loop {
            if self.cancelled.load(Ordering::Acquire) {
                return true;
            }
            let (new_guard, result) = cvar
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = new_guard;
            if self.cancelled.load(Ordering::Acquire) {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= delay {
                return false;
            }
            remaining = delay - elapsed;
        }
    }
}
