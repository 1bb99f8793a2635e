#![forbid(unsafe_code)]

//! The interactive surface: one set of recognizers, one binding handle.
//!
//! [`GestureSurface`] is created once when the host's interactive surface
//! mounts and lives until it unmounts. It owns the tap and press machines,
//! resolves zones, and dispatches recognized gestures through its
//! [`SharedBindings`]. It is poll-driven: the host calls
//! [`on_tick`](GestureSurface::on_tick) (or schedules
//! [`expire_window`](GestureSurface::expire_window)) to drive the
//! debounce-reset.
//!
//! [`TimedSurface`] wraps a surface for hosts without a tick loop: every
//! touch re-arms a single outstanding [`DeferredReset`] that expires the
//! window on wall-clock time, and dropping the wrapper tears the surface
//! down before cancelling the timer, so a stale timer can never dispatch
//! against disposed state.
//!
//! # Invariants
//!
//! 1. Exactly one dispatch per recognized gesture; handlers run
//!    synchronously on the delivering thread and are never awaited.
//! 2. Presses are only tracked when the start's zone currently has a
//!    long-press binding; a press-start elsewhere is ignored outright and
//!    does not supersede a tracked press.
//! 3. `TimedSurface` keeps at most one reset timer outstanding; every touch
//!    cancels the previous timer before arming a new one.
//!
//! # Failure Modes
//!
//! - Recognition is not serialized against an in-flight handler: a caller
//!   whose handler starts a long async operation (biometric prompt, route
//!   lookup) must guard double-invocation itself.
//! - A timer that has already passed its cancellation check when the
//!   wrapper is dropped completes against the already-reset surface, where
//!   the expiry finds no pending window and dispatches nothing.

use std::sync::{Arc, Mutex};

use tapzone_core::{
    Gesture, GestureConfig, GestureKinds, PressTracker, TapDetector, TouchEvent, ZoneLayout,
};

use crate::bindings::SharedBindings;
use crate::deferred::DeferredReset;

// ---------------------------------------------------------------------------
// GestureSurface
// ---------------------------------------------------------------------------

/// Recognizers and binding handle for one interactive surface.
#[derive(Debug)]
pub struct GestureSurface {
    layout: ZoneLayout,
    taps: TapDetector,
    press: PressTracker,
    bindings: SharedBindings,
}

impl GestureSurface {
    /// Create a surface with the given layout, config, and bindings.
    #[must_use]
    pub fn new(layout: ZoneLayout, config: GestureConfig, bindings: SharedBindings) -> Self {
        Self {
            layout,
            taps: TapDetector::new(config.clone()),
            press: PressTracker::new(config),
            bindings,
        }
    }

    /// Create a surface with the default layout and config.
    #[must_use]
    pub fn with_defaults(bindings: SharedBindings) -> Self {
        Self::new(ZoneLayout::default(), GestureConfig::default(), bindings)
    }

    /// Feed one tap. Dispatches and returns a `DoubleTap` when this tap
    /// completes a pair.
    pub fn on_touch(&mut self, event: TouchEvent) -> Option<Gesture> {
        let fired = self.taps.feed(&event, &self.layout);
        if let Some(gesture) = &fired {
            self.bindings.invoke(gesture);
        }
        fired
    }

    /// Record a press-start if its zone currently has a long-press binding.
    pub fn on_press_start(&mut self, event: TouchEvent) {
        let bound = self.layout.resolve(event.y).is_some_and(|zone| {
            self.bindings
                .kinds_for(zone)
                .contains(GestureKinds::LONG_PRESS)
        });
        if bound {
            self.press.press_start(&event, &self.layout);
        }
    }

    /// Close a press. Dispatches and returns a `LongPress` when the press
    /// qualifies; a press-end with no tracked start is a no-op.
    pub fn on_press_end(&mut self, event: TouchEvent) -> Option<Gesture> {
        let fired = self.press.press_end(&event, &self.layout);
        if let Some(gesture) = &fired {
            self.bindings.invoke(gesture);
        }
        fired
    }

    /// Drive the debounce-reset from a host tick. Dispatches and returns a
    /// `SingleTap` once the reset delay has elapsed since a lone tap.
    pub fn on_tick(&mut self, now_ms: u64) -> Option<Gesture> {
        let fired = self.taps.check_reset(now_ms);
        if let Some(gesture) = &fired {
            self.bindings.invoke(gesture);
        }
        fired
    }

    /// Expire the pending tap window without consulting a clock (the entry
    /// point for a scheduled deferred reset).
    pub fn expire_window(&mut self) -> Option<Gesture> {
        let fired = self.taps.force_reset();
        if let Some(gesture) = &fired {
            self.bindings.invoke(gesture);
        }
        fired
    }

    /// Deadline at which the pending tap window expires, if one is open.
    #[must_use]
    pub fn reset_deadline_ms(&self) -> Option<u64> {
        self.taps.reset_deadline_ms()
    }

    /// Teardown: discard all pending recognition state silently.
    pub fn reset(&mut self) {
        self.taps.reset();
        self.press.cancel();
    }

    /// The binding handle this surface dispatches through.
    #[must_use]
    pub fn bindings(&self) -> &SharedBindings {
        &self.bindings
    }

    /// The zone layout.
    #[must_use]
    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    /// The recognition configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        self.taps.config()
    }
}

// ---------------------------------------------------------------------------
// TimedSurface
// ---------------------------------------------------------------------------

/// Wall-clock wrapper: a shared surface plus one outstanding reset timer.
#[derive(Debug)]
pub struct TimedSurface {
    surface: Arc<Mutex<GestureSurface>>,
    reset_timer: Option<DeferredReset>,
}

impl TimedSurface {
    /// Wrap a surface for wall-clock reset scheduling.
    #[must_use]
    pub fn new(surface: GestureSurface) -> Self {
        Self {
            surface: Arc::new(Mutex::new(surface)),
            reset_timer: None,
        }
    }

    /// Feed one tap and re-arm the reset timer.
    pub fn on_touch(&mut self, event: TouchEvent) -> Option<Gesture> {
        let fired = self.lock().on_touch(event);
        self.rearm();
        fired
    }

    /// Record a press-start. The press path needs no timer.
    pub fn on_press_start(&mut self, event: TouchEvent) {
        self.lock().on_press_start(event);
    }

    /// Close a press.
    pub fn on_press_end(&mut self, event: TouchEvent) -> Option<Gesture> {
        self.lock().on_press_end(event)
    }

    /// The shared surface, for inspection or direct driving.
    #[must_use]
    pub fn surface(&self) -> Arc<Mutex<GestureSurface>> {
        Arc::clone(&self.surface)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GestureSurface> {
        self.surface.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cancel the outstanding timer and, if a tap window is pending, arm a
    /// fresh one that expires it after the configured reset delay.
    fn rearm(&mut self) {
        if let Some(old) = self.reset_timer.take() {
            old.cancel();
        }

        let guard = self.lock();
        if guard.reset_deadline_ms().is_none() {
            return;
        }
        let delay = guard.config().reset_delay;
        drop(guard);

        let surface = Arc::clone(&self.surface);
        self.reset_timer = Some(DeferredReset::schedule(delay, move || {
            surface
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .expire_window();
        }));
    }
}

impl Drop for TimedSurface {
    fn drop(&mut self) {
        // Tear the surface down first: a timer that slips past cancellation
        // then finds nothing to expire.
        self.lock().reset();
        if let Some(timer) = self.reset_timer.take() {
            timer.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
