#![forbid(unsafe_code)]

//! Gesture recognition: transforms raw touch events into semantic gestures.
//!
//! Two independent state machines run concurrently:
//!
//! - **[`TapDetector`]**: counts taps inside a debounce window to emit
//!   `DoubleTap`, and interprets an expired one-tap window as `SingleTap`.
//! - **[`PressTracker`]**: brackets press-start/press-end pairs and emits
//!   `LongPress` when the held duration meets the threshold.
//!
//! Neither machine reads a clock: `feed` and `press_end` take the event's
//! own timestamp, and window expiry is driven by the caller through
//! [`TapDetector::check_reset`] (poll style) or
//! [`TapDetector::force_reset`] (timer style).
//!
//! # Invariants
//!
//! 1. The pending tap count never exceeds 1: the second qualifying tap emits
//!    `DoubleTap` and returns to idle in the same call, so a third rapid tap
//!    always opens a fresh window and can never complete a second double tap
//!    against the previous first tap.
//! 2. At most one reset deadline is outstanding at a time; every tap
//!    replaces it.
//! 3. A press-end without a matching press-start is a no-op.
//! 4. After `reset()`, both machines are back in their initial idle state
//!    and no gesture is emitted for the discarded window.
//!
//! # Failure Modes
//!
//! - A late event (timestamp before the last recorded one) is treated as
//!   arriving beyond every window: the tap path opens a fresh window, the
//!   press path drops the pending press without emitting.
//! - Touches inside a configured dead band carry no zone; the tap machines
//!   still run so the timing contract holds, and the runtime's binding
//!   table simply has nothing to invoke for a zoneless gesture.

use web_time::Duration;

use crate::event::TouchEvent;
use crate::zone::{Zone, ZoneLayout};

// ---------------------------------------------------------------------------
// Configuration Constants
// ---------------------------------------------------------------------------

/// Default window for double-tap detection.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 600;

/// Minimum allowed double-tap window.
pub const MIN_DOUBLE_TAP_WINDOW_MS: u64 = 100;

/// Maximum allowed double-tap window.
pub const MAX_DOUBLE_TAP_WINDOW_MS: u64 = 2000;

/// Default inactivity delay after which an incomplete tap sequence resets.
pub const DEFAULT_RESET_DELAY_MS: u64 = 1000;

/// Minimum allowed reset delay.
pub const MIN_RESET_DELAY_MS: u64 = 200;

/// Maximum allowed reset delay.
pub const MAX_RESET_DELAY_MS: u64 = 5000;

/// Default minimum held duration for a long press.
pub const DEFAULT_LONG_PRESS_MS: u64 = 4000;

/// Minimum allowed long-press threshold.
pub const MIN_LONG_PRESS_MS: u64 = 500;

/// Maximum allowed long-press threshold.
pub const MAX_LONG_PRESS_MS: u64 = 15_000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and timeouts for gesture recognition.
///
/// # Timing Defaults
///
/// | Setting | Default | Range | Description |
/// |---------|---------|-------|-------------|
/// | `double_tap_window` | 600ms | 100-2000ms | Max gap between the taps of a double tap |
/// | `reset_delay` | 1000ms | 200-5000ms | Inactivity before a one-tap window expires |
/// | `long_press_threshold` | 4000ms | 500-15000ms | Minimum held duration for a long press |
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `TAPZONE_DOUBLE_TAP_WINDOW_MS` | u64 | 600 | Double-tap detection window |
/// | `TAPZONE_RESET_DELAY_MS` | u64 | 1000 | Incomplete-sequence reset delay |
/// | `TAPZONE_LONG_PRESS_MS` | u64 | 4000 | Long-press threshold |
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Maximum gap between two taps to count as a double tap.
    /// Default: 600ms.
    pub double_tap_window: Duration,

    /// Inactivity period after which an incomplete tap sequence is
    /// discarded (emitting `SingleTap`). Default: 1000ms.
    pub reset_delay: Duration,

    /// Minimum press duration required for a long press. Default: 4000ms.
    pub long_press_threshold: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window: Duration::from_millis(DEFAULT_DOUBLE_TAP_WINDOW_MS),
            reset_delay: Duration::from_millis(DEFAULT_RESET_DELAY_MS),
            long_press_threshold: Duration::from_millis(DEFAULT_LONG_PRESS_MS),
        }
    }
}

impl GestureConfig {
    /// Create a new config with a custom double-tap window.
    #[must_use]
    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    /// Create a new config with a custom reset delay.
    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Create a new config with a custom long-press threshold.
    #[must_use]
    pub fn with_long_press_threshold(mut self, threshold: Duration) -> Self {
        self.long_press_threshold = threshold;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads `TAPZONE_DOUBLE_TAP_WINDOW_MS`, `TAPZONE_RESET_DELAY_MS`, and
    /// `TAPZONE_LONG_PRESS_MS`. Values are automatically clamped to valid
    /// ranges.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TAPZONE_DOUBLE_TAP_WINDOW_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.double_tap_window = Duration::from_millis(ms);
        }

        if let Ok(val) = std::env::var("TAPZONE_RESET_DELAY_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.reset_delay = Duration::from_millis(ms);
        }

        if let Ok(val) = std::env::var("TAPZONE_LONG_PRESS_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.long_press_threshold = Duration::from_millis(ms);
        }

        config.validated()
    }

    /// Validate and clamp values to safe ranges.
    ///
    /// Returns a new config with:
    /// - `double_tap_window` clamped to 100-2000ms
    /// - `reset_delay` clamped to 200-5000ms, and at least `double_tap_window`
    ///   (a window that outlives its own reset timer could never complete)
    /// - `long_press_threshold` clamped to 500-15000ms
    #[must_use]
    pub fn validated(mut self) -> Self {
        let window_ms = (self.double_tap_window.as_millis() as u64)
            .clamp(MIN_DOUBLE_TAP_WINDOW_MS, MAX_DOUBLE_TAP_WINDOW_MS);
        self.double_tap_window = Duration::from_millis(window_ms);

        let reset_ms = (self.reset_delay.as_millis() as u64)
            .clamp(MIN_RESET_DELAY_MS, MAX_RESET_DELAY_MS)
            .max(window_ms);
        self.reset_delay = Duration::from_millis(reset_ms);

        let press_ms = (self.long_press_threshold.as_millis() as u64)
            .clamp(MIN_LONG_PRESS_MS, MAX_LONG_PRESS_MS);
        self.long_press_threshold = Duration::from_millis(press_ms);

        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let window_ms = self.double_tap_window.as_millis() as u64;
        let reset_ms = self.reset_delay.as_millis() as u64;
        let press_ms = self.long_press_threshold.as_millis() as u64;

        (MIN_DOUBLE_TAP_WINDOW_MS..=MAX_DOUBLE_TAP_WINDOW_MS).contains(&window_ms)
            && (MIN_RESET_DELAY_MS..=MAX_RESET_DELAY_MS).contains(&reset_ms)
            && reset_ms >= window_ms
            && (MIN_LONG_PRESS_MS..=MAX_LONG_PRESS_MS).contains(&press_ms)
    }

    #[inline]
    fn double_tap_window_ms(&self) -> u64 {
        self.double_tap_window.as_millis() as u64
    }

    #[inline]
    fn reset_delay_ms(&self) -> u64 {
        self.reset_delay.as_millis() as u64
    }

    #[inline]
    fn long_press_ms(&self) -> u64 {
        self.long_press_threshold.as_millis() as u64
    }
}

// ---------------------------------------------------------------------------
// Gesture kinds and semantic gestures
// ---------------------------------------------------------------------------

/// The recognized gesture vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// One tap whose window expired without a second tap.
    SingleTap,
    /// Two taps in the same window.
    DoubleTap,
    /// A press held beyond the long-press threshold.
    LongPress,
}

bitflags::bitflags! {
    /// Set of gesture kinds, used to ask a binding table which kinds a zone
    /// responds to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GestureKinds: u8 {
        const SINGLE_TAP = 1 << 0;
        const DOUBLE_TAP = 1 << 1;
        const LONG_PRESS = 1 << 2;
    }
}

impl From<GestureKind> for GestureKinds {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::SingleTap => Self::SINGLE_TAP,
            GestureKind::DoubleTap => Self::DOUBLE_TAP,
            GestureKind::LongPress => Self::LONG_PRESS,
        }
    }
}

/// A semantic gesture derived from raw touch events.
///
/// `zone` is `None` when the deciding touch landed inside a configured dead
/// band; such gestures carry full timing information but match no binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A lone tap whose counting window expired. `at_ms` is the timestamp
    /// of the tap itself, not of the expiry.
    SingleTap { zone: Option<Zone>, at_ms: u64 },
    /// Two taps within the double-tap window. Zone and `at_ms` come from
    /// the second tap.
    DoubleTap { zone: Option<Zone>, at_ms: u64 },
    /// A press held for at least the long-press threshold. Zone comes from
    /// the press-start, `at_ms` from the press-end.
    LongPress {
        zone: Option<Zone>,
        held: Duration,
        at_ms: u64,
    },
}

impl Gesture {
    /// The kind of this gesture.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::SingleTap { .. } => GestureKind::SingleTap,
            Self::DoubleTap { .. } => GestureKind::DoubleTap,
            Self::LongPress { .. } => GestureKind::LongPress,
        }
    }

    /// The zone the gesture resolved to, if any.
    #[must_use]
    pub const fn zone(&self) -> Option<Zone> {
        match self {
            Self::SingleTap { zone, .. }
            | Self::DoubleTap { zone, .. }
            | Self::LongPress { zone, .. } => *zone,
        }
    }

    /// Timestamp of the deciding touch event.
    #[must_use]
    pub const fn at_ms(&self) -> u64 {
        match self {
            Self::SingleTap { at_ms, .. }
            | Self::DoubleTap { at_ms, .. }
            | Self::LongPress { at_ms, .. } => *at_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Tap detector
// ---------------------------------------------------------------------------

/// Internal state of the tap detector.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TapState {
    /// Idle: no tap pending.
    Idle,

    /// One tap received; waiting for a second tap or the reset delay.
    AwaitingSecondTap {
        first_tap_ms: u64,
        zone: Option<Zone>,
    },
}

/// Stateful detector for the tap path: `Idle` → `AwaitingSecondTap` →
/// (`DoubleTap` | expiry).
///
/// Call [`feed`](TapDetector::feed) for every discrete tap. Drive window
/// expiry either by polling [`check_reset`](TapDetector::check_reset) (e.g.
/// on tick) or by scheduling a deferred call to
/// [`force_reset`](TapDetector::force_reset) at
/// [`reset_deadline_ms`](TapDetector::reset_deadline_ms).
#[derive(Debug)]
pub struct TapDetector {
    config: GestureConfig,
    state: TapState,
}

impl TapDetector {
    /// Create a new tap detector with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: TapState::Idle,
        }
    }

    /// Create a new tap detector with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GestureConfig::default())
    }

    /// Process one tap. Returns `DoubleTap` when this tap completes a pair,
    /// `None` otherwise.
    ///
    /// A tap arriving after the window (or with a timestamp older than the
    /// pending tap) silently discards the pending tap and opens a fresh
    /// window; the spoken-feedback interpretation of that discarded tap is
    /// the reset path's job, not this one's.
    pub fn feed(&mut self, event: &TouchEvent, layout: &ZoneLayout) -> Option<Gesture> {
        let zone = layout.resolve(event.y);

        match self.state {
            TapState::Idle => {
                self.state = TapState::AwaitingSecondTap {
                    first_tap_ms: event.timestamp_ms,
                    zone,
                };
                #[cfg(feature = "tracing")]
                tracing::trace!(at_ms = event.timestamp_ms, ?zone, "tap window opened");
                None
            }

            TapState::AwaitingSecondTap { first_tap_ms, .. } => {
                let within_window = event
                    .elapsed_since_ms(first_tap_ms)
                    .is_some_and(|elapsed| elapsed <= self.config.double_tap_window_ms());

                if within_window {
                    // Fire and return to idle in the same call, so a third
                    // rapid tap starts a fresh count.
                    self.state = TapState::Idle;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(at_ms = event.timestamp_ms, ?zone, "double tap");
                    Some(Gesture::DoubleTap {
                        zone,
                        at_ms: event.timestamp_ms,
                    })
                } else {
                    self.state = TapState::AwaitingSecondTap {
                        first_tap_ms: event.timestamp_ms,
                        zone,
                    };
                    #[cfg(feature = "tracing")]
                    tracing::trace!(at_ms = event.timestamp_ms, ?zone, "tap window restarted");
                    None
                }
            }
        }
    }

    /// Check for reset-delay expiry and interpret the pending tap.
    ///
    /// Call periodically (e.g. on tick). Returns `SingleTap` once the reset
    /// delay has elapsed since the pending tap; idempotent afterwards. A
    /// backwards `now_ms` never fires.
    pub fn check_reset(&mut self, now_ms: u64) -> Option<Gesture> {
        if let TapState::AwaitingSecondTap { first_tap_ms, zone } = self.state
            && now_ms.saturating_sub(first_tap_ms) >= self.config.reset_delay_ms()
        {
            self.state = TapState::Idle;
            #[cfg(feature = "tracing")]
            tracing::debug!(at_ms = first_tap_ms, ?zone, "single tap (window expired)");
            return Some(Gesture::SingleTap {
                zone,
                at_ms: first_tap_ms,
            });
        }
        None
    }

    /// Expire the pending window without consulting a clock.
    ///
    /// This is the entry point for a scheduled deferred reset: the timer
    /// that was armed for [`reset_deadline_ms`](Self::reset_deadline_ms)
    /// fires and interprets the pending tap as `SingleTap`.
    pub fn force_reset(&mut self) -> Option<Gesture> {
        if let TapState::AwaitingSecondTap { first_tap_ms, zone } = self.state {
            self.state = TapState::Idle;
            return Some(Gesture::SingleTap {
                zone,
                at_ms: first_tap_ms,
            });
        }
        None
    }

    /// Number of taps pending in the current window (0 or 1).
    #[must_use]
    pub fn tap_count(&self) -> u8 {
        match self.state {
            TapState::Idle => 0,
            TapState::AwaitingSecondTap { .. } => 1,
        }
    }

    /// Whether a tap is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, TapState::AwaitingSecondTap { .. })
    }

    /// Deadline at which the pending window expires, if one is open.
    ///
    /// Every tap replaces the deadline, so at most one is outstanding.
    #[must_use]
    pub fn reset_deadline_ms(&self) -> Option<u64> {
        match self.state {
            TapState::Idle => None,
            TapState::AwaitingSecondTap { first_tap_ms, .. } => {
                Some(first_tap_ms.saturating_add(self.config.reset_delay_ms()))
            }
        }
    }

    /// Discard any pending window silently (teardown path).
    pub fn reset(&mut self) {
        self.state = TapState::Idle;
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Does not reset pending state.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Press tracker
// ---------------------------------------------------------------------------

/// A pending press-start.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPress {
    zone: Option<Zone>,
    start_ms: u64,
}

/// Stateful tracker for the long-press path: `NotPressing` → `Pressing` →
/// (`LongPress` | nothing).
///
/// Policy: only one outstanding press-start is tracked at a time; a new
/// press-start supersedes any pending one. A press-end resolving to a
/// different zone than its start drops the press without emitting.
#[derive(Debug)]
pub struct PressTracker {
    config: GestureConfig,
    pending: Option<PendingPress>,
}

impl PressTracker {
    /// Create a new press tracker with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// Create a new press tracker with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GestureConfig::default())
    }

    /// Record a press-start, superseding any pending one.
    pub fn press_start(&mut self, event: &TouchEvent, layout: &ZoneLayout) {
        let zone = layout.resolve(event.y);
        #[cfg(feature = "tracing")]
        tracing::trace!(at_ms = event.timestamp_ms, ?zone, "press start");
        self.pending = Some(PendingPress {
            zone,
            start_ms: event.timestamp_ms,
        });
    }

    /// Close a press. Returns `LongPress` when the held duration meets the
    /// threshold and the end resolves to the same zone as the start.
    ///
    /// A press-end with no matching press-start is a no-op. The pending
    /// start is always cleared, whatever the outcome.
    pub fn press_end(&mut self, event: &TouchEvent, layout: &ZoneLayout) -> Option<Gesture> {
        let pending = self.pending.take()?;

        let zone = layout.resolve(event.y);
        if zone != pending.zone {
            return None;
        }

        // Late end (timestamp before the start) cannot qualify.
        let held_ms = event.elapsed_since_ms(pending.start_ms)?;
        if held_ms < self.config.long_press_ms() {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(at_ms = event.timestamp_ms, ?zone, held_ms, "long press");
        Some(Gesture::LongPress {
            zone,
            held: Duration::from_millis(held_ms),
            at_ms: event.timestamp_ms,
        })
    }

    /// Whether a press-start is pending.
    #[must_use]
    pub fn is_pressing(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending press-start (teardown path).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Does not affect a pending press.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(y: f32, at_ms: u64) -> TouchEvent {
        TouchEvent::new(y, at_ms)
    }

    fn layout() -> ZoneLayout {
        ZoneLayout::split_at(500.0)
    }

    // --- Double-tap tests ---

    #[test]
    fn double_tap_in_top_zone() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        assert_eq!(taps.feed(&tap(100.0, 0), &l), None);
        let fired = taps.feed(&tap(120.0, 300), &l);
        assert_eq!(
            fired,
            Some(Gesture::DoubleTap {
                zone: Some(Zone::Top),
                at_ms: 300,
            })
        );
        // Count is back to 0 immediately after the fire.
        assert_eq!(taps.tap_count(), 0);
    }

    #[test]
    fn second_tap_past_window_starts_new_count() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        assert_eq!(taps.feed(&tap(100.0, 0), &l), None);
        assert_eq!(taps.feed(&tap(120.0, 700), &l), None);
        assert_eq!(taps.tap_count(), 1);
    }

    #[test]
    fn second_tap_exactly_on_window_edge_fires() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        let fired = taps.feed(&tap(100.0, 600), &l);
        assert!(matches!(fired, Some(Gesture::DoubleTap { .. })));
    }

    #[test]
    fn third_rapid_tap_starts_fresh() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        assert!(taps.feed(&tap(100.0, 300), &l).is_some());

        // Third tap 200ms after the fire: not part of the fired gesture.
        assert_eq!(taps.feed(&tap(100.0, 500), &l), None);
        assert_eq!(taps.tap_count(), 1);

        // But it can head a new double tap of its own.
        let fired = taps.feed(&tap(100.0, 900), &l);
        assert!(matches!(fired, Some(Gesture::DoubleTap { at_ms: 900, .. })));
    }

    #[test]
    fn zone_comes_from_second_tap() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        let fired = taps.feed(&tap(600.0, 300), &l);
        assert_eq!(
            fired,
            Some(Gesture::DoubleTap {
                zone: Some(Zone::Bottom),
                at_ms: 300,
            })
        );
    }

    #[test]
    fn double_tap_in_dead_band_has_no_zone() {
        let mut taps = TapDetector::with_defaults();
        let l = ZoneLayout::with_dead_band(450.0, 550.0);

        taps.feed(&tap(500.0, 0), &l);
        let fired = taps.feed(&tap(500.0, 200), &l);
        assert_eq!(fired, Some(Gesture::DoubleTap { zone: None, at_ms: 200 }));
    }

    #[test]
    fn late_event_forces_fresh_window() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 1000), &l);
        // Timestamp goes backwards: must not fire, must not panic.
        assert_eq!(taps.feed(&tap(100.0, 400), &l), None);
        assert_eq!(taps.tap_count(), 1);
        // The fresh window is anchored at the late event's own timestamp.
        assert_eq!(taps.reset_deadline_ms(), Some(1400));
    }

    // --- Reset tests ---

    #[test]
    fn reset_delay_expires_pending_tap() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        assert_eq!(taps.check_reset(999), None);
        let fired = taps.check_reset(1001);
        assert_eq!(
            fired,
            Some(Gesture::SingleTap {
                zone: Some(Zone::Top),
                at_ms: 0,
            })
        );
        assert_eq!(taps.tap_count(), 0);
    }

    #[test]
    fn check_reset_is_idempotent() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        assert!(taps.check_reset(1500).is_some());
        assert_eq!(taps.check_reset(2000), None);
        assert_eq!(taps.check_reset(9999), None);
    }

    #[test]
    fn check_reset_with_backwards_clock_does_not_fire() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 5000), &l);
        assert_eq!(taps.check_reset(100), None);
        assert_eq!(taps.tap_count(), 1);
    }

    #[test]
    fn every_tap_replaces_the_deadline() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        assert_eq!(taps.reset_deadline_ms(), None);
        taps.feed(&tap(100.0, 0), &l);
        assert_eq!(taps.reset_deadline_ms(), Some(1000));
        taps.feed(&tap(100.0, 700), &l);
        assert_eq!(taps.reset_deadline_ms(), Some(1700));
    }

    #[test]
    fn firing_clears_the_deadline() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        taps.feed(&tap(100.0, 300), &l);
        assert_eq!(taps.reset_deadline_ms(), None);
    }

    #[test]
    fn force_reset_interprets_pending_tap() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(600.0, 42), &l);
        assert_eq!(
            taps.force_reset(),
            Some(Gesture::SingleTap {
                zone: Some(Zone::Bottom),
                at_ms: 42,
            })
        );
        assert_eq!(taps.force_reset(), None);
    }

    #[test]
    fn reset_discards_silently() {
        let mut taps = TapDetector::with_defaults();
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        taps.reset();
        assert_eq!(taps.tap_count(), 0);
        assert_eq!(taps.check_reset(5000), None);
    }

    // --- Long-press tests ---

    #[test]
    fn long_press_fires_at_threshold() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 0), &l);
        assert!(press.is_pressing());
        let fired = press.press_end(&tap(600.0, 4200), &l);
        assert_eq!(
            fired,
            Some(Gesture::LongPress {
                zone: Some(Zone::Bottom),
                held: Duration::from_millis(4200),
                at_ms: 4200,
            })
        );
        assert!(!press.is_pressing());
    }

    #[test]
    fn short_press_fires_nothing() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 0), &l);
        assert_eq!(press.press_end(&tap(600.0, 3999), &l), None);
        assert!(!press.is_pressing());
    }

    #[test]
    fn press_exactly_at_threshold_fires() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 100), &l);
        assert!(press.press_end(&tap(600.0, 4100), &l).is_some());
    }

    #[test]
    fn press_end_without_start_is_noop() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        assert_eq!(press.press_end(&tap(600.0, 5000), &l), None);
    }

    #[test]
    fn press_end_in_other_zone_is_dropped() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 0), &l);
        assert_eq!(press.press_end(&tap(100.0, 5000), &l), None);
        assert!(!press.is_pressing());
    }

    #[test]
    fn new_press_start_supersedes_pending_one() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 0), &l);
        press.press_start(&tap(100.0, 2000), &l);

        // End matches the second start's zone and timing, not the first's.
        assert_eq!(press.press_end(&tap(100.0, 5000), &l), None);
        press.press_start(&tap(100.0, 6000), &l);
        let fired = press.press_end(&tap(100.0, 10_500), &l);
        assert_eq!(
            fired,
            Some(Gesture::LongPress {
                zone: Some(Zone::Top),
                held: Duration::from_millis(4500),
                at_ms: 10_500,
            })
        );
    }

    #[test]
    fn late_press_end_is_dropped() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 9000), &l);
        assert_eq!(press.press_end(&tap(600.0, 1000), &l), None);
    }

    #[test]
    fn cancel_drops_pending_press() {
        let mut press = PressTracker::with_defaults();
        let l = layout();

        press.press_start(&tap(600.0, 0), &l);
        press.cancel();
        assert_eq!(press.press_end(&tap(600.0, 9000), &l), None);
    }

    // --- Config tests ---

    #[test]
    fn default_config_values() {
        let config = GestureConfig::default();
        assert_eq!(config.double_tap_window.as_millis(), 600);
        assert_eq!(config.reset_delay.as_millis(), 1000);
        assert_eq!(config.long_press_threshold.as_millis(), 4000);
        assert!(config.is_valid());
    }

    #[test]
    fn validated_clamps_out_of_range_values() {
        let config = GestureConfig::default()
            .with_double_tap_window(Duration::from_millis(10_000))
            .with_reset_delay(Duration::from_millis(1))
            .with_long_press_threshold(Duration::from_millis(1))
            .validated();

        assert_eq!(config.double_tap_window.as_millis(), 2000);
        // Reset delay is clamped, then raised to at least the window.
        assert_eq!(config.reset_delay.as_millis(), 2000);
        assert_eq!(config.long_press_threshold.as_millis(), 500);
        assert!(config.is_valid());
    }

    #[test]
    fn custom_window_changes_detection() {
        let config = GestureConfig::default().with_double_tap_window(Duration::from_millis(200));
        let mut taps = TapDetector::new(config);
        let l = layout();

        taps.feed(&tap(100.0, 0), &l);
        // 300ms gap: within the default window, but past the custom one.
        assert_eq!(taps.feed(&tap(100.0, 300), &l), None);
    }

    #[test]
    fn config_getter_and_setter() {
        let mut taps = TapDetector::with_defaults();
        assert_eq!(taps.config().double_tap_window.as_millis(), 600);

        taps.set_config(
            GestureConfig::default().with_double_tap_window(Duration::from_millis(250)),
        );
        assert_eq!(taps.config().double_tap_window.as_millis(), 250);
    }

    // --- Gesture accessors ---

    #[test]
    fn gesture_accessors() {
        let g = Gesture::LongPress {
            zone: Some(Zone::Bottom),
            held: Duration::from_millis(4200),
            at_ms: 4200,
        };
        assert_eq!(g.kind(), GestureKind::LongPress);
        assert_eq!(g.zone(), Some(Zone::Bottom));
        assert_eq!(g.at_ms(), 4200);
    }

    #[test]
    fn kind_mask_round_trip() {
        assert_eq!(
            GestureKinds::from(GestureKind::SingleTap),
            GestureKinds::SINGLE_TAP
        );
        assert_eq!(
            GestureKinds::from(GestureKind::DoubleTap),
            GestureKinds::DOUBLE_TAP
        );
        assert_eq!(
            GestureKinds::from(GestureKind::LongPress),
            GestureKinds::LONG_PRESS
        );
    }
}
