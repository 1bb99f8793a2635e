#![forbid(unsafe_code)]

//! Screen zone partitioning.
//!
//! A [`ZoneLayout`] splits the vertical axis into two disjoint regions at a
//! fixed boundary, optionally separated by a dead band in which touches
//! resolve to no zone at all.
//!
//! # Invariants
//!
//! 1. Resolution is deterministic: the boundary is closed on the Bottom side
//!    (`y < boundary` is Top, `y >= boundary` is Bottom), so a touch landing
//!    exactly on the boundary always resolves to Bottom.
//! 2. With a dead band `[lo, hi)`, the three outcomes partition the axis:
//!    `y < lo` is Top, `lo <= y < hi` is no zone, `y >= hi` is Bottom.
//! 3. Non-finite positions (NaN, ±∞ propagated from a broken host layer)
//!    never panic: NaN resolves to no zone, infinities clamp to the
//!    outermost zone on their side.

/// A disjoint screen region used to disambiguate where a gesture occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Upper region (`y` below the boundary; top of screen is `y = 0`).
    Top,
    /// Lower region.
    Bottom,
}

/// Default boundary between the Top and Bottom zones, in host pixels.
pub const DEFAULT_BOUNDARY_Y: f32 = 500.0;

/// Boundary-based partition of the vertical axis into [`Zone`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLayout {
    /// Start of the Bottom zone. Top is everything strictly above.
    top_end: f32,
    /// Start of the Bottom zone when a dead band is configured; equal to
    /// `top_end` otherwise.
    bottom_start: f32,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self::split_at(DEFAULT_BOUNDARY_Y)
    }
}

impl ZoneLayout {
    /// Split the axis at a single closed boundary: `y < boundary` is Top,
    /// `y >= boundary` is Bottom.
    #[must_use]
    pub fn split_at(boundary_y: f32) -> Self {
        Self {
            top_end: boundary_y,
            bottom_start: boundary_y,
        }
    }

    /// Split the axis with a dead band: `y < lo` is Top, `y >= hi` is
    /// Bottom, and touches inside `[lo, hi)` resolve to no zone.
    ///
    /// If `hi < lo` the band collapses to a plain boundary at `lo`.
    #[must_use]
    pub fn with_dead_band(lo: f32, hi: f32) -> Self {
        Self {
            top_end: lo,
            bottom_start: hi.max(lo),
        }
    }

    /// Whether a dead band separates the zones.
    #[must_use]
    pub fn has_dead_band(&self) -> bool {
        self.bottom_start > self.top_end
    }

    /// Resolve a vertical position to a zone.
    ///
    /// Returns `None` inside the dead band and for NaN positions; never
    /// panics for any float input.
    #[must_use]
    pub fn resolve(&self, y: f32) -> Option<Zone> {
        if y.is_nan() {
            return None;
        }
        if y < self.top_end {
            Some(Zone::Top)
        } else if y >= self.bottom_start {
            Some(Zone::Bottom)
        } else {
            None
        }
    }
}
