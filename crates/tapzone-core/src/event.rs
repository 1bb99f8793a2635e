#![forbid(unsafe_code)]

//! Raw touch events as delivered by the host's touch layer.
//!
//! A [`TouchEvent`] is a plain value: a vertical position and a millisecond
//! timestamp. Events are ephemeral — recognizers keep at most one scalar
//! timestamp from the past, never the events themselves.
//!
//! Timestamps are host-supplied milliseconds on an arbitrary origin. The
//! host is expected to deliver events in chronological order, but a late
//! event (timestamp before a previously observed one) must never underflow:
//! all elapsed-time arithmetic in this crate goes through
//! [`TouchEvent::elapsed_since_ms`], which treats a backwards step as
//! "longer than any window".

/// A single touch-down/touch-up pair interpreted as a tap, or one endpoint
/// of a sustained press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Vertical position in the host's coordinate space (pixels, top = 0).
    pub y: f32,
    /// Host-supplied timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(y: f32, timestamp_ms: u64) -> Self {
        Self { y, timestamp_ms }
    }

    /// Milliseconds elapsed since `earlier_ms`, or `None` if this event's
    /// timestamp is older than `earlier_ms` (a late or reordered event).
    ///
    /// Callers treat `None` as "beyond any recognition window", which forces
    /// a fresh counting window instead of computing a negative duration.
    #[must_use]
    pub fn elapsed_since_ms(&self, earlier_ms: u64) -> Option<u64> {
        self.timestamp_ms.checked_sub(earlier_ms)
    }
}

impl From<(f32, u64)> for TouchEvent {
    fn from((y, timestamp_ms): (f32, u64)) -> Self {
        Self { y, timestamp_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_forward() {
        let ev = TouchEvent::new(100.0, 700);
        assert_eq!(ev.elapsed_since_ms(400), Some(300));
    }

    #[test]
    fn elapsed_same_instant_is_zero() {
        let ev = TouchEvent::new(100.0, 400);
        assert_eq!(ev.elapsed_since_ms(400), Some(0));
    }

    #[test]
    fn late_event_yields_none() {
        let ev = TouchEvent::new(100.0, 300);
        assert_eq!(ev.elapsed_since_ms(400), None);
    }

    #[test]
    fn from_tuple() {
        let ev: TouchEvent = (250.0, 10).into();
        assert_eq!(ev.y, 250.0);
        assert_eq!(ev.timestamp_ms, 10);
    }
}
