#![forbid(unsafe_code)]

//! Core: touch events, zone partitioning, and gesture recognition.
//!
//! # Role in TapZone
//! `tapzone-core` is the recognition layer. It owns the raw event model and
//! the two temporal state machines (tap counting, press timing) that turn a
//! stream of touch events into semantic gestures.
//!
//! # Primary responsibilities
//! - **TouchEvent**: canonical input events (vertical position + timestamp).
//! - **ZoneLayout**: deterministic partition of the screen into zones.
//! - **TapDetector / PressTracker**: deterministic, caller-clocked
//!   recognizers for single tap, double tap, and long press.
//!
//! # How it fits in the system
//! The runtime (`tapzone-runtime`) feeds host touch events through these
//! recognizers and routes the resulting [`Gesture`](gesture::Gesture)s to
//! application handlers via its binding tables. Nothing in this crate spawns
//! threads or reads a clock: every operation takes the caller's timestamp,
//! which keeps recognition deterministic and directly testable.

pub mod event;
pub mod gesture;
pub mod zone;

pub use event::TouchEvent;
pub use gesture::{Gesture, GestureConfig, GestureKind, GestureKinds, PressTracker, TapDetector};
pub use zone::{Zone, ZoneLayout};
