#![forbid(unsafe_code)]

//! Runtime: binding tables, surface lifecycle, and reset scheduling.
//!
//! # Role in TapZone
//! `tapzone-runtime` connects the pure recognizers in `tapzone-core` to an
//! application. It owns the `(zone, gesture kind) → handler` tables, the
//! surface that feeds host events through the recognizers, and the
//! cancellable deferred-reset primitive for hosts that schedule wall-clock
//! timers instead of polling.
//!
//! # Primary responsibilities
//! - **BindingSet / SharedBindings**: handler tables, atomically replaceable
//!   at runtime (the same gesture vocabulary means different things before
//!   and after authentication).
//! - **GestureSurface**: owns the recognizers for one interactive surface;
//!   explicit `reset()` teardown.
//! - **TimedSurface / DeferredReset**: wall-clock reset scheduling with a
//!   single outstanding, always-cancellable timer.

pub mod bindings;
pub mod deferred;
pub mod surface;

pub use bindings::{BindingSet, SharedBindings};
pub use deferred::DeferredReset;
pub use surface::{GestureSurface, TimedSurface};
