#![forbid(unsafe_code)]

//! Gesture-to-action binding tables.
//!
//! A [`BindingSet`] maps `(Zone, GestureKind)` pairs to application
//! handlers. [`SharedBindings`] wraps a set so the whole table can be
//! replaced atomically at runtime — including from inside a handler that is
//! currently being dispatched, which is exactly what happens when the
//! authentication-success handler re-purposes the gesture vocabulary for
//! the post-login actions.
//!
//! # Invariants
//!
//! 1. At most one handler per `(zone, kind)` pair; binding again replaces it.
//! 2. Gestures that resolved to no zone (dead band) invoke nothing.
//! 3. Replacing the table never tears a dispatch in progress: the dispatch
//!    completes against the table that was installed when it started.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use arc_swap::ArcSwap;
use tapzone_core::{Gesture, GestureKind, GestureKinds, Zone};

/// An application handler invoked when its gesture fires.
///
/// Handlers run synchronously on the thread that delivered the event and
/// are never awaited; a handler that kicks off long-running work (biometric
/// auth, a route lookup) should hand it off and return.
pub type Handler = Box<dyn Fn(&Gesture) + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// BindingSet
// ---------------------------------------------------------------------------

/// A `(zone, gesture kind) → handler` table.
#[derive(Default)]
pub struct BindingSet {
    map: AHashMap<(Zone, GestureKind), Handler>,
}

impl fmt::Debug for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSet")
            .field("bindings", &self.map.len())
            .finish()
    }
}

impl BindingSet {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler for a `(zone, kind)` pair, replacing any existing one.
    pub fn bind(
        &mut self,
        zone: Zone,
        kind: GestureKind,
        handler: impl Fn(&Gesture) + Send + Sync + 'static,
    ) {
        self.map.insert((zone, kind), Box::new(handler));
    }

    /// Builder-style [`bind`](Self::bind).
    #[must_use]
    pub fn with(
        mut self,
        zone: Zone,
        kind: GestureKind,
        handler: impl Fn(&Gesture) + Send + Sync + 'static,
    ) -> Self {
        self.bind(zone, kind, handler);
        self
    }

    /// Remove a binding. Returns whether one was present.
    pub fn unbind(&mut self, zone: Zone, kind: GestureKind) -> bool {
        self.map.remove(&(zone, kind)).is_some()
    }

    /// Whether a `(zone, kind)` pair has a handler.
    #[must_use]
    pub fn is_bound(&self, zone: Zone, kind: GestureKind) -> bool {
        self.map.contains_key(&(zone, kind))
    }

    /// The gesture kinds a zone responds to.
    #[must_use]
    pub fn kinds_for(&self, zone: Zone) -> GestureKinds {
        let mut kinds = GestureKinds::empty();
        for (z, kind) in self.map.keys() {
            if *z == zone {
                kinds |= GestureKinds::from(*kind);
            }
        }
        kinds
    }

    /// Dispatch a gesture to its handler, if one is bound.
    ///
    /// Returns whether a handler ran. Zoneless gestures never match.
    pub fn invoke(&self, gesture: &Gesture) -> bool {
        let Some(zone) = gesture.zone() else {
            return false;
        };
        match self.map.get(&(zone, gesture.kind())) {
            Some(handler) => {
                handler(gesture);
                true
            }
            None => false,
        }
    }

    /// Number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SharedBindings
// ---------------------------------------------------------------------------

/// A cloneable handle to an atomically replaceable [`BindingSet`].
///
/// The surface dispatches through the handle; the application keeps a clone
/// and calls [`replace`](Self::replace) to swap the whole vocabulary, e.g.
/// after authentication succeeds. A replacement performed from inside a
/// running handler takes effect for the next gesture, never mid-dispatch.
#[derive(Clone)]
pub struct SharedBindings {
    inner: Arc<ArcSwap<BindingSet>>,
}

impl fmt::Debug for SharedBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBindings")
            .field("bindings", &self.inner.load().len())
            .finish()
    }
}

impl Default for SharedBindings {
    fn default() -> Self {
        Self::new(BindingSet::new())
    }
}

impl SharedBindings {
    /// Create a handle over an initial binding set.
    #[must_use]
    pub fn new(set: BindingSet) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(set)),
        }
    }

    /// Atomically install a new binding set, discarding the old one.
    pub fn replace(&self, set: BindingSet) {
        self.inner.store(Arc::new(set));
        #[cfg(feature = "tracing")]
        tracing::debug!("binding table replaced");
    }

    /// Dispatch a gesture through the currently installed set.
    pub fn invoke(&self, gesture: &Gesture) -> bool {
        self.inner.load().invoke(gesture)
    }

    /// The gesture kinds a zone currently responds to.
    #[must_use]
    pub fn kinds_for(&self, zone: Zone) -> GestureKinds {
        self.inner.load().kinds_for(zone)
    }

    /// Number of bindings currently installed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    /// Whether the current table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
