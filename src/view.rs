//! Last-write-wins guard for superseded fetches.
//!
//! Each view's query carries a generation tag taken when the fetch is
//! issued. A result is applied only if its tag still matches the latest
//! issued generation for that view, so a slow, stale response can never
//! overwrite the result of a newer query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Opaque tag identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Monotonic generation counter for one view / query key.
#[derive(Debug, Default)]
pub struct ViewSequence {
    latest: AtomicU64,
}

impl ViewSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation, superseding all earlier ones.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `generation` is still the latest issued.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}

/// A slot holding the latest committed value for a view.
///
/// `commit` applies a fetched value only when its generation is current;
/// stale results are discarded and the method reports which happened.
#[derive(Debug, Default)]
pub struct Latest<T> {
    sequence: ViewSequence,
    slot: RwLock<Option<T>>,
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Self {
            sequence: ViewSequence::new(),
            slot: RwLock::new(None),
        }
    }

    /// Start a fetch for this view.
    pub fn begin(&self) -> Generation {
        self.sequence.begin()
    }

    /// Apply `value` if `generation` is still current. Returns false (and
    /// leaves the slot untouched) for superseded fetches.
    pub fn commit(&self, generation: Generation, value: T) -> bool {
        if !self.sequence.is_current(generation) {
            return false;
        }
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(value);
            return true;
        }
        false
    }

    /// The most recently committed value, if any.
    pub fn get(&self) -> Option<T> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}
