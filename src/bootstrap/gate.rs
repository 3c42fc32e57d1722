use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-way "location ready" flag shared with data-loading threads.
///
/// Starts closed, opens once, never closes again.
#[derive(Debug, Clone, Default)]
pub struct LocationGate {
    ready: Arc<AtomicBool>,
}

impl LocationGate {
    /// A closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the startup location has been applied.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Open the gate. Returns `true` only for the call that opened it.
    pub(crate) fn open(&self) -> bool {
        !self.ready.swap(true, Ordering::AcqRel)
    }
}
