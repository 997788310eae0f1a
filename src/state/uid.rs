//! Identity generation for new connections.

use relay_proto::PlayerId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out connection identities.
///
/// Identities increase monotonically from 1 and are never reused within one
/// process, so an identity cannot collide with any open connection.
pub struct IdGenerator {
    counter: AtomicU64,
}

const ID_COUNTER_START: u64 = 1;

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(ID_COUNTER_START),
        }
    }

    /// Generate the next unique identity.
    pub fn next(&self) -> PlayerId {
        PlayerId::new(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
