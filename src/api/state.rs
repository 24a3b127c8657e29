use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;

/// Counter value at process start.
pub const INITIAL_VALUE: i32 = 1;

/// Upper bound (inclusive) for rotated counter values.
pub const MAX_VALUE: i32 = 100;

/// Process-wide counter storage.
///
/// Holds a single integer with no history. Rotation overwrites it with a
/// uniform random value in `[0, MAX_VALUE]`.
#[derive(Clone)]
pub struct Counter {
    value: Arc<RwLock<i32>>,
}

impl Counter {
    /// Creates a counter holding [`INITIAL_VALUE`].
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(INITIAL_VALUE)),
        }
    }

    /// Returns the current value.
    pub async fn current(&self) -> i32 {
        *self.value.read().await
    }

    /// Replaces the value with a uniform random integer in
    /// `[0, MAX_VALUE]` and returns it.
    pub async fn rotate(&self) -> i32 {
        let next = rand::thread_rng().gen_range(0..=MAX_VALUE);
        *self.value.write().await = next;
        next
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
