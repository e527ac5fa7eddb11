//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

/// Memoizing cache with a fixed time-to-live
///
/// Reads and writes are synchronous and never suspend, so a single operation
/// is atomic with respect to other in-flight requests. A read followed by an
/// awaited producer call and a write is not.
pub trait Cache<V>: Send + Sync + Debug {
    /// Returns the value if present and unexpired. An expired entry observed
    /// here is removed.
    fn read(&self, key: &str) -> Option<V>;

    /// Inserts or overwrites the entry, expiring one TTL from now
    fn write(&self, key: &str, value: V);

    /// The TTL applied to every write
    fn ttl(&self) -> Duration;

    /// Number of stored entries, including expired ones nobody has read yet
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry
    fn clear(&self);
}
