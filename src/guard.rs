//! Reader/writer critical sections.
//!
//! [`Guard`] owns a value behind a `parking_lot::RwLock` and only hands it out
//! for the duration of a closure, so callers never hold a lock guard directly.

use std::fmt;

use parking_lot::RwLock;

/// Runs operations against a shared value under a read or write lock.
///
/// Any number of [`read`](Guard::read) operations may run at once; a
/// [`write`](Guard::write) operation excludes every other operation. Waiting
/// threads are parked, not spun.
///
/// The lock is released on every exit path. If the operation panics, the panic
/// propagates to the caller after the lock has been released, and the guard
/// stays usable (there is no poisoning).
///
/// # Examples
///
/// ```rust
/// use named_registry::Guard;
///
/// let counter: Guard<u32> = Guard::default();
///
/// counter.write(|value| *value += 1);
/// assert_eq!(counter.read(|value| *value), 1);
/// ```
#[derive(Default)]
pub struct Guard<T = ()> {
    lock: RwLock<T>,
}

impl<T> Guard<T> {
    /// Wraps `value` in a new guard.
    pub fn new(value: T) -> Self {
        Self {
            lock: RwLock::new(value),
        }
    }

    /// Runs `op` under the shared lock.
    pub fn read<R>(&self, op: impl FnOnce(&T) -> R) -> R {
        let value = self.lock.read();
        op(&value)
    }

    /// Runs `op` under the exclusive lock.
    pub fn write<R>(&self, op: impl FnOnce(&mut T) -> R) -> R {
        let mut value = self.lock.write();
        op(&mut value)
    }

    /// Consumes the guard and returns the protected value.
    pub fn into_inner(self) -> T {
        self.lock.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lock.try_read() {
            Some(value) => f.debug_struct("Guard").field("value", &*value).finish(),
            None => f.debug_struct("Guard").field("value", &"<locked>").finish(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
