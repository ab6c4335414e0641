use std::{
    ops::{Deref, DerefMut},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Mutual exclusion wrapper for a native connection handle shared across
/// threads. Every native call that touches the handle happens while holding
/// the guard returned by [`SharedConnection::lock`].
pub struct SharedConnection<T> {
    handle: Mutex<T>,
}

impl<T> SharedConnection<T> {
    pub fn new(handle: T) -> Self {
        Self {
            handle: Mutex::new(handle),
        }
    }

    /// Blocks until no other locker holds the handle, then grants exclusive
    /// access for the guard's scope. Release is guaranteed on every exit
    /// path; a poisoned mutex is recovered rather than propagated, since the
    /// native handle does not become invalid when a holder panics.
    pub fn lock(&self) -> ConnectionLock<'_, T> {
        ConnectionLock(self.handle.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Scope-bound exclusive access to the native handle.
pub struct ConnectionLock<'c, T>(MutexGuard<'c, T>);

impl<T> Deref for ConnectionLock<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for ConnectionLock<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::SharedConnection;
    use std::thread;

    #[test]
    fn lock_serializes_access() {
        let shared = SharedConnection::new(0u64);
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        *shared.lock() += 1;
                    }
                });
            }
        });
        assert_eq!(*shared.lock(), 8000);
    }
}
