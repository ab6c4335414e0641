use std::ops::{Deref, DerefMut};

/// Owns a C handle together with the function that releases it.
pub(crate) struct CBox<T: Copy> {
    value: T,
    release: fn(T),
}

impl<T: Copy> CBox<T> {
    pub(crate) fn new(value: T, release: fn(T)) -> Self {
        Self { value, release }
    }
}

impl<T: Copy> Deref for CBox<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Copy> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Copy> Drop for CBox<T> {
    fn drop(&mut self) {
        (self.release)(self.value);
    }
}
