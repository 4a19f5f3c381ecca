// src/lazy.rs
//! Values computed on first use.
//!
//! [`Lazy`] runs its initializer the first time it is asked for the value and
//! hands back the cached result afterwards. [`AsyncLazy`] starts the
//! computation on a background thread right away and collects the result the
//! first time it is needed.

use crate::storage::fmt_presence;
use crate::OptionalRef;
use std::cell::OnceCell;
use std::fmt;
use std::panic;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread::{self, JoinHandle};

/// A value computed by the first caller that needs it.
///
/// The initializer is supplied at the call site, so the same cache can sit in
/// a struct that only learns how to compute the value later.
///
/// ```
/// use sovran_optional::Lazy;
///
/// let cmake_version: Lazy<String> = Lazy::new();
/// assert!(!cmake_version.get().has_value());
///
/// let first = cmake_version.get_lazy(|| String::from("3.29.2"));
/// assert_eq!(first, "3.29.2");
///
/// // Later initializers are ignored.
/// let second = cmake_version.get_lazy(|| String::from("unused"));
/// assert_eq!(second, "3.29.2");
/// ```
pub struct Lazy<T> {
    cell: OnceCell<T>,
}

impl<T> Lazy<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, running `init` first if nothing is cached yet.
    pub fn get_lazy<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(init)
    }

    /// The cached value, or empty if no caller has computed it yet.
    pub fn get(&self) -> OptionalRef<'_, T> {
        self.cell.get().into()
    }

    pub fn into_inner(self) -> crate::Optional<T> {
        self.cell.into_inner().into()
    }
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.cell.get(), f)
    }
}

/// A value computed on a background thread and collected on first use.
///
/// ```
/// use sovran_optional::AsyncLazy;
///
/// let baseline = AsyncLazy::spawn(|| (1..=4).product::<u64>());
/// // Other work happens here while the baseline is computed.
/// assert_eq!(*baseline.get(), 24);
/// assert_eq!(*baseline.get(), 24);
/// ```
pub struct AsyncLazy<T> {
    value: OnceLock<T>,
    worker: Mutex<Option<JoinHandle<T>>>,
}

impl<T> AsyncLazy<T>
where
    T: Send + 'static,
{
    /// Starts `work` on a new thread.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        tracing::debug!("starting background computation");
        Self {
            value: OnceLock::new(),
            worker: Mutex::new(Some(thread::spawn(work))),
        }
    }
}

impl<T> AsyncLazy<T> {
    /// Waits for the background computation the first time and returns its result.
    ///
    /// # Panics
    ///
    /// Re-raises the panic of a computation that panicked.
    pub fn get(&self) -> &T {
        self.value.get_or_init(|| {
            let worker = self
                .worker
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match worker.map(JoinHandle::join) {
                Some(Ok(value)) => value,
                Some(Err(payload)) => panic::resume_unwind(payload),
                None => panic!("background computation panicked on an earlier access"),
            }
        })
    }

    /// The result if it has already been collected, without waiting.
    pub fn try_get(&self) -> OptionalRef<'_, T> {
        self.value.get().into()
    }

    /// Returns `true` once the result is available without blocking.
    pub fn is_ready(&self) -> bool {
        if self.value.get().is_some() {
            return true;
        }
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(JoinHandle::is_finished)
    }
}

impl<T: fmt::Debug> fmt::Debug for AsyncLazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.value.get(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_lazy_runs_initializer_once() {
        let calls = Cell::new(0);
        let cache: Lazy<u32> = Lazy::default();
        for _ in 0..3 {
            let value = cache.get_lazy(|| {
                calls.set(calls.get() + 1);
                7
            });
            assert_eq!(*value, 7);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.into_inner(), 7u32);
    }

    #[test]
    fn test_unused_lazy_is_empty() {
        let cache: Lazy<String> = Lazy::new();
        assert!(!cache.get().has_value());
        assert_eq!(format!("{:?}", cache), "Empty");
        assert!(!cache.into_inner().has_value());
    }
}
