// src/lite.rs
use crate::storage::{fmt_presence, Storage, ValueStorage};
use crate::{NullOpt, Optional};
use std::fmt;
use std::mem;

/// A minimal presence-tagged slot for hot paths.
///
/// `LiteOptional` shares its storage with [`Optional`] but keeps the surface
/// down to construction, presence, access and `emplace`: no combinators, no
/// payload comparisons, no fail-fast extraction. Construction forwards its
/// argument through `From`, so the payload is built in place from whatever
/// it can be built from.
///
/// When the payload needs no drop, `emplace` skips the teardown step, and a
/// `Copy` payload makes the container `Copy` as well.
///
/// ```
/// use sovran_optional::LiteOptional;
///
/// let mut path: LiteOptional<String> = LiteOptional::construct("ports/zlib");
/// assert!(path.has_value());
///
/// path.emplace("ports/fmt");
/// assert_eq!(path.value(), "ports/fmt");
/// ```
pub struct LiteOptional<T> {
    storage: ValueStorage<T>,
}

impl<T> LiteOptional<T> {
    pub const fn empty() -> Self {
        Self {
            storage: ValueStorage::empty(),
        }
    }

    /// Builds the payload from `args`.
    pub fn construct<A>(args: A) -> Self
    where
        T: From<A>,
    {
        Self {
            storage: ValueStorage::new(T::from(args)),
        }
    }

    pub fn has_value(&self) -> bool {
        self.storage.has_value()
    }

    pub fn get(&self) -> Option<&T> {
        self.storage.get()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.storage.get_mut()
    }

    /// # Panics
    ///
    /// Panics if the slot is empty.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.storage.get() {
            Some(value) => value,
            None => empty_slot(),
        }
    }

    /// # Panics
    ///
    /// Panics if the slot is empty.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self.storage.get_mut() {
            Some(value) => value,
            None => empty_slot(),
        }
    }

    /// # Panics
    ///
    /// Panics if the slot is empty.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.storage.into_inner() {
            Some(value) => value,
            None => empty_slot(),
        }
    }

    /// Replaces the payload with one built from `args`.
    pub fn emplace<A>(&mut self, args: A) -> &mut T
    where
        T: From<A>,
    {
        if mem::needs_drop::<T>() {
            self.storage.destroy();
        }
        self.storage.construct(T::from(args))
    }
}

/// Wraps `value` in a present [`LiteOptional`].
pub fn make_lite_optional<T>(value: T) -> LiteOptional<T> {
    LiteOptional {
        storage: ValueStorage::new(value),
    }
}

#[track_caller]
fn empty_slot() -> ! {
    panic!("accessed an empty LiteOptional")
}

impl<T> Default for LiteOptional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<NullOpt> for LiteOptional<T> {
    fn from(_: NullOpt) -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for LiteOptional<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}

impl<T: Copy> Copy for LiteOptional<T> {}

impl<T: fmt::Debug> fmt::Debug for LiteOptional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.storage.get(), f)
    }
}

/// Opts into the combinator surface.
impl<T> From<LiteOptional<T>> for Optional<T> {
    fn from(lite: LiteOptional<T>) -> Self {
        lite.storage.into_inner().into()
    }
}
