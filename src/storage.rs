// src/storage.rs
//! Backing representations for the presence-tagged containers.
//!
//! Owned payloads live in [`ValueStorage`]. Whether a container is copyable or
//! move-only is decided by the payload: the copy operations below exist only
//! for `T: Clone`, and `T: Copy` payloads make the whole storage `Copy`.
//! Aliases live in [`RefStorage`] and [`MutRefStorage`]; neither ever drops
//! the object it points at.

use std::fmt;

/// Contract shared by every storage strategy.
pub(crate) trait Storage {
    type Target: ?Sized;

    fn has_value(&self) -> bool;

    fn get(&self) -> Option<&Self::Target>;

    /// Tears down the payload (or forgets the alias) and marks the slot empty.
    fn destroy(&mut self);
}

/// Renders a slot as `Present(..)` or `Empty`.
pub(crate) fn fmt_presence<T>(value: Option<&T>, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: fmt::Debug + ?Sized,
{
    match value {
        Some(value) => f.debug_tuple("Present").field(&value).finish(),
        None => f.write_str("Empty"),
    }
}

/// Owned payload slot.
#[derive(Hash)]
pub(crate) struct ValueStorage<T> {
    slot: Option<T>,
}

impl<T> ValueStorage<T> {
    pub(crate) const fn empty() -> Self {
        Self { slot: None }
    }

    pub(crate) const fn new(value: T) -> Self {
        Self { slot: Some(value) }
    }

    /// Converts an owned slot of a related payload type.
    ///
    /// The source is inspected first; an empty source never constructs a `T`.
    pub(crate) fn from_related<U>(source: ValueStorage<U>) -> Self
    where
        T: From<U>,
    {
        match source.slot {
            Some(value) => Self::new(T::from(value)),
            None => Self::empty(),
        }
    }

    pub(crate) fn from_related_ref<U>(source: &ValueStorage<U>) -> Self
    where
        U: Clone,
        T: From<U>,
    {
        match source.slot.as_ref() {
            Some(value) => Self::new(T::from(value.clone())),
            None => Self::empty(),
        }
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.slot
    }

    /// Stores `value` without running teardown first.
    ///
    /// Only correct when the slot is empty or `T` needs no drop.
    pub(crate) fn construct(&mut self, value: T) -> &mut T {
        self.slot.insert(value)
    }

    /// Move-assignment following the presence transition matrix.
    pub(crate) fn assign(&mut self, source: Self) {
        match source.slot {
            Some(value) => {
                if let Some(current) = self.slot.as_mut() {
                    *current = value;
                } else {
                    self.construct(value);
                }
            }
            None => self.destroy(),
        }
    }
}

impl<T> Storage for ValueStorage<T> {
    type Target = T;

    fn has_value(&self) -> bool {
        self.slot.is_some()
    }

    fn get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    fn destroy(&mut self) {
        drop(self.slot.take());
    }
}

impl<T: Clone> Clone for ValueStorage<T> {
    fn clone(&self) -> Self {
        match self.slot.as_ref() {
            Some(value) => Self::new(value.clone()),
            None => Self::empty(),
        }
    }

    /// Copy-assignment following the presence transition matrix.
    fn clone_from(&mut self, source: &Self) {
        match source.slot.as_ref() {
            Some(value) => {
                if let Some(current) = self.slot.as_mut() {
                    current.clone_from(value);
                } else {
                    self.construct(value.clone());
                }
            }
            None => self.destroy(),
        }
    }
}

impl<T: Copy> Copy for ValueStorage<T> {}

/// Shared alias slot. Presence means the alias is bound.
pub(crate) struct RefStorage<'a, T: ?Sized> {
    alias: Option<&'a T>,
}

impl<'a, T: ?Sized> RefStorage<'a, T> {
    pub(crate) const fn empty() -> Self {
        Self { alias: None }
    }

    pub(crate) const fn new(target: &'a T) -> Self {
        Self {
            alias: Some(target),
        }
    }

    pub(crate) fn from_alias(alias: Option<&'a T>) -> Self {
        Self { alias }
    }

    pub(crate) fn alias(&self) -> Option<&'a T> {
        self.alias
    }

    /// Rebinds to `target`; the previously aliased object is left untouched.
    pub(crate) fn emplace(&mut self, target: &'a T) -> &'a T {
        self.alias = Some(target);
        target
    }
}

impl<T: ?Sized> Clone for RefStorage<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for RefStorage<'_, T> {}

impl<T: ?Sized> Storage for RefStorage<'_, T> {
    type Target = T;

    fn has_value(&self) -> bool {
        self.alias.is_some()
    }

    fn get(&self) -> Option<&T> {
        self.alias
    }

    fn destroy(&mut self) {
        self.alias = None;
    }
}

/// Exclusive alias slot.
pub(crate) struct MutRefStorage<'a, T: ?Sized> {
    alias: Option<&'a mut T>,
}

impl<'a, T: ?Sized> MutRefStorage<'a, T> {
    pub(crate) const fn empty() -> Self {
        Self { alias: None }
    }

    pub(crate) fn new(target: &'a mut T) -> Self {
        Self {
            alias: Some(target),
        }
    }

    pub(crate) fn from_alias(alias: Option<&'a mut T>) -> Self {
        Self { alias }
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        self.alias.as_deref_mut()
    }

    pub(crate) fn into_alias(self) -> Option<&'a mut T> {
        self.alias
    }

    /// Rebinds to `target`; the previously aliased object is left untouched.
    pub(crate) fn emplace(&mut self, target: &'a mut T) -> &mut T {
        self.alias.insert(target)
    }
}

impl<T: ?Sized> Storage for MutRefStorage<'_, T> {
    type Target = T;

    fn has_value(&self) -> bool {
        self.alias.is_some()
    }

    fn get(&self) -> Option<&T> {
        self.alias.as_deref()
    }

    fn destroy(&mut self) {
        self.alias = None;
    }
}
