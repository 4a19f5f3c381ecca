// src/reference.rs
//! Alias containers: presence means "bound to an object someone else owns".
//!
//! Nothing is ever copied, constructed or dropped through these types. They
//! only offer borrowing access, so there is no way to move a payload out of
//! an alias:
//!
//! ```compile_fail
//! use sovran_optional::OptionalRef;
//!
//! let port = String::from("zlib");
//! let alias = OptionalRef::new(&port);
//! let owned: String = alias.into_value();
//! ```

use crate::checks::{self, ABSENT_VALUE_MESSAGE};
use crate::storage::{fmt_presence, MutRefStorage, RefStorage, Storage};
use crate::{LineInfo, NullOpt, Optional};
use std::fmt;

/// A shared alias that may be unbound.
///
/// ```
/// use sovran_optional::{Optional, OptionalRef};
///
/// let installed = Optional::new(String::from("fmt"));
/// let alias: OptionalRef<'_, String> = OptionalRef::from(&installed);
/// assert_eq!(alias.value(), "fmt");
///
/// let missing: Optional<String> = Optional::empty();
/// assert!(!missing.as_ref().has_value());
/// ```
pub struct OptionalRef<'a, T: ?Sized> {
    storage: RefStorage<'a, T>,
}

impl<'a, T: ?Sized> OptionalRef<'a, T> {
    pub const fn empty() -> Self {
        Self {
            storage: RefStorage::empty(),
        }
    }

    pub const fn new(target: &'a T) -> Self {
        Self {
            storage: RefStorage::new(target),
        }
    }

    pub fn has_value(&self) -> bool {
        self.storage.has_value()
    }

    pub fn get(&self) -> Option<&'a T> {
        self.storage.alias()
    }

    /// Returns the aliased object.
    ///
    /// # Panics
    ///
    /// Panics if the alias is unbound.
    #[track_caller]
    pub fn value(&self) -> &'a T {
        match self.storage.alias() {
            Some(target) => target,
            None => panic!("{} ({})", ABSENT_VALUE_MESSAGE, LineInfo::caller()),
        }
    }

    /// Returns the aliased object or terminates the process.
    pub fn value_or_exit(&self, line_info: LineInfo) -> &'a T {
        match self.storage.alias() {
            Some(target) => target,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    /// Returns the aliased object, or `default` when unbound.
    pub fn value_or(&self, default: &'a T) -> &'a T {
        self.storage.alias().unwrap_or(default)
    }

    /// Binds the alias to `target`. A previously aliased object is not modified.
    pub fn emplace(&mut self, target: &'a T) -> &'a T {
        self.storage.emplace(target)
    }

    /// Unbinds the alias.
    pub fn clear(&mut self) {
        self.storage.destroy();
    }

    pub fn map<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&'a T) -> U,
    {
        match self.storage.alias() {
            Some(target) => Optional::new(f(target)),
            None => Optional::empty(),
        }
    }

    pub fn then<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&'a T) -> Optional<U>,
    {
        match self.storage.alias() {
            Some(target) => f(target),
            None => Optional::empty(),
        }
    }

    /// Copies the aliased object into an owned container.
    pub fn cloned(&self) -> Optional<T>
    where
        T: Clone,
    {
        self.map(T::clone)
    }

    pub fn contains<U>(&self, other: &U) -> bool
    where
        T: PartialEq<U>,
        U: ?Sized,
    {
        self.storage.alias().is_some_and(|target| target == other)
    }
}

impl<T: ?Sized> Clone for OptionalRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for OptionalRef<'_, T> {}

impl<T: ?Sized> Default for OptionalRef<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for OptionalRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.storage.alias(), f)
    }
}

impl<'a, T: ?Sized> From<&'a T> for OptionalRef<'a, T> {
    fn from(target: &'a T) -> Self {
        Self::new(target)
    }
}

impl<T: ?Sized> From<NullOpt> for OptionalRef<'_, T> {
    fn from(_: NullOpt) -> Self {
        Self::empty()
    }
}

impl<'a, T: ?Sized> From<Option<&'a T>> for OptionalRef<'a, T> {
    fn from(alias: Option<&'a T>) -> Self {
        Self {
            storage: RefStorage::from_alias(alias),
        }
    }
}

impl<T: ?Sized> From<&OptionalRef<'_, T>> for bool {
    fn from(alias: &OptionalRef<'_, T>) -> Self {
        alias.has_value()
    }
}

impl<'a, T> From<&'a Optional<T>> for OptionalRef<'a, T> {
    fn from(source: &'a Optional<T>) -> Self {
        Self {
            storage: RefStorage::from_alias(source.get()),
        }
    }
}

impl<'a, 'b, T: ?Sized> From<&'a OptionalMut<'b, T>> for OptionalRef<'a, T> {
    fn from(source: &'a OptionalMut<'b, T>) -> Self {
        Self {
            storage: RefStorage::from_alias(source.get()),
        }
    }
}

impl<'a, T: ?Sized> From<OptionalMut<'a, T>> for OptionalRef<'a, T> {
    fn from(source: OptionalMut<'a, T>) -> Self {
        let alias = source.storage.into_alias().map(|target| &*target);
        Self {
            storage: RefStorage::from_alias(alias),
        }
    }
}

impl<T: ?Sized> Storage for OptionalRef<'_, T> {
    type Target = T;

    fn has_value(&self) -> bool {
        self.storage.has_value()
    }

    fn get(&self) -> Option<&T> {
        self.storage.get()
    }

    fn destroy(&mut self) {
        self.storage.destroy();
    }
}

/// An exclusive alias that may be unbound.
///
/// Writes through the alias land in the aliased object:
///
/// ```
/// use sovran_optional::Optional;
///
/// let mut features = Optional::new(vec![String::from("core")]);
/// {
///     let mut alias = features.as_mut();
///     alias.value_mut().push(String::from("ssl"));
/// }
/// assert_eq!(features.value().len(), 2);
/// ```
pub struct OptionalMut<'a, T: ?Sized> {
    storage: MutRefStorage<'a, T>,
}

impl<'a, T: ?Sized> OptionalMut<'a, T> {
    pub const fn empty() -> Self {
        Self {
            storage: MutRefStorage::empty(),
        }
    }

    pub fn new(target: &'a mut T) -> Self {
        Self {
            storage: MutRefStorage::new(target),
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
    /// Panics if the alias is unbound.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.storage.get() {
            Some(target) => target,
            None => panic!("{} ({})", ABSENT_VALUE_MESSAGE, LineInfo::caller()),
        }
    }

    /// # Panics
    ///
    /// Panics if the alias is unbound.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self.storage.get_mut() {
            Some(target) => target,
            None => panic!("{} ({})", ABSENT_VALUE_MESSAGE, LineInfo::caller()),
        }
    }

    pub fn value_or_exit(&self, line_info: LineInfo) -> &T {
        match self.storage.get() {
            Some(target) => target,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    pub fn value_or_exit_mut(&mut self, line_info: LineInfo) -> &mut T {
        match self.storage.get_mut() {
            Some(target) => target,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    pub fn value_or<'s>(&'s self, default: &'s T) -> &'s T {
        self.storage.get().unwrap_or(default)
    }

    /// Binds the alias to `target`. A previously aliased object is not modified.
    pub fn emplace(&mut self, target: &'a mut T) -> &mut T {
        self.storage.emplace(target)
    }

    pub fn clear(&mut self) {
        self.storage.destroy();
    }

    pub fn map<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self.storage.get() {
            Some(target) => Optional::new(f(target)),
            None => Optional::empty(),
        }
    }

    pub fn then<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&T) -> Optional<U>,
    {
        match self.storage.get() {
            Some(target) => f(target),
            None => Optional::empty(),
        }
    }

    pub fn contains<U>(&self, other: &U) -> bool
    where
        T: PartialEq<U>,
        U: ?Sized,
    {
        self.storage.get().is_some_and(|target| target == other)
    }

    /// Reborrows as a shared alias.
    pub fn as_ref(&self) -> OptionalRef<'_, T> {
        OptionalRef::from(self)
    }
}

impl<T: ?Sized> Default for OptionalMut<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for OptionalMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.storage.get(), f)
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for OptionalMut<'a, T> {
    fn from(target: &'a mut T) -> Self {
        Self::new(target)
    }
}

impl<T: ?Sized> From<NullOpt> for OptionalMut<'_, T> {
    fn from(_: NullOpt) -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> From<&OptionalMut<'_, T>> for bool {
    fn from(alias: &OptionalMut<'_, T>) -> Self {
        alias.has_value()
    }
}

impl<'a, T> From<&'a mut Optional<T>> for OptionalMut<'a, T> {
    fn from(source: &'a mut Optional<T>) -> Self {
        Self {
            storage: MutRefStorage::from_alias(source.get_mut()),
        }
    }
}

impl<T: ?Sized> Storage for OptionalMut<'_, T> {
    type Target = T;

    fn has_value(&self) -> bool {
        self.storage.has_value()
    }

    fn get(&self) -> Option<&T> {
        self.storage.get()
    }

    fn destroy(&mut self) {
        self.storage.destroy();
    }
}
