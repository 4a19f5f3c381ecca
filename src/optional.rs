// src/optional.rs
use crate::checks::{self, ABSENT_VALUE_MESSAGE};
use crate::reference::{OptionalMut, OptionalRef};
use crate::storage::{fmt_presence, Storage, ValueStorage};
use crate::{LineInfo, NullOpt};
use std::fmt;

/// An owned value that may be absent.
///
/// `Optional` is either *Empty* or *Present* with exactly one payload. Every
/// fallible lookup in the surrounding tooling returns one instead of failing,
/// and callers decide whether to fall back, chain, or fail fast.
///
/// Methods that borrow the container leave the payload in place; the `into_*`
/// forms consume the container and move the payload out without copying it.
///
/// # Examples
///
/// ```
/// use sovran_optional::{line_info, Optional};
///
/// fn find_port(name: &str) -> Optional<u16> {
///     match name {
///         "zlib" => Optional::new(1),
///         _ => Optional::empty(),
///     }
/// }
///
/// assert!(find_port("zlib").has_value());
/// assert_eq!(find_port("curl").value_or(0u16), 0);
///
/// let version = find_port("zlib").map(|id| format!("port-{}", id));
/// assert_eq!(version.value_or_exit(line_info!()), "port-1");
/// ```
pub struct Optional<T> {
    storage: ValueStorage<T>,
}

impl<T> Optional<T> {
    /// Creates an empty container.
    pub const fn empty() -> Self {
        Self {
            storage: ValueStorage::empty(),
        }
    }

    /// Creates a container holding `value`.
    pub const fn new(value: T) -> Self {
        Self {
            storage: ValueStorage::new(value),
        }
    }

    /// Converts a container of a related payload type, consuming it.
    ///
    /// ```
    /// use sovran_optional::Optional;
    ///
    /// let narrow: Optional<u8> = Optional::new(200);
    /// let wide: Optional<u64> = Optional::from_related(narrow);
    /// assert_eq!(wide, Optional::new(200u64));
    /// ```
    pub fn from_related<U>(source: Optional<U>) -> Self
    where
        T: From<U>,
    {
        Self {
            storage: ValueStorage::from_related(source.storage),
        }
    }

    /// Converts a container of a related payload type, leaving the source intact.
    pub fn from_related_ref<U>(source: &Optional<U>) -> Self
    where
        U: Clone,
        T: From<U>,
    {
        Self {
            storage: ValueStorage::from_related_ref(&source.storage),
        }
    }

    /// Returns `true` if a payload is present. Has no side effects.
    pub fn has_value(&self) -> bool {
        self.storage.has_value()
    }

    /// Returns the payload, or `None` when empty.
    pub fn get(&self) -> Option<&T> {
        self.storage.get()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.storage.get_mut()
    }

    /// Returns the payload.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty. Use [`get`](Self::get) or
    /// [`value_or_exit`](Self::value_or_exit) when absence is possible.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.storage.get() {
            Some(value) => value,
            None => absent_value(),
        }
    }

    /// Mutable form of [`value`](Self::value).
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self.storage.get_mut() {
            Some(value) => value,
            None => absent_value(),
        }
    }

    /// Moves the payload out of the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.storage.into_inner() {
            Some(value) => value,
            None => absent_value(),
        }
    }

    /// Returns the payload or terminates the process.
    ///
    /// An empty container here is a programmer error: the diagnostic
    /// `value was absent` is printed with `line_info` and the process exits.
    /// Nothing is thrown and nothing is returned to recover from.
    pub fn value_or_exit(&self, line_info: LineInfo) -> &T {
        match self.storage.get() {
            Some(value) => value,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    pub fn value_or_exit_mut(&mut self, line_info: LineInfo) -> &mut T {
        match self.storage.get_mut() {
            Some(value) => value,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    pub fn into_value_or_exit(self, line_info: LineInfo) -> T {
        match self.storage.into_inner() {
            Some(value) => value,
            None => checks::exit_with_message(line_info, ABSENT_VALUE_MESSAGE),
        }
    }

    /// Returns a copy of the payload, or `default` converted into `T`.
    pub fn value_or<U>(&self, default: U) -> T
    where
        T: Clone,
        U: Into<T>,
    {
        match self.storage.get() {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Consuming form of [`value_or`](Self::value_or); the payload is moved, never copied.
    pub fn into_value_or<U>(self, default: U) -> T
    where
        U: Into<T>,
    {
        match self.storage.into_inner() {
            Some(value) => value,
            None => default.into(),
        }
    }

    /// Replaces the payload with one built from `value`.
    ///
    /// A present payload is dropped before `value` is converted; exactly one
    /// drop and one construction happen per call.
    pub fn emplace<A>(&mut self, value: A) -> &mut T
    where
        A: Into<T>,
    {
        self.storage.destroy();
        self.storage.construct(value.into())
    }

    /// Like [`emplace`](Self::emplace), building the payload with `make`.
    ///
    /// The old payload is dropped before `make` runs.
    pub fn emplace_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.storage.destroy();
        self.storage.construct(make())
    }

    /// Drops the payload, if any, and leaves the container empty.
    pub fn clear(&mut self) {
        if self.storage.has_value() {
            self.storage.destroy();
        }
    }

    /// Move-assigns `source` into `self`.
    ///
    /// | self    | source  | effect                                   |
    /// |---------|---------|------------------------------------------|
    /// | Empty   | Empty   | nothing                                  |
    /// | Empty   | Present | payload moved in                         |
    /// | Present | Empty   | payload dropped                          |
    /// | Present | Present | payload moved over the existing one      |
    ///
    /// The copying counterpart is [`Clone::clone_from`].
    pub fn assign(&mut self, source: Optional<T>) {
        self.storage.assign(source.storage);
    }

    /// Applies `f` to a borrowed payload. `f` is not called when empty.
    pub fn map<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self.storage.get() {
            Some(value) => Optional::new(f(value)),
            None => Optional::empty(),
        }
    }

    /// Applies `f` to the moved-out payload.
    pub fn into_map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.storage.into_inner() {
            Some(value) => Optional::new(f(value)),
            None => Optional::empty(),
        }
    }

    /// Chains another fallible lookup on a borrowed payload.
    ///
    /// ```
    /// use sovran_optional::Optional;
    ///
    /// fn parse(text: &String) -> Optional<u32> {
    ///     text.parse().ok().into()
    /// }
    ///
    /// assert_eq!(Optional::new(String::from("12")).then(parse), Optional::new(12));
    /// assert!(!Optional::new(String::from("x")).then(parse).has_value());
    /// assert!(!Optional::<String>::empty().then(parse).has_value());
    /// ```
    pub fn then<U, F>(&self, f: F) -> Optional<U>
    where
        F: FnOnce(&T) -> Optional<U>,
    {
        match self.storage.get() {
            Some(value) => f(value),
            None => Optional::empty(),
        }
    }

    pub fn into_then<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self.storage.into_inner() {
            Some(value) => f(value),
            None => Optional::empty(),
        }
    }

    /// Returns `true` if present and the payload equals `other`.
    pub fn contains<U>(&self, other: &U) -> bool
    where
        T: PartialEq<U>,
        U: ?Sized,
    {
        self.storage.get().is_some_and(|value| value == other)
    }

    /// Borrows the payload through a shared alias container.
    pub fn as_ref(&self) -> OptionalRef<'_, T> {
        OptionalRef::from(self)
    }

    /// Borrows the payload through an exclusive alias container.
    pub fn as_mut(&mut self) -> OptionalMut<'_, T> {
        OptionalMut::from(self)
    }

    pub fn into_option(self) -> Option<T> {
        self.storage.into_inner()
    }
}

#[track_caller]
fn absent_value() -> ! {
    panic!("{} ({})", ABSENT_VALUE_MESSAGE, LineInfo::caller())
}

/// Wraps `value` in a present container.
pub fn make_optional<T>(value: T) -> Optional<T> {
    Optional::new(value)
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }

    /// Copy-assignment: an existing payload is updated with its own `clone_from`.
    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}

impl<T: Copy> Copy for Optional<T> {}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_presence(self.storage.get(), f)
    }
}

impl<T: std::hash::Hash> std::hash::Hash for Optional<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.storage, state);
    }
}

impl<T> From<NullOpt> for Optional<T> {
    fn from(_: NullOpt) -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_option()
    }
}

impl<T> From<&Optional<T>> for bool {
    fn from(optional: &Optional<T>) -> Self {
        optional.has_value()
    }
}

impl<T> Storage for Optional<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{line_info, NULLOPT};

    #[test]
    fn test_empty_constructions_report_absent() {
        let defaulted: Optional<i32> = Optional::default();
        let sentinel: Optional<i32> = NULLOPT.into();
        assert!(!defaulted.has_value());
        assert!(!sentinel.has_value());
        assert!(!bool::from(&sentinel));
    }

    #[test]
    fn test_value_forms() {
        let mut name = Optional::new(String::from("zlib"));
        assert!(bool::from(&name));
        assert_eq!(name.value(), "zlib");

        name.value_mut().push_str("-ng");
        assert_eq!(name.get().map(String::as_str), Some("zlib-ng"));
        assert_eq!(name.value_or_exit(line_info!()), "zlib-ng");
        assert_eq!(name.into_value(), "zlib-ng");
    }

    #[test]
    #[should_panic(expected = "value was absent")]
    fn test_value_on_empty_panics() {
        let missing: Optional<i32> = Optional::empty();
        let _ = missing.value();
    }

    #[test]
    fn test_value_or_converts_default() {
        let missing: Optional<String> = Optional::empty();
        assert_eq!(missing.value_or("fallback"), "fallback");
        assert_eq!(missing.into_value_or("moved"), "moved");

        let present = Optional::new(String::from("x64-linux"));
        assert_eq!(present.value_or("fallback"), "x64-linux");
        assert!(present.has_value());
    }

    #[test]
    fn test_emplace_and_clear() {
        let mut triplet: Optional<String> = Optional::empty();
        triplet.emplace("x64-windows");
        assert_eq!(triplet.value(), "x64-windows");

        triplet.emplace_with(|| String::from("arm64-osx")).push('!');
        assert_eq!(triplet.value(), "arm64-osx!");

        triplet.clear();
        assert!(!triplet.has_value());
        triplet.clear();
        assert!(!triplet.has_value());
    }

    #[test]
    fn test_option_round_trip() {
        let optional: Optional<u8> = Some(3).into();
        assert_eq!(Option::<u8>::from(optional), Some(3));
        assert_eq!(Optional::<u8>::from(None).into_option(), None);
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", Optional::new(5)), "Present(5)");
        assert_eq!(format!("{:?}", Optional::<i32>::empty()), "Empty");
    }
}
