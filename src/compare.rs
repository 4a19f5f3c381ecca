// src/compare.rs
//! Equality between containers, and between a container and a bare payload.
//!
//! Comparisons exist exactly when the payload types are comparable: two
//! containers are equal when both are empty or both hold equal payloads, and
//! a container equals a bare value only when it holds an equal payload.

use crate::storage::Storage;
use crate::{Optional, OptionalMut, OptionalRef};

fn presence_eq<L, R>(lhs: &L, rhs: &R) -> bool
where
    L: Storage,
    R: Storage,
    L::Target: PartialEq<R::Target>,
{
    match (lhs.get(), rhs.get()) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        (None, None) => true,
        _ => false,
    }
}

impl<T, U> PartialEq<Optional<U>> for Optional<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Optional<U>) -> bool {
        presence_eq(self, other)
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<'b, T, U> PartialEq<OptionalRef<'b, U>> for Optional<T>
where
    T: PartialEq<U>,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalRef<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, T, U> PartialEq<Optional<U>> for OptionalRef<'a, T>
where
    T: PartialEq<U> + ?Sized,
{
    fn eq(&self, other: &Optional<U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, 'b, T, U> PartialEq<OptionalRef<'b, U>> for OptionalRef<'a, T>
where
    T: PartialEq<U> + ?Sized,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalRef<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<T: Eq + ?Sized> Eq for OptionalRef<'_, T> {}

impl<'b, T, U> PartialEq<OptionalMut<'b, U>> for Optional<T>
where
    T: PartialEq<U>,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalMut<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, T, U> PartialEq<Optional<U>> for OptionalMut<'a, T>
where
    T: PartialEq<U> + ?Sized,
{
    fn eq(&self, other: &Optional<U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, 'b, T, U> PartialEq<OptionalMut<'b, U>> for OptionalRef<'a, T>
where
    T: PartialEq<U> + ?Sized,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalMut<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, 'b, T, U> PartialEq<OptionalRef<'b, U>> for OptionalMut<'a, T>
where
    T: PartialEq<U> + ?Sized,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalRef<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<'a, 'b, T, U> PartialEq<OptionalMut<'b, U>> for OptionalMut<'a, T>
where
    T: PartialEq<U> + ?Sized,
    U: ?Sized,
{
    fn eq(&self, other: &OptionalMut<'b, U>) -> bool {
        presence_eq(self, other)
    }
}

impl<T: Eq + ?Sized> Eq for OptionalMut<'_, T> {}

/// Container-versus-payload equality in both operand orders.
///
/// A blanket `Optional<T> == U` would overlap with `Optional<T> == Optional<U>`,
/// so payload comparisons are spelled out per type. Other payload types use
/// [`Optional::contains`].
macro_rules! impl_payload_eq {
    ($($payload:ty),* $(,)?) => {
        $(
            impl PartialEq<$payload> for Optional<$payload> {
                fn eq(&self, other: &$payload) -> bool {
                    self.contains(other)
                }
            }

            impl PartialEq<Optional<$payload>> for $payload {
                fn eq(&self, other: &Optional<$payload>) -> bool {
                    other.contains(self)
                }
            }

            impl PartialEq<$payload> for OptionalRef<'_, $payload> {
                fn eq(&self, other: &$payload) -> bool {
                    self.contains(other)
                }
            }

            impl PartialEq<OptionalRef<'_, $payload>> for $payload {
                fn eq(&self, other: &OptionalRef<'_, $payload>) -> bool {
                    other.contains(self)
                }
            }

            impl PartialEq<$payload> for OptionalMut<'_, $payload> {
                fn eq(&self, other: &$payload) -> bool {
                    self.contains(other)
                }
            }

            impl PartialEq<OptionalMut<'_, $payload>> for $payload {
                fn eq(&self, other: &OptionalMut<'_, $payload>) -> bool {
                    other.contains(self)
                }
            }
        )*
    };
}

impl_payload_eq!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl PartialEq<str> for Optional<String> {
    fn eq(&self, other: &str) -> bool {
        self.contains(other)
    }
}

impl<'b> PartialEq<&'b str> for Optional<String> {
    fn eq(&self, other: &&'b str) -> bool {
        self.contains(*other)
    }
}

impl PartialEq<Optional<String>> for str {
    fn eq(&self, other: &Optional<String>) -> bool {
        other.contains(self)
    }
}

impl PartialEq<Optional<String>> for &str {
    fn eq(&self, other: &Optional<String>) -> bool {
        other.contains(*self)
    }
}

impl PartialEq<str> for OptionalRef<'_, str> {
    fn eq(&self, other: &str) -> bool {
        self.contains(other)
    }
}

impl<'b> PartialEq<&'b str> for OptionalRef<'_, str> {
    fn eq(&self, other: &&'b str) -> bool {
        self.contains(*other)
    }
}

impl PartialEq<str> for OptionalMut<'_, str> {
    fn eq(&self, other: &str) -> bool {
        self.contains(other)
    }
}

impl<'b> PartialEq<&'b str> for OptionalMut<'_, str> {
    fn eq(&self, other: &&'b str) -> bool {
        self.contains(*other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Optional, OptionalRef};

    #[test]
    fn test_heterogeneous_payloads() {
        let owned = Optional::new(String::from("boost"));
        let borrowed: OptionalRef<'_, str> = OptionalRef::new("boost");
        assert!(owned == borrowed);
        assert!(borrowed == owned);
        assert!(owned == "boost");
        assert!("boost" == owned);
        assert!(borrowed == "boost");
    }

    #[test]
    fn test_empty_alias_against_empty_owner() {
        let owned: Optional<i32> = Optional::empty();
        let alias: OptionalRef<'_, i32> = OptionalRef::empty();
        assert!(owned == alias);
        assert!(alias != Optional::new(1));
    }
}
