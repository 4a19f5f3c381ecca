/// Tag type used to build an empty container.
///
/// `NullOpt` is zero-sized and only constructible through [`NULLOPT`], so
/// `Optional::from(NULLOPT)` can never be confused with a value-carrying
/// construction.
///
/// ```
/// use sovran_optional::{Optional, NULLOPT};
///
/// let missing: Optional<String> = NULLOPT.into();
/// assert!(!missing.has_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullOpt {
    _private: (),
}

/// The single [`NullOpt`] value.
pub const NULLOPT: NullOpt = NullOpt { _private: () };
