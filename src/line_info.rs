use std::fmt;
use std::panic::Location;

/// A source location attributed to the caller of a fail-fast operation.
///
/// Usually produced with the [`line_info!`](crate::line_info) macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineInfo {
    file: &'static str,
    line: u32,
}

impl LineInfo {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of whoever called the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.file, self.line)
    }
}

/// Expands to the [`LineInfo`] of the invocation site.
///
/// ```
/// use sovran_optional::{line_info, LineInfo};
///
/// let here: LineInfo = line_info!();
/// assert!(here.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! line_info {
    () => {
        $crate::LineInfo::new(file!(), line!())
    };
}
