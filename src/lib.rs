//! # sovran-optional
//!
//! Presence-tagged value containers for tooling that has to say "not there"
//! everywhere: an unresolved dependency, a missing file, an unset build policy.
//!
//! `sovran-optional` gives every fallible lookup a single return shape. A
//! container is either *Empty* or *Present*, and callers decide whether to fall
//! back to a default, chain another lookup, or stop the process because the
//! value had to be there.
//!
//! ## Key Features
//!
//! - **Owned and borrowed payloads**: [`Optional`] owns its value,
//!   [`OptionalRef`] and [`OptionalMut`] alias values owned elsewhere
//! - **Copy follows the payload**: copy operations exist only for `Clone`
//!   payloads; move-only payloads stay move-only
//! - **Monadic chaining**: `map` and `then` compose lookups without a presence
//!   check at every step
//! - **Fail fast on programmer errors**: [`Optional::value_or_exit`] prints a
//!   located diagnostic and exits instead of unwinding
//! - **Lightweight variant**: [`LiteOptional`] for hot paths that only need
//!   construct, query, access and `emplace`
//! - **Computed on demand**: [`Lazy`] caches the first computed value,
//!   [`AsyncLazy`] computes it in the background
//! - **Concurrent consumers**: a post-build lint runner whose checks run in
//!   parallel and report through a single-owner [`Console`]
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_optional::{line_info, Optional, NULLOPT};
//!
//! let mut toolset: Optional<String> = NULLOPT.into();
//! assert!(!toolset.has_value());
//!
//! toolset.emplace("v143");
//! assert_eq!(toolset, "v143");
//!
//! // Fallback when absent, fail fast when absence is a bug
//! let cmake: Optional<String> = Optional::empty();
//! assert_eq!(cmake.value_or("cmake"), "cmake");
//! assert_eq!(toolset.value_or_exit(line_info!()), "v143");
//! ```
//!
//! ### Chaining Lookups
//!
//! ```rust
//! use sovran_optional::Optional;
//! use std::collections::HashMap;
//!
//! let mut versions = HashMap::new();
//! versions.insert("zlib", "1.3.1");
//!
//! let lookup = |port: &str| -> Optional<String> {
//!     versions.get(port).map(|v| v.to_string()).into()
//! };
//!
//! let major = lookup("zlib")
//!     .then(|version| Optional::from(version.split('.').next().map(str::to_string)))
//!     .into_map(|major: String| major.parse::<u32>().unwrap_or(0));
//! assert_eq!(major, 1u32);
//!
//! // An empty link short-circuits everything after it
//! let missing = lookup("openssl").map(|version| version.len());
//! assert!(!missing.has_value());
//! ```
//!
//! ### Aliasing Instead of Copying
//!
//! ```rust
//! use sovran_optional::{Optional, OptionalMut};
//!
//! let mut manifest = String::from("name = \"fmt\"");
//! {
//!     let mut alias = OptionalMut::new(&mut manifest);
//!     alias.value_mut().push_str("\nversion = \"10.2.1\"");
//! }
//! assert!(manifest.ends_with("10.2.1\""));
//! ```
//!
//! ### Running Post-Build Checks
//!
//! ```rust
//! use sovran_optional::{BuildPolicies, Console, LintError, PackageLayout, PostBuildLint};
//!
//! fn main() -> Result<(), LintError> {
//!     let layout = PackageLayout::with_include_dir(["fmt.h", "config.h"]);
//!     let lint = PostBuildLint::new(BuildPolicies::new(), layout);
//!
//!     let console = Console::spawn(Vec::new(), false);
//!     let problems = lint.perform_all_checks(&console.handle());
//!     let report = String::from_utf8_lossy(&console.finish()?).into_owned();
//!
//!     assert_eq!(problems, 1);
//!     assert!(report.contains("include/config.h"));
//!     Ok(())
//! }
//! ```

mod checks;
mod compare;
mod config;
mod console;
mod error;
mod lazy;
mod lint;
mod line_info;
mod lite;
mod null;
mod optional;
mod reference;
mod storage;

pub use checks::{check_exit, exit_with_message, ABSENT_VALUE_MESSAGE, EXIT_FAILURE};
pub use config::{ColorMode, LintConfig};
pub use console::{Color, Console, ConsoleHandle, Message};
pub use error::LintError;
pub use lazy::{AsyncLazy, Lazy};
pub use line_info::LineInfo;
pub use lint::{
    restricted_header, BuildPolicies, BuildPolicy, IncludeDirectoryCheck, LintCheck,
    LintContext, LintStatus, PackageLayout, PostBuildLint, RestrictedHeader,
    RestrictedHeadersCheck,
};
pub use lite::{make_lite_optional, LiteOptional};
pub use null::{NullOpt, NULLOPT};
pub use optional::{make_optional, Optional};
pub use reference::{OptionalMut, OptionalRef};
