//! Process-terminating checks for programmer-error conditions.
//!
//! These never unwind and never return an error value. They are reserved for
//! broken preconditions such as extracting from an empty container with
//! [`Optional::value_or_exit`](crate::Optional::value_or_exit).

use crate::LineInfo;

/// Diagnostic emitted when a fail-fast extraction finds no value.
pub const ABSENT_VALUE_MESSAGE: &str = "value was absent";

/// Exit status used by every fail-fast termination.
pub const EXIT_FAILURE: i32 = 1;

/// Prints `message` attributed to `line_info` and terminates the process.
pub fn exit_with_message(line_info: LineInfo, message: &str) -> ! {
    tracing::error!(location = %line_info, "{}", message);
    eprintln!("{}: error: {}", line_info, message);
    std::process::exit(EXIT_FAILURE)
}

/// Terminates the process unless `condition` holds.
pub fn check_exit(line_info: LineInfo, condition: bool, message: &str) {
    if !condition {
        exit_with_message(line_info, message);
    }
}
