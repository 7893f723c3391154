pub mod config;
pub mod goal;
pub mod session;
pub mod theme;

use std::num::NonZeroUsize;

use focusboard_core::CoreError;

/// Convert a 1-based position typed by the user to the core's index.
pub(crate) fn to_index(number: NonZeroUsize) -> usize {
    number.get() - 1
}

/// Rewrite core errors in the user's 1-based numbering.
pub(crate) fn describe(err: CoreError) -> String {
    match err {
        CoreError::IndexOutOfRange { index, len } => {
            format!("no goal #{} (there are {len})", index + 1)
        }
        other => other.to_string(),
    }
}
