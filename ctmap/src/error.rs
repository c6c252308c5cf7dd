//! Errors reported by [crate::CtMap]

use std::fmt;

/// Names the argument of a map operation that failed its size check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    /// The `key` argument of `add`, `set`, `contains`, `lookup` or `delete`
    Key,
    /// The `old_key` argument of `replace` or `rename`
    OldKey,
    /// The `new_key` argument of `replace` or `rename`
    NewKey,
    /// A value argument, or the output buffer passed to `lookup`
    Val,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Argument::Key => "key",
            Argument::OldKey => "old_key",
            Argument::NewKey => "new_key",
            Argument::Val => "val",
        })
    }
}

/// The error returned by map operations
///
/// Only argument lengths are ever checked; lengths are public, so the check is allowed to
/// branch. It always happens before the map is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A key or value does not have the size the map was created with
    #[error("{arg} has invalid size, required {expected} but found {actual}")]
    InvalidSize {
        /// Which argument was rejected
        arg: Argument,
        /// The configured size
        expected: usize,
        /// The size that was passed in
        actual: usize,
    },
}

impl Error {
    /// Helper function to check an argument size
    pub(crate) fn check_size(arg: Argument, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            Err(Self::InvalidSize {
                arg,
                expected,
                actual,
            })
        } else {
            Ok(())
        }
    }
}

/// Result type used throughout this crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_argument_and_sizes() {
        let err = Error::check_size(Argument::NewKey, 16, 15).unwrap_err();
        assert_eq!(
            err.to_string(),
            "new_key has invalid size, required 16 but found 15"
        );
    }

    #[test]
    fn matching_size_passes() {
        assert!(Error::check_size(Argument::Val, 0, 0).is_ok());
    }
}
