#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
//! constant-time implementations of the primitives ctmap is built from
//!
//! Two operations are provided: an equality test that always reads both inputs in full, and a
//! conditional copy (plus its special case, conditional zeroing) that always writes the full
//! destination. Both use [subtle::Choice] as their flag type so that results can be combined
//! with `&`, `|` and `!` without ever becoming a branch condition.
//!
//! # Examples
//!
//! ```rust
//! use ctmap_constant_time::{conditional_copy, memeq};
//!
//! let stored = [1, 2, 3, 4];
//! let query = [1, 2, 3, 4];
//! let mut out = [0u8; 4];
//!
//! let hit = memeq(&stored, &query);
//! conditional_copy(&mut out, &stored, hit);
//! assert_eq!(out, stored);
//! ```
//!
//! # Security Notes
//!
//! While these functions aim to be constant-time, they may leak timing information in some cases:
//!
//! - Length mismatches between inputs are immediately detectable
//! - Execution time scales linearly with input size

mod memcmp;
mod select;

pub use memcmp::memeq;
pub use select::{conditional_copy, conditional_zero};

pub use subtle::Choice;
