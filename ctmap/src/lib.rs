#![warn(missing_docs)]
//! A constant-time key/value map
//!
//! [CtMap] stores fixed-size keys and values and answers queries about them in time that does
//! not depend on the bytes of any key or value, stored or queried. It is meant for small
//! collections of secrets inside security sensitive code (session tokens, authentication
//! tags, key identifiers) where a regular hash map would leak through its timing or its memory
//! access pattern which key was hit.
//!
//! Every constant-time operation scans all entries, so lookups are O(n) on purpose. The
//! number of entries itself is not hidden.
//!
//! # Examples
//!
//! ```rust
//! use ctmap::CtMap;
//!
//! // 16 byte session ids mapping to 4 byte user ids
//! let mut sessions = CtMap::with_capacity(16, 4, 128);
//! sessions.add(&[7; 16], &[0, 0, 0, 42])?;
//!
//! let mut user = [0u8; 4];
//! let found = sessions.lookup(&[7; 16], &mut user)?;
//! assert!(bool::from(found));
//! assert_eq!(user, [0, 0, 0, 42]);
//!
//! let found = sessions.contains(&[8; 16])?;
//! assert!(!bool::from(found));
//! # Ok::<(), ctmap::Error>(())
//! ```
//!
//! Found flags are [subtle::Choice] values. They can be combined further with `&`, `|` and
//! `!` and only turn into a `bool` when the caller converts them.

mod arena;
mod primitives;

pub mod config;
pub mod error;
pub mod iter;
pub mod layout;
pub mod map;

pub use crate::config::MapConfig;
pub use crate::error::{Argument, Error, Result};
pub use crate::iter::Iter;
pub use crate::layout::Layout;
pub use crate::map::CtMap;

pub use subtle::Choice;
