//! An open addressing hash map with quadratic probing and tombstone deletion.
//!
//! [`ProbingMap`] keeps every entry in one power-of-two slot array and takes
//! its hash and equality functions from the caller. Removed entries become
//! tombstones, which keeps probe chains intact and makes it safe to remove
//! entries while walking the map with a [`Cursor`]. The table doubles and
//! rehashes before an insertion once half of its slots are in use.
//!
//! ```
//! use quadmap::ProbingMap;
//!
//! let mut map = ProbingMap::new(|k: &u64| *k, |a: &u64, b: &u64| a == b, 4);
//! map.put(1, 92);
//! map.put(5, 93);
//! map.put(9, 94);
//!
//! assert_eq!(map.remove(&5), Some(93));
//! assert_eq!(map.get(&9), Some(&94));
//! assert_eq!(map.count(), 2);
//! ```

mod cfg;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod hash;
pub mod iter;
pub mod map;
mod probe;
pub mod slot;

pub use cursor::Cursor;
pub use entry::Entry;
pub use error::{MapError, Result};
pub use hash::{EqFn, HashFn, fx_hash, key_eq};
pub use map::{DEFAULT_CAPACITY, FxProbingMap, ProbingMap};
pub use slot::Slot;
