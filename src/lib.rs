//! An indexable skip list: a sorted set with O(log n) rank lookups.
//!
//! # Quick Start
//!
//! ```
//! use indexable_skiplist::SkipList;
//!
//! let mut list = SkipList::new();
//! for value in [5, 3, 8, 1] {
//!     list.insert(value);
//! }
//!
//! assert_eq!(list.get(0), Ok(&1));
//! assert_eq!(list.remove_at(1), Ok(3));
//! assert!(!list.insert(5));
//! assert_eq!(list.to_string(), "SkipList [1, 5, 8]");
//! ```
//!
//! Heights are random. For a reproducible layout inject any
//! `rand_core::RngCore`:
//!
//! ```
//! use indexable_skiplist::SkipList;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut list = SkipList::with_rng(StdRng::seed_from_u64(7));
//! list.extend(0..100);
//! assert_eq!(list.get(42), Ok(&42));
//! ```

pub mod error;
pub mod height;
mod lane;
pub mod list;
mod search;

pub use error::IndexError;
pub use height::HeightConfig;
pub use lane::LANES;
pub use list::SkipList;
