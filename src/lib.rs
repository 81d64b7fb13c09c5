//! A skipset stores unique keys, always sorted, in such a way that they can be
//! looked up in `O(log(n))` on average.
//!
//! Conceptually, a skipset resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each row is a level: an ordered linked list of its own. The bottom
//! level holds every key, and every node on a higher level links down to the
//! node with the same key on the level below, allowing a lookup to start on
//! the sparse top level and effectively skip ahead.
//!
//! How many levels a key appears on is decided at insertion time by a
//! [`Promotion`] source, which is asked once per level whether the key should
//! go one level higher. The default is a fair [`Coin`]; any `FnMut() -> bool`
//! works too, which makes the layout reproducible.
//!
//! The number of levels is fixed when the [`SkipSet`] is created. A depth
//! around `log2(n)` for the expected number of keys `n` gives the best lookups.
//!
//! ```
//! use skipset::SkipSet;
//!
//! let mut set = SkipSet::new(3);
//! set.extend([10, 5, 20, 15]);
//! assert!(set.contains(&5));
//! assert!(!set.contains(&7));
//!
//! set.remove(&10);
//! assert!(!set.contains(&10));
//! ```
//!
//! The set is meant for use from a single thread at a time. Sharing one across
//! threads requires wrapping it in a lock such as [`std::sync::Mutex`].

mod level;
pub mod promotion;
mod skipset;

pub use promotion::{Coin, CoinError, Promotion};
pub use skipset::SkipSet;
