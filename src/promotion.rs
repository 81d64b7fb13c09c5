//! Skiplists spread their keys over the internal levels probabilistically:
//! level 0 holds every key, and each level $n > 0$ holds a random subset of
//! the keys on level $n - 1$.
//!
//! In this crate a key's tower is grown one level at a time. After the key has
//! been linked into level $n$, a [`Promotion`] source is asked whether it
//! should also be linked into level $n + 1$. With a fixed probability $p$ per
//! step this yields the usual geometric distribution of tower heights,
//! truncated at the depth of the set.
//!
//! The default source is the [`Coin`], though any `FnMut() -> bool` can be
//! used instead. This is mostly useful to make tower heights reproducible.

pub mod coin;

pub use coin::{Coin, CoinError};

// ////////////////////////////////////////////////////////////////////////////
// Promotion
// ////////////////////////////////////////////////////////////////////////////

/// Decides, one level at a time, how tall the tower of a newly inserted key
/// grows.
pub trait Promotion {
    /// Returns `true` if the key just linked into some level should also be
    /// linked into the level above it.
    ///
    /// This is consulted once per level, so the chance of a key reaching
    /// level $n$ is the product of the individual outcomes up to $n$.
    #[must_use]
    fn promote(&mut self) -> bool;
}

impl<F> Promotion for F
where
    F: FnMut() -> bool,
{
    #[inline]
    fn promote(&mut self) -> bool {
        self()
    }
}
