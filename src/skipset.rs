//! A fixed-depth skipset.

use std::{borrow::Borrow, cmp, fmt, iter};

use log::{debug, trace};

use crate::{
    level::{Level, Search},
    promotion::{Coin, Promotion},
};

/// Depth used by [`SkipSet::default`].
const DEFAULT_DEPTH: usize = 16;

// ////////////////////////////////////////////////////////////////////////////
// SkipSet
// ////////////////////////////////////////////////////////////////////////////

/// A set of unique, always sorted keys, stored in a skiplist of fixed depth.
///
/// The set is made of `depth` levels, each an ascending linked list. Level 0
/// holds every key and decides membership; each level above holds a random
/// subset of the keys of the level below it, each such node linked to its
/// counterpart below. Lookups start on the sparsest level and use those links
/// to skip most of the denser levels, so membership tests take `O(log(n))`
/// on average provided the depth is around `log2(n)`.
///
/// Whether a newly inserted key is carried one level higher is decided by a
/// [`Promotion`] source, by default a fair [`Coin`].
///
/// Unlike a classic skiplist, the number of levels never changes after
/// construction. Insertion and removal scan each level they touch from its
/// head.
pub struct SkipSet<T, P = Coin> {
    // levels[0] is the bottom, complete level.  Never empty.
    levels: Vec<Level<T>>,
    promotion: P,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipSet<T> {
    /// Create a new skipset with `depth` levels, promoting keys with a fair
    /// coin.
    ///
    /// A `depth` of 0 is raised to 1, which makes the set a plain sorted
    /// linked list.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<i64> = SkipSet::new(6);
    /// assert_eq!(set.depth(), 6);
    /// ```
    #[inline]
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self::with_promotion(depth, Coin::fair())
    }
}

impl<T, P> SkipSet<T, P>
where
    P: Promotion,
{
    /// Create a new skipset with `depth` levels, using `promotion` to decide
    /// how far up each new key is carried.
    ///
    /// A `depth` of 0 is raised to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Coin, SkipSet};
    ///
    /// // Reproducible tower heights.
    /// let coin = Coin::seeded(0x1234_abcd, 0.5).unwrap();
    /// let mut set = SkipSet::with_promotion(4, coin);
    /// set.extend([3, 1, 2]);
    ///
    /// // Towers as tall as the set allows.
    /// let mut set = SkipSet::with_promotion(4, || true);
    /// set.insert(1);
    /// ```
    #[inline]
    pub fn with_promotion(depth: usize, promotion: P) -> Self {
        if depth == 0 {
            debug!("Requested a skipset of depth 0, using a single level instead.");
        }
        let depth = cmp::max(1, depth);
        SkipSet {
            levels: iter::repeat_with(Level::new).take(depth).collect(),
            promotion,
        }
    }
}

impl<T, P> SkipSet<T, P> {
    /// The number of levels, fixed at construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<i64> = SkipSet::new(0);
    /// assert_eq!(set.depth(), 1);
    /// ```
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(4);
    /// set.extend([1, 2, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Level::len)
    }

    /// Returns `true` if the set holds no key.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(4);
    /// assert!(set.is_empty());
    ///
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every key, keeping the depth and the promotion source.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(4);
    /// set.extend(0..10);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.depth(), 4);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        for level in &mut self.levels {
            level.clear();
        }
    }
}

impl<T, P> SkipSet<T, P>
where
    T: Ord + Clone,
    P: Promotion,
{
    /// Adds `key` to the set.
    ///
    /// The key is linked into level 0 and then, for as long as the promotion
    /// source agrees and levels remain, into each level above.
    ///
    /// Returns `false`, leaving the set untouched, if the key was already
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(4);
    /// assert!(set.insert(10));
    /// assert!(!set.insert(10));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        if self.contains(&key) {
            return false;
        }

        let top = self.levels.len() - 1;
        let mut inserted = false;
        let mut down = None;
        for (height, level) in self.levels.iter_mut().enumerate() {
            let Some(node) = level.insert(key.clone(), down) else {
                trace!("Key already present on level {height}, stopping promotion.");
                break;
            };
            inserted |= height == 0;
            if height == top || !self.promotion.promote() {
                trace!("New key reaches level {height}.");
                break;
            }
            down = Some(node);
        }
        inserted
    }
}

impl<T, P> SkipSet<T, P>
where
    T: Ord,
{
    /// Returns `true` if the set contains `key`.
    ///
    /// The search starts on the top level and moves down, each level
    /// resuming from the closest smaller key found on the level above.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(3);
    /// set.extend([10, 5, 20, 15]);
    /// assert!(set.contains(&15));
    /// assert!(!set.contains(&7));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut hint = None;
        for level in self.levels.iter().rev() {
            match level.search(key, hint) {
                Search::Found => return true,
                Search::Missing { hint: below } => hint = below,
            }
        }
        false
    }

    /// Removes `key` from every level of the set.
    ///
    /// Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new(3);
    /// set.extend([10, 5, 20, 15]);
    /// assert!(set.remove(&10));
    /// assert!(!set.remove(&10));
    /// assert!(!set.contains(&10));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = false;
        for (height, level) in self.levels.iter_mut().enumerate() {
            if level.remove(key) {
                trace!("Removed key from level {height}.");
                removed |= height == 0;
            }
        }
        removed
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SkipSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl<T, P> Extend<T> for SkipSet<T, P>
where
    T: Ord + Clone,
    P: Promotion,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for key in iterable {
            self.insert(key);
        }
    }
}

/// Formats the keys in ascending order, like any other set.
impl<T, P> fmt::Debug for SkipSet<T, P>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut set = f.debug_set();
        if let Some(bottom) = self.levels.first() {
            set.entries(bottom.iter());
        }
        set.finish()
    }
}

/// Draws the levels of the set, top level first, with each key in its own
/// column:
///
/// ```text
/// <head> ----------> [10] ------------------->
/// <head> --> [5] --> [10] ------------------->
/// <head> --> [5] --> [10] --> [15] --> [20] ->
/// ```
impl<T, P> fmt::Display for SkipSet<T, P>
where
    T: fmt::Display + PartialEq,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some(bottom) = self.levels.first() else {
            return Ok(());
        };
        let columns: Vec<(&T, String)> = bottom
            .iter()
            .map(|key| (key, format!("--> [{key}] ")))
            .collect();

        for (row, level) in self.levels.iter().rev().enumerate() {
            if row != 0 {
                writeln!(f)?;
            }
            write!(f, "<head> ")?;
            let mut keys = level.iter().peekable();
            for (key, cell) in &columns {
                if keys.next_if(|k| k == key).is_some() {
                    f.write_str(cell)?;
                } else {
                    f.write_str(&"-".repeat(cell.chars().count()))?;
                }
            }
            write!(f, "->")?;
        }
        Ok(())
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl<T, P> SkipSet<T, P>
where
    T: Ord + fmt::Debug,
{
    /// Checks the integrity of every level and of every tower.
    fn check(&self) {
        assert!(!self.levels.is_empty(), "A skipset has at least one level.");
        for (height, level) in self.levels.iter().enumerate() {
            let links = level.links();
            assert_eq!(links.len(), level.len(), "Length of level {height}");
            for pair in links.windows(2) {
                assert!(
                    pair[0].0 < pair[1].0,
                    "Level {height} out of order: {:?} before {:?}",
                    pair[0].0,
                    pair[1].0
                );
            }

            match height.checked_sub(1).and_then(|h| self.levels.get(h)) {
                None => {
                    assert!(
                        links.iter().all(|(_, down)| down.is_none()),
                        "Level 0 nodes cannot link further down."
                    );
                }
                Some(below) => {
                    for (key, down) in links {
                        let down = down.unwrap_or_else(|| {
                            panic!("{key:?} on level {height} has no link down")
                        });
                        assert_eq!(
                            below.key_of(down),
                            Some(key),
                            "{key:?} on level {height} links to the wrong node"
                        );
                    }
                }
            }
        }
    }

    /// The keys of each level, bottom level first.
    fn level_keys(&self) -> Vec<Vec<&T>> {
        self.levels.iter().map(|level| level.iter().collect()).collect()
    }
}
