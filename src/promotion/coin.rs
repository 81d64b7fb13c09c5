//! Biased-coin promotion source.

use rand::prelude::*;
use thiserror::Error;

use crate::promotion::Promotion;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Coin`].
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum CoinError {
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A coin which lands on "promote" with probability `$p$`.
///
/// Flipping the coin once per level after every successful insertion yields a
/// geometric distribution of tower heights: a key reaches level `$n$` with
/// probability `$p^n$`, truncated at the depth of the set. The usual choice,
/// and the one made by [`Coin::fair`], is `$p = 1/2$`.
#[derive(Debug, Clone)]
pub struct Coin {
    /// The probability that a key is carried to the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Coin {
    /// Create a new coin landing on "promote" with probability `p`, seeded
    /// from the thread-local generator.
    ///
    /// # Errors
    ///
    /// `p` must lie strictly between 0 and 1.
    #[inline]
    pub fn new(p: f64) -> Result<Self, CoinError> {
        Self::with_rng(p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new coin with probability `p` whose sequence of outcomes is
    /// fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// `p` must lie strictly between 0 and 1.
    #[inline]
    pub fn seeded(seed: u64, p: f64) -> Result<Self, CoinError> {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }

    /// A fair coin, that is `$p = 1/2$`.
    #[inline]
    #[must_use]
    pub fn fair() -> Self {
        Coin {
            p: 0.5,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// The probability that a key is carried to the next level.
    #[inline]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.p
    }

    fn with_rng(p: f64, rng: SmallRng) -> Result<Self, CoinError> {
        if !(0.0 < p && p < 1.0) {
            return Err(CoinError::InvalidProbability);
        }
        Ok(Coin { p, rng })
    }
}

impl Default for Coin {
    #[inline]
    fn default() -> Self {
        Self::fair()
    }
}

impl Promotion for Coin {
    #[inline]
    fn promote(&mut self) -> bool {
        self.rng.random_bool(self.p)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Coin, CoinError};
    use crate::promotion::Promotion;

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.5)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn invalid_p(#[case] p: f64) {
        assert_eq!(Coin::new(p).err(), Some(CoinError::InvalidProbability));
        assert_eq!(
            Coin::seeded(0, p).err(),
            Some(CoinError::InvalidProbability)
        );
    }

    #[test]
    fn error_message() {
        assert_eq!(
            CoinError::InvalidProbability.to_string(),
            "p must be in (0, 1)."
        );
    }

    #[test]
    fn fair() {
        assert_eq!(Coin::fair().probability(), 0.5);
        assert_eq!(Coin::default().probability(), 0.5);
    }

    #[test]
    fn seeded_is_reproducible() -> Result<()> {
        let mut a = Coin::seeded(0x1234_abcd, 0.5)?;
        let mut b = Coin::seeded(0x1234_abcd, 0.5)?;
        let flips_a: Vec<bool> = (0..256).map(|_| a.promote()).collect();
        let flips_b: Vec<bool> = (0..256).map(|_| b.promote()).collect();
        assert_eq!(flips_a, flips_b);
        Ok(())
    }

    #[rstest]
    fn frequency(#[values(0.1, 0.25, 0.5, 0.9)] p: f64) -> Result<()> {
        let mut coin = Coin::seeded(42, p)?;
        let n = 100_000;
        let heads = (0..n).filter(|_| coin.promote()).count();
        #[expect(clippy::cast_precision_loss, reason = "n is small")]
        let observed = heads as f64 / f64::from(n);
        assert!(
            (observed - p).abs() < 0.02,
            "observed {observed} for p = {p}"
        );
        Ok(())
    }

    #[rstest]
    fn both_outcomes(#[values(0.01, 0.5, 0.99)] p: f64) -> Result<()> {
        let mut coin = Coin::new(p)?;
        let flips: Vec<bool> = (0..100_000).map(|_| coin.promote()).collect();
        assert!(flips.contains(&true));
        assert!(flips.contains(&false));
        Ok(())
    }
}
