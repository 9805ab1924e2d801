//! Choosing between the two options of a decision.
//!
//! The draw is a single uniform binary choice behind the [`Chooser`] trait, so
//! callers can swap the random source for a deterministic one.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Which of the two options a chooser picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The first option as entered.
    First,
    /// The second option as entered.
    Second,
}

impl Pick {
    /// Select the picked value from an ordered pair.
    #[must_use]
    pub fn select<'a, T>(self, first: &'a T, second: &'a T) -> &'a T {
        match self {
            Self::First => first,
            Self::Second => second,
        }
    }
}

/// A source of binary choices.
///
/// Every call is independent of the previous ones; implementations must not
/// favour either side unless they are explicitly fixed.
pub trait Chooser {
    /// Pick one of two options.
    fn pick(&mut self) -> Pick;
}

/// Unbiased chooser backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomChooser<R = ThreadRng> {
    rng: R,
}

impl RandomChooser<ThreadRng> {
    /// Create a chooser that draws from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomChooser<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomChooser<R> {
    /// Create a chooser that draws from the given generator.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn pick(&mut self) -> Pick {
        if self.rng.gen::<bool>() {
            Pick::First
        } else {
            Pick::Second
        }
    }
}

/// Chooser that always returns the same side.
///
/// Counts how often it was asked, which lets callers check that a rejected
/// submission never reached the draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedChooser {
    pick: Pick,
    calls: usize,
}

impl FixedChooser {
    /// Always pick `pick`.
    #[must_use]
    pub fn new(pick: Pick) -> Self {
        Self { pick, calls: 0 }
    }

    /// Always pick the first option.
    #[must_use]
    pub fn first() -> Self {
        Self::new(Pick::First)
    }

    /// Always pick the second option.
    #[must_use]
    pub fn second() -> Self {
        Self::new(Pick::Second)
    }

    /// Number of picks made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Chooser for FixedChooser {
    fn pick(&mut self) -> Pick {
        self.calls += 1;
        self.pick
    }
}
