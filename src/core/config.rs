//! Session configuration.
//!
//! - `ChanceBounds`: the allowed range of the elimination denominator and
//!   its default
//! - `ChanceInput`: a raw denominator as it arrives from a form field,
//!   a stored snapshot, or code
//! - `SessionConfig`: combines the above with seating and seeding options
//!
//! Out-of-range or unparsable chances are never rejected; they are clamped
//! to the nearest bound or replaced by the default.

use serde::{Deserialize, Serialize};

/// Smallest elimination denominator accepted by default.
pub const MIN_CHANCES: u32 = 2;

/// Largest elimination denominator accepted by default.
pub const MAX_CHANCES: u32 = 10;

/// Denominator used when none is given or the input is unparsable.
pub const DEFAULT_CHANCES: u32 = 4;

/// Participants per row of the seating grid.
pub const SEATS_PER_ROW: usize = 6;

/// A raw elimination denominator before clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChanceInput<'a> {
    /// A number from code or a stored snapshot.
    Number(i64),
    /// Text as typed by a user.
    Text(&'a str),
    /// No value given.
    Missing,
}

impl From<i64> for ChanceInput<'_> {
    fn from(value: i64) -> Self {
        ChanceInput::Number(value)
    }
}

impl From<u32> for ChanceInput<'_> {
    fn from(value: u32) -> Self {
        ChanceInput::Number(i64::from(value))
    }
}

impl From<i32> for ChanceInput<'_> {
    fn from(value: i32) -> Self {
        ChanceInput::Number(i64::from(value))
    }
}

impl<'a> From<&'a str> for ChanceInput<'a> {
    fn from(value: &'a str) -> Self {
        ChanceInput::Text(value)
    }
}

impl From<Option<i64>> for ChanceInput<'_> {
    fn from(value: Option<i64>) -> Self {
        value.map_or(ChanceInput::Missing, ChanceInput::Number)
    }
}

/// Allowed range and default for the elimination denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceBounds {
    /// Inclusive lower bound (at least 1).
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
    /// Value used for missing or unparsable input.
    pub default: u32,
}

impl Default for ChanceBounds {
    fn default() -> Self {
        Self {
            min: MIN_CHANCES,
            max: MAX_CHANCES,
            default: DEFAULT_CHANCES,
        }
    }
}

impl ChanceBounds {
    /// Create bounds. `default` is pulled into `[min, max]`.
    ///
    /// Panics if `min` is zero or `min > max`.
    #[must_use]
    pub fn new(min: u32, max: u32, default: u32) -> Self {
        assert!(min >= 1, "Minimum chances must be at least 1");
        assert!(min <= max, "Minimum chances must not exceed maximum");

        Self {
            min,
            max,
            default: default.clamp(min, max),
        }
    }

    /// Clamp a raw value into range.
    ///
    /// Bounds that skipped `new` (public fields, deserialized configs) are
    /// normalised first: swapped if reversed, and never below 1.
    #[must_use]
    pub fn clamp(&self, value: i64) -> u32 {
        let low = self.min.min(self.max).max(1);
        let high = self.min.max(self.max).max(low);
        let clamped = value.clamp(i64::from(low), i64::from(high));
        // In range of u32 after the clamp above
        clamped as u32
    }

    /// Resolve any input into a usable denominator.
    ///
    /// ```
    /// use survivor::core::ChanceBounds;
    ///
    /// let bounds = ChanceBounds::default();
    /// assert_eq!(bounds.resolve("abc"), 4);
    /// assert_eq!(bounds.resolve(0), 2);
    /// assert_eq!(bounds.resolve(999), 10);
    /// assert_eq!(bounds.resolve(" 7 "), 7);
    /// ```
    #[must_use]
    pub fn resolve<'a>(&self, input: impl Into<ChanceInput<'a>>) -> u32 {
        match input.into() {
            ChanceInput::Number(value) => self.clamp(value),
            ChanceInput::Text(raw) => match raw.trim().parse::<i64>() {
                Ok(value) => self.clamp(value),
                Err(_) => self.clamp(i64::from(self.default)),
            },
            ChanceInput::Missing => self.clamp(i64::from(self.default)),
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Range and default for the elimination denominator.
    pub chances: ChanceBounds,

    /// Seats per row when laying out the roster view.
    pub seats_per_row: usize,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chances: ChanceBounds::default(),
            seats_per_row: SEATS_PER_ROW,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chance bounds.
    #[must_use]
    pub fn with_chances(mut self, chances: ChanceBounds) -> Self {
        self.chances = chances;
        self
    }

    /// Set seats per row (at least 1).
    #[must_use]
    pub fn with_seats_per_row(mut self, seats: usize) -> Self {
        self.seats_per_row = seats.max(1);
        self
    }

    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
