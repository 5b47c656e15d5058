//! Party size type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PartySize`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PartySizeError {
    /// The input is not a number.
    #[error("party size must be a number")]
    NotANumber,
    /// The number is outside the accepted range.
    #[error("party size must be between {min} and {max} (got {got})")]
    OutOfRange {
        /// Smallest accepted size.
        min: u8,
        /// Largest accepted size.
        max: u8,
        /// The rejected value.
        got: i64,
    },
}

/// Number of people covered by one RSVP, primary guest included.
///
/// ## Constraints
///
/// - Range: 1-10 people
///
/// ## Examples
///
/// ```
/// use invite_core::PartySize;
///
/// assert_eq!(PartySize::parse("3").unwrap().get(), 3);
/// assert!(PartySize::parse("0").is_err());
/// assert!(PartySize::parse("11").is_err());
/// assert_eq!(PartySize::clamped(42).get(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PartySize(u8);

impl PartySize {
    /// Smallest party: the primary guest alone.
    pub const MIN: u8 = 1;
    /// Largest party the form offers.
    pub const MAX: u8 = 10;

    /// A party of one.
    pub const ONE: Self = Self(1);

    /// Validate a numeric party size.
    ///
    /// # Errors
    ///
    /// Returns [`PartySizeError::OutOfRange`] outside 1-10.
    pub fn new(value: i64) -> Result<Self, PartySizeError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(PartySizeError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got: value,
            })
    }

    /// Parse a party size from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an integer or is outside 1-10.
    pub fn parse(s: &str) -> Result<Self, PartySizeError> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| PartySizeError::NotANumber)?;
        Self::new(value)
    }

    /// Clamp any number into the accepted range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // In range after the clamp above.
        Self(u8::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// The size as a plain number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Number of companions besides the primary guest.
    #[must_use]
    pub const fn companions(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All selectable sizes, for the form's drop-down.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PartySize {
    type Error = PartySizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartySize> for u8 {
    fn from(size: PartySize) -> Self {
        size.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(PartySize::parse("1").unwrap(), PartySize::ONE);
        assert_eq!(PartySize::parse(" 10 ").unwrap().get(), 10);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(PartySize::parse("abc"), Err(PartySizeError::NotANumber));
        assert!(matches!(
            PartySize::parse("0"),
            Err(PartySizeError::OutOfRange { got: 0, .. })
        ));
        assert!(PartySize::parse("-3").is_err());
        assert!(PartySize::parse("300").is_err());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(PartySize::clamped(-5).get(), 1);
        assert_eq!(PartySize::clamped(4).get(), 4);
        assert_eq!(PartySize::clamped(99).get(), 10);
    }

    #[test]
    fn test_companions() {
        assert_eq!(PartySize::ONE.companions(), 0);
        assert_eq!(PartySize::new(3).unwrap().companions(), 2);
    }

    #[test]
    fn test_all_sizes() {
        let sizes: Vec<u8> = PartySize::all().map(PartySize::get).collect();
        assert_eq!(sizes, (1..=10).collect::<Vec<u8>>());
    }
}
