//! Coarse age classification used for capacity and catering counts.

use serde::{Deserialize, Serialize};

/// Age band of a party member.
///
/// Exact ages are never stored; the venue only needs to know how many
/// guests are six or older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Six years old or more. Counts against the guest cap.
    #[default]
    SixOrOver,
    /// Younger than six.
    UnderSix,
}

impl AgeBand {
    /// Build a band from the form's "under 6" checkbox.
    #[must_use]
    pub const fn from_under_six(under_six: bool) -> Self {
        if under_six {
            Self::UnderSix
        } else {
            Self::SixOrOver
        }
    }

    /// Whether this band counts as six or older.
    #[must_use]
    pub const fn is_six_or_over(self) -> bool {
        matches!(self, Self::SixOrOver)
    }
}
