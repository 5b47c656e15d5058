//! RSVP validation and the columns derived from a submitted party.
//!
//! The public form posts flat `application/x-www-form-urlencoded` pairs:
//!
//! - `name` - primary guest, required
//! - `will_attend` - `"true"` or `"false"`
//! - `number_of_people` - party size, 1-10
//! - `companion_name_<i>` / `companion_under_six_<i>` - one pair per
//!   additional person, `i` starting at 1
//!
//! [`RsvpForm`] keeps the raw values so the page can be re-rendered as the
//! visitor typed it; [`RsvpForm::validate`] turns it into an [`Rsvp`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{BaselineConfirmation, NewConfirmation};
use crate::types::{AgeBand, PartySize, PartySizeError};

/// Errors raised while validating a submitted RSVP.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RsvpError {
    /// The primary name is empty after trimming.
    #[error("primary guest name is required")]
    MissingName,
    /// The party size is not a number or outside 1-10.
    #[error(transparent)]
    PartySize(#[from] PartySizeError),
}

/// Whether the party is coming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
    #[default]
    Attending,
    NotAttending,
}

impl Attendance {
    /// Parse the radio value. Anything other than `"false"` means attending,
    /// matching the form's default selection.
    #[must_use]
    pub fn from_form_value(value: &str) -> Self {
        if value.trim() == "false" {
            Self::NotAttending
        } else {
            Self::Attending
        }
    }

    /// The radio value for this state.
    #[must_use]
    pub const fn as_form_value(self) -> &'static str {
        match self {
            Self::Attending => "true",
            Self::NotAttending => "false",
        }
    }

    #[must_use]
    pub const fn is_attending(self) -> bool {
        matches!(self, Self::Attending)
    }
}

/// One additional person in a party.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Companion {
    /// Name as typed; may be empty.
    pub name: String,
    pub age_band: AgeBand,
}

/// Raw RSVP form state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RsvpForm {
    pub name: String,
    pub attendance: Attendance,
    /// Party size exactly as posted.
    pub number_of_people: String,
    /// Companion slots in form order (slot 0 is `companion_*_1`).
    pub companions: Vec<Companion>,
}

impl RsvpForm {
    /// Build the form from posted key/value pairs.
    ///
    /// Unknown keys are ignored. Companion slots are padded so that a
    /// checkbox without a name (or the reverse) still lands in its slot.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self {
            number_of_people: "1".to_string(),
            ..Self::default()
        };
        let mut slots: BTreeMap<usize, Companion> = BTreeMap::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.into();
            match key {
                "name" => form.name = value,
                "will_attend" => form.attendance = Attendance::from_form_value(&value),
                "number_of_people" => form.number_of_people = value,
                _ => {
                    if let Some(index) = slot_index(key, "companion_name_") {
                        slots.entry(index).or_default().name = value;
                    } else if let Some(index) = slot_index(key, "companion_under_six_") {
                        let under_six = matches!(value.as_str(), "on" | "true" | "1");
                        slots.entry(index).or_default().age_band =
                            AgeBand::from_under_six(under_six);
                    }
                }
            }
        }

        if let Some(&last) = slots.keys().next_back() {
            form.companions = (1..=last)
                .map(|i| slots.remove(&i).unwrap_or_default())
                .collect();
        }
        form
    }

    /// Party size for rendering: the posted value clamped into 1-10.
    #[must_use]
    pub fn display_size(&self) -> PartySize {
        self.number_of_people
            .trim()
            .parse::<i64>()
            .map_or(PartySize::ONE, PartySize::clamped)
    }

    /// Companion slots sized for [`Self::display_size`], keeping typed values.
    #[must_use]
    pub fn companion_slots(&self) -> Vec<Companion> {
        self.companion_slots_for(self.display_size())
    }

    /// Validate the form.
    ///
    /// A party that is not attending is recorded as the primary guest alone,
    /// whatever size was selected.
    ///
    /// # Errors
    ///
    /// Returns [`RsvpError::MissingName`] when the primary name is blank, or
    /// [`RsvpError::PartySize`] when the size is invalid.
    pub fn validate(&self) -> Result<Rsvp, RsvpError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RsvpError::MissingName);
        }

        let party_size = PartySize::parse(&self.number_of_people)?;

        let (party_size, companions) = match self.attendance {
            Attendance::NotAttending => (PartySize::ONE, Vec::new()),
            Attendance::Attending => {
                let companions = self
                    .companion_slots_for(party_size)
                    .into_iter()
                    .map(|c| Companion {
                        name: c.name.trim().to_string(),
                        age_band: c.age_band,
                    })
                    .collect();
                (party_size, companions)
            }
        };

        Ok(Rsvp {
            name: name.to_string(),
            attendance: self.attendance,
            party_size,
            companions,
        })
    }

    fn companion_slots_for(&self, size: PartySize) -> Vec<Companion> {
        let wanted = size.companions();
        let mut slots: Vec<Companion> = self.companions.iter().take(wanted).cloned().collect();
        slots.resize_with(wanted, Companion::default);
        slots
    }
}

fn slot_index(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?
        .parse::<usize>()
        .ok()
        .filter(|i| (1..usize::from(PartySize::MAX)).contains(i))
}

/// A validated RSVP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    /// Trimmed primary name, never empty.
    pub name: String,
    pub attendance: Attendance,
    pub party_size: PartySize,
    /// Exactly `party_size - 1` entries, names trimmed.
    pub companions: Vec<Companion>,
}

impl Rsvp {
    /// Non-empty companion names joined with `", "`. The primary is excluded.
    #[must_use]
    pub fn additional_names(&self) -> String {
        self.companions
            .iter()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Primary name followed by the non-empty companion names.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(
                self.companions
                    .iter()
                    .map(|c| c.name.as_str())
                    .filter(|n| !n.is_empty()),
            )
            .collect()
    }

    /// Members aged six or more. The primary guest always counts.
    #[must_use]
    pub fn people_over_6(&self) -> u32 {
        let companions = self
            .companions
            .iter()
            .filter(|c| c.age_band.is_six_or_over())
            .count();
        u32::try_from(companions).unwrap_or(0) + 1
    }

    /// Whether any member is six or older. Always true for a valid RSVP.
    #[must_use]
    pub fn has_children_over_6(&self) -> bool {
        self.people_over_6() > 0
    }

    /// Whether any companion is under six.
    #[must_use]
    pub fn has_under_six(&self) -> bool {
        self.companions
            .iter()
            .any(|c| c.age_band == AgeBand::UnderSix)
    }

    /// The full row written to `confirmations`.
    #[must_use]
    pub fn to_new_confirmation(&self) -> NewConfirmation {
        NewConfirmation {
            name: self.name.clone(),
            will_attend: self.attendance.is_attending(),
            number_of_people: u32::from(self.party_size.get()),
            additional_names: self.additional_names(),
            people_over_6: self.people_over_6(),
            has_children_over_6: self.has_children_over_6(),
        }
    }

    /// The two-column row used when the full insert is rejected.
    #[must_use]
    pub fn baseline(&self) -> BaselineConfirmation {
        BaselineConfirmation {
            name: self.name.clone(),
            will_attend: self.attendance.is_attending(),
        }
    }
}
