//! Rows of the three backend tables and the payloads written to them.
//!
//! # Tables
//!
//! - `confirmations` - one row per RSVP party
//! - `admin_settings` - guest cap and registration switch (one logical row)
//! - `gifts` - gift suggestions managed from the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{ConfirmationId, GiftId, SettingsId};

/// Guest cap shown when no settings row could be loaded.
pub const DEFAULT_MAX_GUESTS: u32 = 100;

// =============================================================================
// Confirmations
// =============================================================================

/// One RSVP party as stored in `confirmations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: ConfirmationId,
    pub name: String,
    pub will_attend: bool,
    /// Party size. Rows written by the baseline insert may carry null.
    #[serde(default = "one", deserialize_with = "null_as_one")]
    pub number_of_people: u32,
    #[serde(default)]
    pub additional_names: Option<String>,
    /// Missing on legacy rows, where the primary guest alone is assumed.
    #[serde(default)]
    pub people_over_6: Option<u32>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_children_over_6: bool,
    pub created_at: DateTime<Utc>,
}

impl Confirmation {
    /// People aged six or more, defaulting to the primary guest on legacy rows.
    #[must_use]
    pub fn people_six_plus(&self) -> u32 {
        self.people_over_6.unwrap_or(1)
    }

    /// People under six, never negative even on inconsistent rows.
    #[must_use]
    pub fn people_under_six(&self) -> u32 {
        self.number_of_people.saturating_sub(self.people_six_plus())
    }

    /// Non-empty companion names from `additional_names`.
    #[must_use]
    pub fn companion_names(&self) -> Vec<&str> {
        self.additional_names
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// Full insert payload for `confirmations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewConfirmation {
    pub name: String,
    pub will_attend: bool,
    pub number_of_people: u32,
    pub additional_names: String,
    pub people_over_6: u32,
    pub has_children_over_6: bool,
}

/// Baseline insert payload, accepted by every schema revision of `confirmations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineConfirmation {
    pub name: String,
    pub will_attend: bool,
}

impl From<&NewConfirmation> for BaselineConfirmation {
    fn from(full: &NewConfirmation) -> Self {
        Self {
            name: full.name.clone(),
            will_attend: full.will_attend,
        }
    }
}

// =============================================================================
// Admin settings
// =============================================================================

/// Global switches stored in `admin_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    pub id: SettingsId,
    pub max_guests: u32,
    pub registration_enabled: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update of the settings row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Gifts
// =============================================================================

/// A gift row as managed from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub id: GiftId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "yes", deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The public projection of a gift (`select=name,description`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&str> for GiftSuggestion {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: None,
        }
    }
}

/// Insert payload for `gifts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGift {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Partial update of a gift row.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GiftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Serde helpers
// =============================================================================

const fn one() -> u32 {
    1
}

const fn yes() -> bool {
    true
}

fn null_as_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1))
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_full_row() {
        let row: Confirmation = serde_json::from_value(json!({
            "id": "c1",
            "name": "Maria",
            "will_attend": true,
            "number_of_people": 3,
            "additional_names": "Ana, Bia",
            "people_over_6": 1,
            "has_children_over_6": true,
            "created_at": "2025-10-01T12:00:00.123456+00:00"
        }))
        .unwrap();

        assert_eq!(row.number_of_people, 3);
        assert_eq!(row.people_six_plus(), 1);
        assert_eq!(row.people_under_six(), 2);
        assert_eq!(row.companion_names(), vec!["Ana", "Bia"]);
    }

    #[test]
    fn test_confirmation_legacy_row_defaults() {
        // Written by the baseline insert: only name and attendance.
        let row: Confirmation = serde_json::from_value(json!({
            "id": 7,
            "name": "João",
            "will_attend": true,
            "number_of_people": null,
            "additional_names": null,
            "people_over_6": null,
            "has_children_over_6": null,
            "created_at": "2025-10-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.id.as_str(), "7");
        assert_eq!(row.number_of_people, 1);
        assert_eq!(row.people_six_plus(), 1);
        assert_eq!(row.people_under_six(), 0);
        assert!(!row.has_children_over_6);
        assert!(row.companion_names().is_empty());
    }

    #[test]
    fn test_confirmation_missing_columns() {
        let row: Confirmation = serde_json::from_value(json!({
            "id": "c2",
            "name": "Pedro",
            "will_attend": false,
            "created_at": "2025-10-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(row.number_of_people, 1);
        assert_eq!(row.people_over_6, None);
    }

    #[test]
    fn test_under_six_never_negative() {
        let row: Confirmation = serde_json::from_value(json!({
            "id": "c3",
            "name": "Inconsistent",
            "will_attend": true,
            "number_of_people": 2,
            "people_over_6": 5,
            "created_at": "2025-10-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(row.people_under_six(), 0);
    }

    #[test]
    fn test_settings_patch_skips_unset_fields() {
        let patch = SettingsPatch {
            registration_enabled: Some(false),
            ..SettingsPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "registration_enabled": false })
        );
    }

    #[test]
    fn test_gift_patch_can_clear_description() {
        let patch = GiftPatch {
            name: Some("Livros".to_string()),
            description: Some(None),
            ..GiftPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "name": "Livros", "description": null })
        );
    }

    #[test]
    fn test_baseline_from_full() {
        let full = NewConfirmation {
            name: "Maria".to_string(),
            will_attend: true,
            number_of_people: 2,
            additional_names: "Ana".to_string(),
            people_over_6: 2,
            has_children_over_6: true,
        };
        let baseline = BaselineConfirmation::from(&full);
        assert_eq!(
            serde_json::to_value(&baseline).unwrap(),
            json!({ "name": "Maria", "will_attend": true })
        );
    }
}
