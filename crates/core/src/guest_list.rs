//! Rows of the printable guest list and the name collation used to sort it.

use serde::{Deserialize, Serialize};

use crate::models::Confirmation;
use crate::summary::GuestSummary;

/// Order of the exported list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOrder {
    /// Newest first, as fetched.
    #[default]
    Original,
    /// By primary name, case and accent insensitive.
    Alphabetical,
}

impl ExportOrder {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Original => "Ordem de confirmação",
            Self::Alphabetical => "Ordem alfabética",
        }
    }
}

/// One attending party on the printed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestListRow {
    pub name: String,
    pub companions: Vec<String>,
    pub number_of_people: u32,
    pub people_6_plus: u32,
    pub under_6: u32,
}

impl From<&Confirmation> for GuestListRow {
    fn from(row: &Confirmation) -> Self {
        Self {
            name: row.name.clone(),
            companions: row
                .companion_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            number_of_people: row.number_of_people,
            people_6_plus: row.people_six_plus(),
            under_6: row.people_under_six(),
        }
    }
}

/// The printable guest list: attending parties plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestList {
    pub order: ExportOrder,
    pub rows: Vec<GuestListRow>,
    pub summary: GuestSummary,
}

impl GuestList {
    /// Build the list from confirmations in fetch order (newest first).
    #[must_use]
    pub fn build(confirmations: &[Confirmation], order: ExportOrder) -> Self {
        let attending: Vec<&Confirmation> =
            confirmations.iter().filter(|c| c.will_attend).collect();
        let summary = GuestSummary::from_confirmations(attending.iter().copied());

        let mut rows: Vec<GuestListRow> = attending.into_iter().map(GuestListRow::from).collect();
        if order == ExportOrder::Alphabetical {
            rows.sort_by_cached_key(|r| (collation_key(&r.name), r.name.clone()));
        }

        Self {
            order,
            rows,
            summary,
        }
    }
}

/// Sort key for names: trimmed, lowercased, Latin diacritics removed.
#[must_use]
pub fn collation_key(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
