//! Attendance aggregates shown on the dashboard.

use serde::Serialize;

use crate::models::Confirmation;

/// Head counts derived from a set of confirmations. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuestSummary {
    /// Attending people aged six or more.
    pub people_6_plus: u32,
    /// Attending people under six.
    pub under_6: u32,
    /// `people_6_plus + under_6`.
    pub total_people: u32,
    /// Parties that will attend.
    pub confirmed_parties: u32,
    /// Parties that will not attend.
    pub declined_parties: u32,
}

impl GuestSummary {
    /// Aggregate over every confirmation; only attending parties count toward
    /// the head counts.
    #[must_use]
    pub fn from_confirmations<'a>(rows: impl IntoIterator<Item = &'a Confirmation>) -> Self {
        let mut summary = Self::default();
        for row in rows {
            if row.will_attend {
                summary.confirmed_parties += 1;
                summary.people_6_plus += row.people_six_plus();
                summary.under_6 += row.people_under_six();
            } else {
                summary.declined_parties += 1;
            }
        }
        summary.total_people = summary.people_6_plus + summary.under_6;
        summary
    }

    /// Seats left under `max_guests`, counting only people aged six or more.
    #[must_use]
    pub const fn remaining(&self, max_guests: u32) -> u32 {
        max_guests.saturating_sub(self.people_6_plus)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(will_attend: bool, people: Option<u32>, over_6: Option<u32>) -> Confirmation {
        serde_json::from_value(json!({
            "id": "x",
            "name": "Guest",
            "will_attend": will_attend,
            "number_of_people": people,
            "people_over_6": over_6,
            "created_at": "2025-10-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            GuestSummary::from_confirmations(std::iter::empty::<&Confirmation>()),
            GuestSummary::default()
        );
    }

    #[test]
    fn test_aggregates() {
        let rows = vec![
            row(true, Some(3), Some(1)),
            row(true, Some(2), None),
            row(true, None, None),
            row(false, Some(4), Some(4)),
            row(true, Some(1), Some(3)),
        ];
        let summary = GuestSummary::from_confirmations(&rows);

        // 1 + 1 (legacy) + 1 (legacy) + 3
        assert_eq!(summary.people_6_plus, 6);
        // 2 + 1 + 0 + 0 (saturated)
        assert_eq!(summary.under_6, 3);
        assert_eq!(summary.total_people, 9);
        assert_eq!(summary.confirmed_parties, 4);
        assert_eq!(summary.declined_parties, 1);
    }

    #[test]
    fn test_total_is_sum_of_bands() {
        let rows: Vec<_> = (1..=10)
            .map(|n| row(n % 3 != 0, Some(n), Some(n / 2)))
            .collect();
        let s = GuestSummary::from_confirmations(&rows);
        assert_eq!(s.total_people, s.people_6_plus + s.under_6);
        assert_eq!(s.confirmed_parties + s.declined_parties, 10);
    }

    #[test]
    fn test_remaining() {
        let summary = GuestSummary {
            people_6_plus: 120,
            ..GuestSummary::default()
        };
        assert_eq!(summary.remaining(100), 0);
        assert_eq!(summary.remaining(150), 30);
    }
}
