//! Event details, the RSVP message and the outbound deep links.
//!
//! All links are built by string templating with percent-encoded queries.
//! Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::rsvp::{Attendance, Rsvp};

/// Where the party happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: "Karol Buffet".to_string(),
            address: "Rua Noruega 155, Maraponga, Fortaleza - CE".to_string(),
        }
    }
}

impl Venue {
    /// Free-text search query: venue name followed by the address.
    #[must_use]
    pub fn search_query(&self) -> String {
        format!("{} {}", self.name, self.address)
    }

    /// Google Maps search link.
    #[must_use]
    pub fn google_maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&self.search_query())
        )
    }

    /// Waze navigation link.
    #[must_use]
    pub fn waze_url(&self) -> String {
        format!(
            "https://waze.com/ul?q={}",
            urlencoding::encode(&self.search_query())
        )
    }
}

/// Everything the invitation says about the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Who receives the WhatsApp message.
    pub host_name: String,
    /// Whose birthday it is.
    pub honoree: String,
    /// Line shown above the honoree's name.
    pub tagline: String,
    pub weekday: String,
    pub date: String,
    pub time: String,
    /// WhatsApp number in international format, digits only.
    pub whatsapp_number: String,
    pub venue: Venue,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            host_name: "Jesa".to_string(),
            honoree: "Henry".to_string(),
            tagline: "E o nosso pequeno está fazendo seu 1º aninho".to_string(),
            weekday: "Sexta".to_string(),
            date: "31.10".to_string(),
            time: "19:00".to_string(),
            whatsapp_number: "351931926460".to_string(),
            venue: Venue::default(),
        }
    }
}

impl EventDetails {
    /// Defaults overridden by any `EVENT_*` variable `lookup` returns.
    ///
    /// Recognised variables: `EVENT_HOST_NAME`, `EVENT_HONOREE`,
    /// `EVENT_TAGLINE`, `EVENT_WEEKDAY`, `EVENT_DATE`, `EVENT_TIME`,
    /// `EVENT_WHATSAPP_NUMBER`, `EVENT_VENUE_NAME`, `EVENT_VENUE_ADDRESS`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut event = Self::default();
        let fields: [(&str, &mut String); 9] = [
            ("EVENT_HOST_NAME", &mut event.host_name),
            ("EVENT_HONOREE", &mut event.honoree),
            ("EVENT_TAGLINE", &mut event.tagline),
            ("EVENT_WEEKDAY", &mut event.weekday),
            ("EVENT_DATE", &mut event.date),
            ("EVENT_TIME", &mut event.time),
            ("EVENT_WHATSAPP_NUMBER", &mut event.whatsapp_number),
            ("EVENT_VENUE_NAME", &mut event.venue.name),
            ("EVENT_VENUE_ADDRESS", &mut event.venue.address),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
        event
            .whatsapp_number
            .retain(|c| c.is_ascii_digit());
        event
    }

    /// The pre-filled message sent to the host after an RSVP.
    #[must_use]
    pub fn rsvp_message(&self, rsvp: &Rsvp) -> String {
        match rsvp.attendance {
            Attendance::Attending => {
                let people = if rsvp.party_size.get() == 1 {
                    "eu".to_string()
                } else {
                    format!("nós ({})", rsvp.all_names().join(", "))
                };
                let children = if rsvp.has_under_six() {
                    " - Temos crianças pequenas"
                } else {
                    ""
                };
                format!(
                    "Olá {}! Meu nome é {} e estou confirmando que {people} estaremos na festa do {}! 🎉{children}",
                    self.host_name, rsvp.name, self.honoree
                )
            }
            Attendance::NotAttending => format!(
                "Olá {}! Meu nome é {} e infelizmente não poderei comparecer na festa do {}. 😔",
                self.host_name, rsvp.name, self.honoree
            ),
        }
    }

    /// `wa.me` deep link carrying `message`.
    #[must_use]
    pub fn whatsapp_link(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.whatsapp_number,
            urlencoding::encode(message)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rsvp::RsvpForm;

    fn rsvp(pairs: &[(&str, &str)]) -> Rsvp {
        RsvpForm::from_pairs(pairs.iter().map(|&(k, v)| (k, v.to_string())))
            .validate()
            .unwrap()
    }

    #[test]
    fn test_message_single_guest() {
        let event = EventDetails::default();
        let msg = event.rsvp_message(&rsvp(&[("name", "Maria"), ("number_of_people", "1")]));
        assert_eq!(
            msg,
            "Olá Jesa! Meu nome é Maria e estou confirmando que eu estaremos na festa do Henry! 🎉"
        );
    }

    #[test]
    fn test_message_party_with_young_children() {
        let event = EventDetails::default();
        let msg = event.rsvp_message(&rsvp(&[
            ("name", "Maria"),
            ("number_of_people", "3"),
            ("companion_name_1", "Ana"),
            ("companion_under_six_1", "on"),
            ("companion_name_2", "Caio"),
        ]));
        assert_eq!(
            msg,
            "Olá Jesa! Meu nome é Maria e estou confirmando que nós (Maria, Ana, Caio) estaremos na festa do Henry! 🎉 - Temos crianças pequenas"
        );
    }

    #[test]
    fn test_message_not_attending() {
        let event = EventDetails::default();
        let msg = event.rsvp_message(&rsvp(&[("name", "Pedro"), ("will_attend", "false")]));
        assert_eq!(
            msg,
            "Olá Jesa! Meu nome é Pedro e infelizmente não poderei comparecer na festa do Henry. 😔"
        );
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let event = EventDetails::default();
        let link = event.whatsapp_link("Olá Jesa! 1 & 2");
        assert_eq!(
            link,
            "https://wa.me/351931926460?text=Ol%C3%A1%20Jesa%21%201%20%26%202"
        );
    }

    #[test]
    fn test_event_overrides() {
        let event = EventDetails::from_lookup(|name| match name {
            "EVENT_HONOREE" => Some("Lia".to_string()),
            "EVENT_WHATSAPP_NUMBER" => Some("+55 (85) 99999-0000".to_string()),
            "EVENT_TIME" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(event.honoree, "Lia");
        assert_eq!(event.whatsapp_number, "5585999990000");
        assert_eq!(event.time, "19:00");
        assert_eq!(event.host_name, "Jesa");
    }

    #[test]
    fn test_map_links() {
        let venue = Venue {
            name: "Salão".to_string(),
            address: "Rua A, 1".to_string(),
        };
        assert_eq!(
            venue.google_maps_url(),
            "https://www.google.com/maps/search/?api=1&query=Sal%C3%A3o%20Rua%20A%2C%201"
        );
        assert_eq!(
            venue.waze_url(),
            "https://waze.com/ul?q=Sal%C3%A3o%20Rua%20A%2C%201"
        );
    }
}
