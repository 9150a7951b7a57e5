//! WhatsApp click-to-chat hand-off.
//!
//! Orders are delivered by sending the customer to
//! `https://wa.me/<number>?text=<message>`; WhatsApp opens a chat with the
//! store pre-filled with the message. Nothing is sent from the server and
//! delivery is never confirmed.

use kirana_core::OrderChannel;

const WA_ME_BASE: &str = "https://wa.me";

/// Characters a browser's `encodeURIComponent` leaves alone but
/// `urlencoding::encode` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Click-to-chat channel for one store number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppChannel {
    number: String,
}

impl WhatsAppChannel {
    /// `number` is the international number as digits only (e.g. `919876543210`).
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl OrderChannel for WhatsAppChannel {
    fn link_for(&self, message: &str) -> String {
        format!("{WA_ME_BASE}/{}?text={}", self.number, encode_component(message))
    }
}

/// Percent-encode a query component the way `encodeURIComponent` does.
fn encode_component(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escaped, mark) in UNRESERVED_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}
