use serde::{Deserialize, Serialize};

pub mod datetime;
pub mod qr;

pub type EventId = String;
pub type TicketId = String;

/// An event as served by the remote catalog. Never mutated locally;
/// the whole list is replaced on refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub category: String,
    pub location_name: String,
    pub location_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_metro: String,
    pub price_min: i64,
    pub price_max: i64,
    pub currency: String,
    pub organizer: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub contact_website: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

/// A purchased ticket with its embedded event summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub seat: String,
    pub event: TicketEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketEvent {
    // The ticket endpoint uses camelCase for this one field.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub name: String,
    pub date: String,
    pub location_name: String,
}

impl Event {
    /// Price range label, e.g. "20-45 EUR" or "20 EUR" for a fixed price.
    pub fn price_label(&self) -> String {
        if self.price_min == self.price_max {
            format!("{} {}", self.price_min, self.currency)
        } else {
            format!("{}-{} {}", self.price_min, self.price_max, self.currency)
        }
    }
}
