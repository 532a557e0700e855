use turnstile_api::RegisterRequest;
use turnstile_core::{EventId, TicketId};

use crate::domain::Route;

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Session lifecycle
    Login { username: String, password: String },
    Register(RegisterRequest),
    Logout,

    // Navigation
    Navigate(Route),

    // Catalog
    RefreshEvents,
    BuyTicket { event_id: EventId, seat: String },

    // Owned tickets
    LoadMyTickets,
    GenerateEntryQr(TicketId),
}
