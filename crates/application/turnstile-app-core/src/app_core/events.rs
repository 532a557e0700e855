use std::collections::BTreeMap;

use turnstile_core::{Event, Ticket};

use crate::domain::{PurchaseOutcome, Route};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Login flow
    LoginStarted,
    LoginSucceeded { token: String },
    LoginFailed { message: String },

    // Registration flow
    RegisterStarted,
    RegisterSucceeded,
    RegisterFailed {
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    // Session
    LoggedOut,

    // Navigation
    RouteChanged(Route),

    // Event catalog
    EventsRefreshStarted,
    EventsLoaded(Vec<Event>),

    // Purchases
    PurchaseStarted,
    PurchaseFinished(PurchaseOutcome),

    // Owned tickets
    TicketsLoadStarted,
    TicketsLoaded(Vec<Ticket>),

    // Entry QR
    QrRequested,
    QrReady { qr_jwt: String },
    QrLocationDenied { message: String },
    QrFailed { message: String },
}
