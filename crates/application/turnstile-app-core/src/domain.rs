use std::collections::BTreeMap;

use turnstile_core::{Event, EventId, Ticket, TicketId};

/// Login flow state, one request at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// Registration flow state. Errors may carry per-field validation
/// messages so the form can annotate individual inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterState {
    Idle,
    Loading,
    Success,
    Error {
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },
}

/// Entry-QR generation state for the ticket detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrState {
    Idle,
    Loading,
    Ready(String),
    /// The server's geofence rejected the request.
    LocationDenied(String),
    Failed(String),
}

/// Outcome of the most recent purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub event_id: EventId,
    pub success: bool,
    pub message: Option<String>,
    pub ticket_id: Option<TicketId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Events,
    MyTickets,
    TicketDetail(TicketId),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub route: Route,

    pub auth: AuthState,
    pub register: RegisterState,

    pub events: Vec<Event>,
    pub events_loading: bool,

    pub tickets: Vec<Ticket>,
    pub tickets_loading: bool,

    pub last_purchase: Option<PurchaseOutcome>,
    pub purchase_pending: bool,

    pub qr: QrState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Login,
            auth: AuthState::Idle,
            register: RegisterState::Idle,
            events: Vec::new(),
            events_loading: false,
            tickets: Vec::new(),
            tickets_loading: false,
            last_purchase: None,
            purchase_pending: false,
            qr: QrState::Idle,
        }
    }
}
