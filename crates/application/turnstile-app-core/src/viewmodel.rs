use turnstile_core::datetime::format_event_datetime;
use turnstile_core::qr::{encode_entry_token, QrMatrix};
use turnstile_core::{Event, EventId, Ticket, TicketId};

use crate::domain::{AppState, AuthState, QrState, RegisterState};

#[derive(Debug, Clone)]
pub struct LoginVm {
    pub is_busy: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

pub fn login_vm(state: &AppState) -> LoginVm {
    LoginVm {
        is_busy: state.auth == AuthState::Loading,
        error: match &state.auth {
            AuthState::Error(msg) => Some(msg.clone()),
            _ => None,
        },
        is_authenticated: matches!(state.auth, AuthState::Success(_)),
    }
}

#[derive(Debug, Clone)]
pub struct RegisterVm {
    pub is_busy: bool,
    pub succeeded: bool,
    pub message: Option<String>,
}

impl RegisterVm {
    /// Messages to annotate one form field with, empty when clean.
    pub fn field_errors<'a>(state: &'a AppState, field: &str) -> &'a [String] {
        if let RegisterState::Error { field_errors, .. } = &state.register {
            if let Some(msgs) = field_errors.get(field) {
                return msgs;
            }
        }
        &[]
    }
}

pub fn register_vm(state: &AppState) -> RegisterVm {
    RegisterVm {
        is_busy: state.register == RegisterState::Loading,
        succeeded: state.register == RegisterState::Success,
        message: match &state.register {
            RegisterState::Error { message, .. } => Some(message.clone()),
            _ => None,
        },
    }
}

#[derive(Debug, Clone)]
pub struct EventSummaryVm {
    pub id: EventId,
    pub name: String,
    pub category: String,
    pub when: String,
    pub location: String,
    pub price: String,
}

impl From<&Event> for EventSummaryVm {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            category: e.category.clone(),
            when: format_event_datetime(&e.start_datetime),
            location: e.location_name.clone(),
            price: e.price_label(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventListVm {
    pub events: Vec<EventSummaryVm>,
    pub is_loading: bool,
}

pub fn event_list_vm(state: &AppState) -> EventListVm {
    EventListVm {
        events: state.events.iter().map(EventSummaryVm::from).collect(),
        is_loading: state.events_loading,
    }
}

#[derive(Debug, Clone)]
pub struct TicketSummaryVm {
    pub id: TicketId,
    pub seat: String,
    pub event_name: String,
    pub when: String,
    pub location: String,
}

impl From<&Ticket> for TicketSummaryVm {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id.clone(),
            seat: t.seat.clone(),
            event_name: t.event.name.clone(),
            when: format_event_datetime(&t.event.date),
            location: t.event.location_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TicketListVm {
    pub tickets: Vec<TicketSummaryVm>,
    pub is_loading: bool,
}

pub fn ticket_list_vm(state: &AppState) -> TicketListVm {
    TicketListVm {
        tickets: state.tickets.iter().map(TicketSummaryVm::from).collect(),
        is_loading: state.tickets_loading,
    }
}

/// QR panel on the ticket detail screen.
#[derive(Debug, Clone)]
pub struct QrPanelVm {
    pub status_line: String,
    pub matrix: Option<QrMatrix>,
    pub can_retry: bool,
}

pub fn qr_panel_vm(state: &AppState) -> QrPanelVm {
    match &state.qr {
        QrState::Idle => QrPanelVm {
            status_line: "No entry code requested yet".into(),
            matrix: None,
            can_retry: true,
        },
        QrState::Loading => QrPanelVm {
            status_line: "Generating entry code…".into(),
            matrix: None,
            can_retry: false,
        },
        QrState::Ready(qr_jwt) => match encode_entry_token(qr_jwt) {
            Ok(matrix) => QrPanelVm {
                status_line: "Scan at the gate".into(),
                matrix: Some(matrix),
                can_retry: true,
            },
            Err(e) => QrPanelVm {
                status_line: e.to_string(),
                matrix: None,
                can_retry: true,
            },
        },
        QrState::LocationDenied(message) => QrPanelVm {
            status_line: message.clone(),
            matrix: None,
            can_retry: true,
        },
        QrState::Failed(message) => QrPanelVm {
            status_line: message.clone(),
            matrix: None,
            can_retry: true,
        },
    }
}
