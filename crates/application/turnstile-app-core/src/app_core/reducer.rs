use crate::domain::{AppState, AuthState, QrState, RegisterState, Route};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::LoginStarted => {
            state.auth = AuthState::Loading;
        }
        DomainEvent::LoginSucceeded { token } => {
            state.auth = AuthState::Success(token);
            state.route = Route::Events;
        }
        DomainEvent::LoginFailed { message } => {
            state.auth = AuthState::Error(message);
        }

        DomainEvent::RegisterStarted => {
            state.register = RegisterState::Loading;
        }
        DomainEvent::RegisterSucceeded => {
            state.register = RegisterState::Success;
        }
        DomainEvent::RegisterFailed {
            message,
            field_errors,
        } => {
            state.register = RegisterState::Error {
                message,
                field_errors,
            };
        }

        DomainEvent::LoggedOut => {
            state.auth = AuthState::Idle;
            state.register = RegisterState::Idle;
            state.route = Route::Login;
            state.events.clear();
            state.tickets.clear();
            state.last_purchase = None;
            state.qr = QrState::Idle;
        }

        DomainEvent::RouteChanged(r) => state.route = r,

        DomainEvent::EventsRefreshStarted => {
            state.events_loading = true;
        }
        DomainEvent::EventsLoaded(events) => {
            state.events = events;
            state.events_loading = false;
        }

        DomainEvent::PurchaseStarted => {
            state.purchase_pending = true;
            state.last_purchase = None;
        }
        DomainEvent::PurchaseFinished(outcome) => {
            state.purchase_pending = false;
            state.last_purchase = Some(outcome);
        }

        DomainEvent::TicketsLoadStarted => {
            state.tickets_loading = true;
        }
        DomainEvent::TicketsLoaded(tickets) => {
            state.tickets = tickets;
            state.tickets_loading = false;
        }

        DomainEvent::QrRequested => {
            state.qr = QrState::Loading;
        }
        DomainEvent::QrReady { qr_jwt } => {
            state.qr = QrState::Ready(qr_jwt);
        }
        DomainEvent::QrLocationDenied { message } => {
            state.qr = QrState::LocationDenied(message);
        }
        DomainEvent::QrFailed { message } => {
            state.qr = QrState::Failed(message);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PurchaseOutcome;

    #[test]
    fn login_transitions_idle_loading_success() {
        let state = AppState::default();
        assert_eq!(state.auth, AuthState::Idle);

        let state = reduce(state, DomainEvent::LoginStarted);
        assert_eq!(state.auth, AuthState::Loading);

        let state = reduce(
            state,
            DomainEvent::LoginSucceeded {
                token: "jwt".into(),
            },
        );
        assert_eq!(state.auth, AuthState::Success("jwt".into()));
        assert_eq!(state.route, Route::Events);
    }

    #[test]
    fn logout_resets_everything_session_scoped() {
        let mut state = AppState::default();
        state.auth = AuthState::Success("jwt".into());
        state.register = RegisterState::Success;
        state.qr = QrState::Ready("qr-jwt".into());
        state.last_purchase = Some(PurchaseOutcome {
            event_id: "ev".into(),
            success: true,
            message: None,
            ticket_id: None,
        });

        let state = reduce(state, DomainEvent::LoggedOut);
        assert_eq!(state.auth, AuthState::Idle);
        assert_eq!(state.register, RegisterState::Idle);
        assert_eq!(state.route, Route::Login);
        assert_eq!(state.qr, QrState::Idle);
        assert!(state.last_purchase.is_none());
        assert!(state.events.is_empty());
        assert!(state.tickets.is_empty());
    }

    #[test]
    fn events_loaded_replaces_list_and_clears_flag() {
        let state = reduce(AppState::default(), DomainEvent::EventsRefreshStarted);
        assert!(state.events_loading);

        let state = reduce(state, DomainEvent::EventsLoaded(Vec::new()));
        assert!(!state.events_loading);
        assert!(state.events.is_empty());
    }

    #[test]
    fn register_failure_keeps_field_errors() {
        let mut field_errors = std::collections::BTreeMap::new();
        field_errors.insert("email".to_string(), vec!["already taken".to_string()]);

        let state = reduce(
            AppState::default(),
            DomainEvent::RegisterFailed {
                message: "validation failed".into(),
                field_errors,
            },
        );
        match state.register {
            RegisterState::Error { field_errors, .. } => {
                assert_eq!(field_errors["email"], vec!["already taken".to_string()]);
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
