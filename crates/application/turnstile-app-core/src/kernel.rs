use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use turnstile_api::{ApiError, Session, TicketBackend};

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::{AuthState, PurchaseOutcome, RegisterState};

/// View-state kernel: applies the Started event synchronously, runs the
/// backend call on a named worker thread, and feeds the completion event
/// back through the channel drained by `tick()`.
pub struct AppKernel<B> {
    pub store: AppStore,
    backend: Arc<B>,
    session: Session,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<B: TicketBackend> AppKernel<B> {
    pub fn new(store: AppStore, backend: B, session: Session) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            store,
            backend: Arc::new(backend),
            session,
            tx,
            rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::Login { username, password } => {
                // At most one login in flight: re-entry while Loading is a no-op.
                if self.store.state().auth == AuthState::Loading {
                    return;
                }
                self.store.apply(DomainEvent::LoginStarted);

                let backend = self.backend.clone();
                let fallback = DomainEvent::LoginFailed {
                    message: "failed to start login worker".to_string(),
                };
                self.spawn_worker("turnstile-login", fallback, move |tx| async move {
                    let ev = match backend.login(&username, &password).await {
                        Ok(token) => DomainEvent::LoginSucceeded { token },
                        Err(e) => DomainEvent::LoginFailed {
                            message: login_error_message(&e),
                        },
                    };
                    let _ = tx.send(ev).await;
                });
            }

            AppCommand::Register(request) => {
                if self.store.state().register == RegisterState::Loading {
                    return;
                }
                self.store.apply(DomainEvent::RegisterStarted);

                let backend = self.backend.clone();
                let fallback = DomainEvent::RegisterFailed {
                    message: "failed to start register worker".to_string(),
                    field_errors: Default::default(),
                };
                self.spawn_worker("turnstile-register", fallback, move |tx| async move {
                    let ev = match backend.register(&request).await {
                        Ok(_token) => DomainEvent::RegisterSucceeded,
                        Err(e) => register_failed_event(e),
                    };
                    let _ = tx.send(ev).await;
                });
            }

            AppCommand::Logout => {
                self.session.clear();
                self.store.apply(DomainEvent::LoggedOut);
            }

            AppCommand::Navigate(route) => self.store.apply(DomainEvent::RouteChanged(route)),

            AppCommand::RefreshEvents => {
                self.store.apply(DomainEvent::EventsRefreshStarted);

                let backend = self.backend.clone();
                self.spawn_worker(
                    "turnstile-events",
                    DomainEvent::EventsLoaded(Vec::new()),
                    move |tx| async move {
                        // Fetch failures degrade to an empty list; the
                        // screen shows "no events" either way.
                        let events = match backend.events().await {
                            Ok(events) => events,
                            Err(e) => {
                                warn!("event refresh failed: {e}");
                                Vec::new()
                            }
                        };
                        let _ = tx.send(DomainEvent::EventsLoaded(events)).await;
                    },
                );
            }

            AppCommand::BuyTicket { event_id, seat } => {
                self.store.apply(DomainEvent::PurchaseStarted);

                let backend = self.backend.clone();
                let fallback = DomainEvent::PurchaseFinished(PurchaseOutcome {
                    event_id: event_id.clone(),
                    success: false,
                    message: None,
                    ticket_id: None,
                });
                self.spawn_worker("turnstile-buy", fallback, move |tx| async move {
                    // Purchase never propagates an error: any failure is a
                    // failed purchase.
                    let outcome = match backend.buy_ticket(&event_id, &seat).await {
                        Ok(receipt) => PurchaseOutcome {
                            event_id,
                            success: receipt.success,
                            message: receipt.message,
                            ticket_id: receipt.ticket_id,
                        },
                        Err(e) => {
                            warn!("ticket purchase failed: {e}");
                            PurchaseOutcome {
                                event_id,
                                success: false,
                                message: None,
                                ticket_id: None,
                            }
                        }
                    };
                    let _ = tx.send(DomainEvent::PurchaseFinished(outcome)).await;
                });
            }

            AppCommand::LoadMyTickets => {
                self.store.apply(DomainEvent::TicketsLoadStarted);

                let backend = self.backend.clone();
                self.spawn_worker(
                    "turnstile-tickets",
                    DomainEvent::TicketsLoaded(Vec::new()),
                    move |tx| async move {
                        let tickets = match backend.my_tickets().await {
                            Ok(tickets) => tickets,
                            Err(e) => {
                                warn!("ticket list fetch failed: {e}");
                                Vec::new()
                            }
                        };
                        let _ = tx.send(DomainEvent::TicketsLoaded(tickets)).await;
                    },
                );
            }

            AppCommand::GenerateEntryQr(ticket_id) => {
                self.store.apply(DomainEvent::QrRequested);

                let backend = self.backend.clone();
                let fallback = DomainEvent::QrFailed {
                    message: "failed to start QR worker".to_string(),
                };
                self.spawn_worker("turnstile-qr", fallback, move |tx| async move {
                    let ev = match backend.generate_entry_qr(&ticket_id).await {
                        Ok(qr_jwt) => DomainEvent::QrReady { qr_jwt },
                        Err(ApiError::LocationDenied(message)) => {
                            DomainEvent::QrLocationDenied { message }
                        }
                        Err(ApiError::Connection(detail)) => {
                            warn!("QR generation connection failure: {detail}");
                            DomainEvent::QrFailed {
                                message: "connection error".to_string(),
                            }
                        }
                        Err(e) => DomainEvent::QrFailed {
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(ev).await;
                });
            }
        }
    }

    /// Drain completed worker events into the store. Call from the UI tick.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.store.apply(ev);
        }
    }

    /// Spawn a named worker thread for one backend call. `fallback` is
    /// applied if the thread or its runtime cannot start, so no screen is
    /// left stuck in Loading.
    fn spawn_worker<F, Fut>(&self, name: &str, fallback: DomainEvent, work: F)
    where
        F: FnOnce(mpsc::Sender<DomainEvent>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let tx = self.tx.clone();
        let spawn_res = std::thread::Builder::new().name(name.to_string()).spawn({
            let fallback = fallback.clone();
            move || match crate::async_runtime::runtime() {
                Ok(rt) => rt.block_on(work(tx)),
                Err(e) => {
                    warn!("failed to start async runtime: {e}");
                    let _ = tx.blocking_send(fallback);
                }
            }
        });

        if let Err(e) = spawn_res {
            warn!("failed to spawn worker thread: {e}");
            self.store.apply(fallback);
        }
    }
}

fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Connection(detail) => format!("network error: {detail}"),
        ApiError::InvalidCredentials => "invalid credentials".to_string(),
        ApiError::Status(code) => format!("server error: {code}"),
        other => other.to_string(),
    }
}

fn register_failed_event(err: ApiError) -> DomainEvent {
    match err {
        ApiError::Validation {
            message,
            field_errors,
        } => DomainEvent::RegisterFailed {
            message,
            field_errors,
        },
        ApiError::Connection(detail) => DomainEvent::RegisterFailed {
            message: format!("network error: {detail}"),
            field_errors: Default::default(),
        },
        ApiError::Status(code) => DomainEvent::RegisterFailed {
            message: format!("server error: {code}"),
            field_errors: Default::default(),
        },
        other => DomainEvent::RegisterFailed {
            message: other.to_string(),
            field_errors: Default::default(),
        },
    }
}
