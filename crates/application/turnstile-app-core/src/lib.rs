pub mod app_core;
pub mod domain;
pub mod kernel;
pub mod viewmodel;

mod async_runtime;

pub use app_core::{AppCommand, AppStore, DomainEvent};
pub use domain::{
    AppState, AuthState, PurchaseOutcome, QrState, RegisterState, Route,
};
pub use kernel::AppKernel;
pub use viewmodel::{
    event_list_vm, login_vm, qr_panel_vm, register_vm, ticket_list_vm, EventListVm,
    EventSummaryVm, LoginVm, QrPanelVm, RegisterVm, TicketListVm, TicketSummaryVm,
};
