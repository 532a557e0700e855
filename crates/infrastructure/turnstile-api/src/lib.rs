pub mod client;
pub mod error;
pub mod session;
pub mod wire;

// Re-exports for convenience
pub use client::{default_http_client, TicketBackend, TicketServiceClient};
pub use error::ApiError;
pub use session::Session;
pub use wire::{BuyTicketResponse, RegisterRequest};
