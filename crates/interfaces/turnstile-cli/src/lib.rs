pub mod commands;

use anyhow::{Context, Result};
use turnstile_api::{default_http_client, Session, TicketServiceClient};

/// Build a service client for one CLI invocation. The session is process
/// local, so commands that need auth take the token up front.
pub fn build_client(base_url: &str, token: Option<String>) -> Result<TicketServiceClient> {
    let session = Session::new();
    if let Some(token) = token {
        session.set_token(token);
    }
    let http = default_http_client().context("Failed to build HTTP client")?;
    let client =
        TicketServiceClient::new(http, base_url, session).context("Invalid service URL")?;
    Ok(client)
}
