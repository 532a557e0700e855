use anyhow::{Context, Result};
use turnstile_api::{
    ApiError, BuyTicketResponse, RegisterRequest, TicketBackend, TicketServiceClient,
};
use turnstile_core::datetime::format_event_datetime;
use turnstile_core::qr::{encode_entry_token, QrMatrix, QR_IMAGE_SIZE};
use turnstile_core::{Event, Ticket};

pub async fn cmd_login(
    client: &TicketServiceClient,
    username: &str,
    password: &str,
) -> Result<String> {
    println!(":: Logging in as {username}...");
    let token = client.login(username, password).await?;
    println!("   Token: {token}");
    println!("   Export it as TURNSTILE_TOKEN for the other commands.");
    Ok(token)
}

pub async fn cmd_register(
    client: &TicketServiceClient,
    request: RegisterRequest,
) -> Result<String> {
    println!(":: Registering {}...", request.username);
    match client.register(&request).await {
        Ok(token) => {
            println!("   Registered. Token: {token}");
            Ok(token)
        }
        Err(ApiError::Validation {
            message,
            field_errors,
        }) => {
            println!("   {message}");
            for (field, messages) in &field_errors {
                for msg in messages {
                    println!("   {field}: {msg}");
                }
            }
            anyhow::bail!("registration rejected: {message}")
        }
        Err(e) => Err(e).context("registration failed"),
    }
}

pub async fn cmd_events(client: &TicketServiceClient) -> Result<Vec<Event>> {
    println!(":: Fetching events...");
    let events = client.events().await?;

    if events.is_empty() {
        println!("   No events available.");
    }
    for e in &events {
        println!(
            "   {}  {}  [{}]",
            e.id,
            e.name,
            format_event_datetime(&e.start_datetime)
        );
        println!("      {} — {}", e.location_name, e.price_label());
    }

    Ok(events)
}

pub async fn cmd_buy(
    client: &TicketServiceClient,
    event_id: &str,
    seat: &str,
) -> Result<BuyTicketResponse> {
    println!(":: Buying seat {seat} for event {event_id}...");
    let receipt = client.buy_ticket(event_id, seat).await?;

    if receipt.success {
        match &receipt.ticket_id {
            Some(id) => println!("   Purchased. Ticket: {id}"),
            None => println!("   Purchased."),
        }
    } else {
        match &receipt.message {
            Some(msg) => println!("   Purchase failed: {msg}"),
            None => println!("   Purchase failed."),
        }
    }

    Ok(receipt)
}

pub async fn cmd_tickets(client: &TicketServiceClient) -> Result<Vec<Ticket>> {
    println!(":: Fetching your tickets...");
    let tickets = client.my_tickets().await?;

    if tickets.is_empty() {
        println!("   No tickets yet.");
    }
    for t in &tickets {
        println!(
            "   {}  {}  seat {}  [{}]",
            t.id,
            t.event.name,
            t.seat,
            format_event_datetime(&t.event.date)
        );
    }

    Ok(tickets)
}

/// Fetch the time-limited entry token and render it as a QR code. The
/// geofence rejection is reported with the server's own message.
pub async fn cmd_qr(client: &TicketServiceClient, ticket_id: &str) -> Result<QrMatrix> {
    println!(":: Generating entry code for ticket {ticket_id}...");
    let qr_jwt = match client.generate_entry_qr(ticket_id).await {
        Ok(token) => token,
        Err(ApiError::LocationDenied(message)) => {
            println!("   Denied: {message}");
            anyhow::bail!("entry code denied: {message}")
        }
        Err(e) => return Err(e).context("entry code request failed"),
    };

    let matrix = encode_entry_token(&qr_jwt)?;
    println!("{}", matrix.to_text());
    println!(
        "   {} modules/side, {}px per module at the {}px render target.",
        matrix.width(),
        matrix.module_pixel_size(),
        QR_IMAGE_SIZE
    );
    println!("   Valid for a short window; regenerate at the gate if it expires.");

    Ok(matrix)
}
