use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use turnstile_api::RegisterRequest;
use turnstile_cli::{build_client, commands};

const DEFAULT_BASE_URL: &str = "https://trustticket.nest0r.dev/";

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Ticketing service base URL
    #[arg(long, global = true, env = "TURNSTILE_API", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Bearer token from a previous `login`
    #[arg(long, global = true, env = "TURNSTILE_TOKEN")]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the bearer token
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and print the bearer token
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List upcoming events
    Events,
    /// Buy a seat for an event
    Buy { event_id: String, seat: String },
    /// List your tickets
    Tickets,
    /// Render the time-limited entry QR code for a ticket
    Qr { ticket_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let client = build_client(&cli.base_url, cli.token)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::cmd_login(&client, &username, &password).await?;
        }
        Commands::Register {
            name,
            surname,
            username,
            phone,
            email,
            password,
        } => {
            commands::cmd_register(
                &client,
                RegisterRequest {
                    name,
                    surname,
                    username,
                    phone,
                    email,
                    password,
                },
            )
            .await?;
        }
        Commands::Events => {
            commands::cmd_events(&client).await?;
        }
        Commands::Buy { event_id, seat } => {
            let receipt = commands::cmd_buy(&client, &event_id, &seat).await?;
            if !receipt.success {
                std::process::exit(1);
            }
        }
        Commands::Tickets => {
            commands::cmd_tickets(&client).await?;
        }
        Commands::Qr { ticket_id } => {
            commands::cmd_qr(&client, &ticket_id).await?;
        }
    }

    Ok(())
}
