use std::io::{self, BufRead, Write};
use std::time::Duration;

use booking_console::{Command, Outcome, PageKind, Shell, UreqTransport};
use booking_core::{BookingApi, BookingClient, ClientConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "booking-console")]
#[command(about = "Operator console for the booking API", long_about = None)]
struct Cli {
    /// Base URL of the booking API
    #[arg(long, env = "BOOKING_API_URL")]
    api_url: Option<String>,

    /// API key sent as `x-api-key`
    #[arg(long, env = "BOOKING_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Page shown at start-up
    #[arg(long, default_value_t = PageKind::default())]
    page: PageKind,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    // Before parsing, so `.env` values feed the `env` fallbacks.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.api_url, cli.api_key)?;
    tracing::info!(base_url = config.base_url(), "starting console");

    let transport = UreqTransport::new(Duration::from_secs(cli.timeout_secs));
    let api = BookingApi::new(BookingClient::new(config), transport);
    let mut shell = Shell::new(api, cli.page);
    shell.start();
    println!("{}", shell.render());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match shell.execute(command) {
            Outcome::Render => println!("{}", shell.render()),
            Outcome::Message(message) => println!("{message}"),
            Outcome::Quit => break,
        }
    }
    Ok(())
}
