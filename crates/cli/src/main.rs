//! Marketplace CLI - Inspect and check out carts.
//!
//! # Usage
//!
//! ```bash
//! # Print cart totals
//! mkt summary --cart cart.json
//!
//! # Print cart totals as JSON
//! mkt summary --cart cart.json --json
//!
//! # Check out a services-only cart
//! mkt checkout --cart bookings.json
//!
//! # Check out a cart with products, saving delivery information first
//! mkt checkout --cart cart.json -n "Jean Dupont" -a "1 Rue X" -p 0600000000 --mode express
//! ```
//!
//! # Commands
//!
//! - `summary` - Print line items, counts and the total
//! - `checkout` - Run checkout gating and report the outcome

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_core::DeliveryMode;

mod commands;
mod config;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "mkt")]
#[command(author, version, about = "Marketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print cart totals
    Summary {
        /// Path to a JSON array of cart items
        #[arg(short, long)]
        cart: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check out a cart
    Checkout {
        /// Path to a JSON array of cart items
        #[arg(short, long)]
        cart: String,

        /// Recipient name
        #[arg(short, long)]
        name: Option<String>,

        /// Delivery address
        #[arg(short, long)]
        address: Option<String>,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Delivery mode (`standard`, `express`)
        #[arg(short, long, default_value = "standard")]
        mode: DeliveryMode,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &CliConfig) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_cli=info,marketplace_cart=info".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing(&config);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Summary { cart, json } => {
            commands::summary::run(&cart, config.currency, json).await?;
        }
        Commands::Checkout {
            cart,
            name,
            address,
            phone,
            mode,
        } => {
            let delivery = commands::checkout::DeliveryArgs {
                name,
                address,
                phone,
                mode,
            };
            commands::checkout::run(&cart, delivery, config.currency).await?;
        }
    }
    Ok(())
}
