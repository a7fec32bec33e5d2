//! Shopfront CLI - Terminal front end for the product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront products --page 2 --limit 10
//! shopfront products --query phone
//! shopfront products --category beauty
//! shopfront categories
//! shopfront product 1
//!
//! # Local accounts
//! shopfront signup --first-name Jane --last-name Doe --email jane@example.com \
//!     --mobile 0123456789 --password hunter22 --confirm-password hunter22
//! shopfront login --email jane@example.com --password hunter22
//! shopfront whoami
//! shopfront profile --mobile 9876543210
//! shopfront password --current hunter22 --new correct-horse --confirm correct-horse
//! shopfront logout
//!
//! # Navigate by path
//! shopfront open /product/1
//! ```
//!
//! Configuration comes from the environment; see
//! [`shopfront_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_core::ProductId;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::error::AppError;
use shopfront_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::CommandError;
use commands::account::{LoginArgs, PasswordArgs, ProfileArgs, SignupArgs};
use commands::catalog::ListingArgs;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Browse the product catalog and manage a local account")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally searching or filtering by category
    Products(ListingArgs),
    /// List product categories
    Categories,
    /// Show one product in full
    Product {
        /// Product id
        id: ProductId,
    },
    /// Create an account and log in
    Signup(SignupArgs),
    /// Log in
    Login(LoginArgs),
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update the logged-in user's profile
    Profile(ProfileArgs),
    /// Change the logged-in user's password
    Password(PasswordArgs),
    /// Open the view for a path such as `/product/1` or `/profile`
    Open {
        /// Path to open
        path: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
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

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => {
            tracing::debug!(?config, "Configuration loaded");
            let state = AppState::new(config);
            let mut out = std::io::stdout().lock();
            run(cli, &state, &mut out).await
        }
        Err(e) => Err(CommandError::App(AppError::from(e))),
    };

    if let Err(e) = result {
        e.report();
        let _ = writeln!(std::io::stderr(), "Error: {}", e.user_message());
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    match cli.command {
        Commands::Products(args) => commands::catalog::products(state, &args, out).await,
        Commands::Categories => commands::catalog::categories(state, out).await,
        Commands::Product { id } => commands::catalog::product(state, id, out).await,
        Commands::Signup(args) => commands::account::signup(state, args, out),
        Commands::Login(args) => commands::account::login(state, args, out),
        Commands::Logout => commands::account::logout(state, out),
        Commands::Whoami => commands::account::whoami(state, out),
        Commands::Profile(args) => commands::account::profile(state, args, out),
        Commands::Password(args) => commands::account::password(state, args, out),
        Commands::Open { path } => commands::open::open(state, &path, out).await,
    }
}
