//! StudentNest CLI - browse, sell and chat on the campus marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and sign in
//! campus signup -n "Jane Doe" -e jane@kgkite.ac.in -p abcdef -c abcdef
//!
//! # Browse
//! campus home --category books
//! campus product 4
//! campus favorite 4
//! campus favorites --sort price-low
//!
//! # Sell
//! campus sell -t "Desk Lamp" -d "Adjustable brightness" -p 28 \
//!     --category Electronics --condition "Like New" -l "South Apartments" -i lamp.jpg
//!
//! # Admin dashboard
//! campus signin -e ops@kgisl.ac.in -p secret1 -r admin
//! campus admin stats
//! ```
//!
//! # Commands
//!
//! - `signin`, `signup`, `signout`, `whoami`, `bio` - Account
//! - `open` - Resolve a path through the route guard
//! - `home`, `product`, `seller`, `favorite`, `favorites`, `notifications`, `profile` - Browse
//! - `sell` - Submit a listing
//! - `chat` - Message a seller about a product
//! - `admin stats|listings|delete` - Admin dashboard
//!
//! State is kept in `CAMPUS_DATA_DIR` (default `.campus-market`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_market::backend::MockBackend;
use campus_market::services::browse::{CategoryFilter, SortOrder};
use campus_market::storage::FileStore;
use campus_market::{MarketConfig, Marketplace};
use campus_market_core::{ProductId, Role, UserId};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "campus")]
#[command(author, version, about = "StudentNest campus marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to an account
    Signin {
        /// Campus email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Account type (`student` or `admin`)
        #[arg(short, long, default_value = "student")]
        role: Role,
    },
    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Campus email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm: String,

        /// Account type (`student` or `admin`)
        #[arg(short, long, default_value = "student")]
        role: Role,
    },
    /// Sign out
    Signout,
    /// Show the signed-in user
    Whoami,
    /// Resolve a path through the route guard
    Open {
        /// Path such as `/home` or `/product/4`
        path: String,
    },
    /// Trending and recent listings
    Home {
        /// Category name, or `All`
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
    },
    /// Show a product
    Product { id: ProductId },
    /// Toggle a product in or out of favorites
    Favorite { id: ProductId },
    /// List favorites
    Favorites {
        /// `recent`, `price-low`, `price-high`, `name-asc` or `name-desc`
        #[arg(short, long, default_value = "recent")]
        sort: SortOrder,
    },
    /// Submit a listing
    Sell {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long, default_value = "")]
        price: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        condition: String,

        #[arg(short, long, default_value = "")]
        location: String,

        /// Image path or URL, repeatable (cover first)
        #[arg(short, long = "image")]
        images: Vec<String>,
    },
    /// Show your profile and listings
    Profile,
    /// Update your bio
    Bio { text: String },
    /// Chat with a seller about a product
    Chat {
        seller: UserId,
        product: ProductId,
        /// Message to send; omit to show the transcript
        message: Option<String>,
    },
    /// Show a seller profile
    Seller { id: UserId },
    /// Show notifications
    Notifications,
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Listing counts and recent activity
    Stats,
    /// List submitted listings
    Listings,
    /// Delete a submitted listing
    Delete { id: ProductId },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_market=info,campus_market_cli=info".into());

    // JSON logs when CAMPUS_LOG_JSON is set, text otherwise
    let json = std::env::var("CAMPUS_LOG_JSON").is_ok();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{}", e.user_message());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = MarketConfig::from_env()?;
    let store = FileStore::open(config.data_dir.clone())?;
    let backend = MockBackend::new(config.backend.clone());
    let mut market = Marketplace::open(config, Arc::new(store), backend);

    match cli.command {
        Commands::Signin {
            email,
            password,
            role,
        } => commands::account::sign_in(&mut market, email, SecretString::from(password), role)?,
        Commands::Signup {
            name,
            email,
            password,
            confirm,
            role,
        } => commands::account::sign_up(
            &mut market,
            name,
            email,
            SecretString::from(password),
            SecretString::from(confirm),
            role,
        )?,
        Commands::Signout => commands::account::sign_out(&mut market),
        Commands::Whoami => commands::account::whoami(&market),
        Commands::Bio { text } => commands::account::bio(&mut market, &text)?,
        Commands::Open { path } => commands::browse::open(&market, &path),
        Commands::Home { category } => commands::browse::home(&market, category).await?,
        Commands::Product { id } => commands::browse::product(&market, id).await?,
        Commands::Favorite { id } => commands::browse::favorite(&mut market, id).await?,
        Commands::Favorites { sort } => commands::browse::favorites(&market, sort)?,
        Commands::Profile => commands::browse::profile(&market)?,
        Commands::Seller { id } => commands::browse::seller(&market, id).await?,
        Commands::Notifications => commands::browse::notifications(&market).await?,
        Commands::Sell {
            title,
            description,
            price,
            category,
            condition,
            location,
            images,
        } => commands::sell::submit(
            &mut market,
            campus_market::models::ListingForm {
                title,
                description,
                price,
                category,
                condition,
                location,
                images,
            },
        )?,
        Commands::Chat {
            seller,
            product,
            message,
        } => commands::chat::chat(&market, seller, product, message.as_deref()).await?,
        Commands::Admin { action } => match action {
            AdminAction::Stats => commands::admin::stats(&mut market).await?,
            AdminAction::Listings => commands::admin::listings(&mut market)?,
            AdminAction::Delete { id } => commands::admin::delete(&mut market, id)?,
        },
    }
    Ok(())
}
