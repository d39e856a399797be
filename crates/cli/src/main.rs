//! Metro Bites CLI - drive a file-backed cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two idlis and look at the cart
//! mb-cli add --id idli --name Idli --price 20
//! mb-cli update idli 1
//! mb-cli show
//!
//! # Add a dish from the configured menu
//! mb-cli add-menu menu_masala_dosa
//!
//! # Print the UPI payment link, then place the order
//! mb-cli pay
//! mb-cli checkout
//! ```
//!
//! # Commands
//!
//! - `show`, `total` - Inspect the cart
//! - `add`, `add-menu`, `remove`, `update`, `clear` - Change the cart
//! - `menu` - List the configured menu
//! - `checkout`, `history` - Place orders and list past ones
//! - `pay` - Print the UPI payment URI for the current total

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(author, version, about = "Metro Bites cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// Show the cart total and item count
    Total,
    /// Add one unit of an item
    Add {
        /// Item id (derived from the name if omitted)
        #[arg(short, long)]
        id: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price in rupees
        #[arg(short, long)]
        price: Decimal,

        /// Image asset reference
        #[arg(long)]
        image: Option<String>,
    },
    /// Add one unit of a dish from the menu
    AddMenu {
        /// Menu item id
        id: String,
    },
    /// List the menu
    Menu,
    /// Remove an item entirely
    Remove {
        /// Item id
        id: String,
    },
    /// Change an item's quantity by a signed amount
    Update {
        /// Item id
        id: String,

        /// Quantity change, e.g. 2 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Empty the cart without ordering
    Clear,
    /// Place an order for the cart
    Checkout,
    /// List past orders
    History,
    /// Print the UPI payment URI for the cart total
    Pay,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "metro_bites_cart=info,mb_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = commands::open_cart(config)?;

    match cli.command {
        Commands::Show => commands::cart::show(&cart),
        Commands::Total => commands::cart::total(&cart),
        Commands::Add {
            id,
            name,
            price,
            image,
        } => commands::cart::add(&mut cart, id, &name, price, image)?,
        Commands::AddMenu { id } => commands::cart::add_from_menu(&mut cart, config, &id)?,
        Commands::Menu => commands::cart::list_menu(config)?,
        Commands::Remove { id } => commands::cart::remove(&mut cart, &id)?,
        Commands::Update { id, delta } => commands::cart::update(&mut cart, &id, delta)?,
        Commands::Clear => commands::cart::clear(&mut cart)?,
        Commands::Checkout => commands::orders::checkout(&mut cart)?,
        Commands::History => commands::orders::history(&cart),
        Commands::Pay => commands::orders::pay(&cart, config)?,
    }
    Ok(())
}
