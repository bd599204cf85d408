//! Shopfront CLI - browse, shop and check out from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! sf-cli catalog list --category Electronics
//!
//! # Sign in, fill the cart and check out
//! sf-cli login shopper@gmail.com
//! sf-cli cart add 1 -q 2
//! sf-cli checkout --name "Ada" --email ada@example.com --phone 555-0100 \
//!     --address "1 Loop Rd" --city Springfield --payment-method "Credit Card"
//!
//! # Order history
//! sf-cli orders list
//! sf-cli orders cancel <order-id>
//! ```
//!
//! State lives in `SHOPFRONT_DATA_DIR` (default `.shopfront`), one JSON file
//! per key, so each invocation picks up where the last one left off.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_storefront::ShopfrontConfig;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Sign in with an email address
    Login {
        /// Email address
        email: String,
    },
    /// Sign out and empty the cart
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,
        /// Contact email
        #[arg(long, default_value = "")]
        email: String,
        /// Contact phone
        #[arg(long, default_value = "")]
        phone: String,
        /// Shipping address
        #[arg(long, default_value = "")]
        address: String,
        /// Shipping city
        #[arg(long, default_value = "")]
        city: String,
        /// Payment method label (e.g. "Credit Card", "PayPal")
        #[arg(long, default_value = "")]
        payment_method: String,
    },
    /// View and manage your orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Store-wide views (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only products whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,
        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        id: String,
        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders
    List,
    /// Cancel a confirmed order
    Cancel {
        /// Order id
        id: String,
    },
    /// Request a return for a confirmed order
    Return {
        /// Order id
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every order in the store
    Orders,
    /// Revenue, order and customer counts
    Summary,
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cli=info,shopfront_storefront=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json);

    if let Err(e) = run(cli.command) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopfrontConfig::from_env()?;
    let mut ctx = Context::open(&config)?;

    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, search } => {
                commands::catalog::list(&ctx, category.as_deref(), search.as_deref());
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id)?,
            CatalogAction::Categories => commands::catalog::categories(&ctx),
        },
        Commands::Login { email } => commands::session::login(&ctx, &email)?,
        Commands::Logout => commands::session::logout(&mut ctx)?,
        Commands::Whoami => commands::session::whoami(&ctx)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id, quantity } => commands::cart::add(&mut ctx, &id, quantity)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut ctx, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id)?,
            CartAction::Clear => commands::cart::clear(&mut ctx)?,
        },
        Commands::Checkout {
            name,
            email,
            phone,
            address,
            city,
            payment_method,
        } => {
            let info = shopfront_storefront::models::CustomerInfo {
                name,
                email,
                phone,
                address,
                city,
                payment_method,
            };
            commands::orders::checkout(&mut ctx, info)?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&ctx)?,
            OrdersAction::Cancel { id } => commands::orders::cancel(&ctx, &id)?,
            OrdersAction::Return { id } => commands::orders::request_return(&ctx, &id)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders => commands::admin::orders(&ctx)?,
            AdminAction::Summary => commands::admin::summary(&ctx)?,
        },
    }
    Ok(())
}
