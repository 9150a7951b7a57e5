//! Kirana CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the products table
//! kirana-cli migrate
//!
//! # Copy the built-in catalog into the products table
//! kirana-cli seed --stock 50
//!
//! # List the products table, newest first
//! kirana-cli products
//!
//! # Price 750 grams of product 1 (Basmati Rice)
//! kirana-cli quote --product 1 --quantity 750 --unit gram
//! ```
//!
//! Database commands read `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kirana-cli")]
#[command(author, version, about = "Kirana store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the products table migrations
    Migrate,
    /// Insert the built-in catalog into the products table
    Seed {
        /// Stock quantity given to each product
        #[arg(short, long, default_value_t = 100)]
        stock: i32,
    },
    /// List the products table
    Products,
    /// Price a quantity of a built-in product
    Quote {
        /// Built-in product id
        #[arg(short, long)]
        product: String,

        /// Quantity in the chosen unit
        #[arg(short, long)]
        quantity: String,

        /// Unit (kg, gram, L, ml, piece, loaf); defaults to the product's own
        #[arg(short, long)]
        unit: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { stock } => {
            commands::products::seed(stock).await?;
        }
        Commands::Products => commands::products::list().await?,
        Commands::Quote {
            product,
            quantity,
            unit,
        } => {
            let quote = commands::quote::quote(&product, &quantity, unit.as_deref())?;
            tracing::info!("{quote}");
        }
    }
    Ok(())
}
