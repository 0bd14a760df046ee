//! Commerce apps CLI: inspect manifests and invoke blocks from the shell.
//!
//! # Usage
//!
//! ```bash
//! # List every configured app's loaders and actions
//! ca-cli manifest
//!
//! # Run a loader against the page it would render for
//! ca-cli invoke wake/loaders/productListingPage.ts \
//!     --url "https://shop.example.com/busca?busca=caneca" \
//!     --props '{"first": 24}'
//!
//! # Run a cart action with the shopper's cookies
//! ca-cli invoke wake/actions/cart/addCoupon.ts \
//!     --props '{"coupon": "PROMO10"}' --cookie "carrinho-id=abc"
//! ```
//!
//! Apps are configured from the same environment variables as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ca-cli")]
#[command(author, version, about = "Commerce apps CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the loaders and actions of every configured app
    Manifest,
    /// Invoke a loader or action by key
    Invoke {
        /// Block key, e.g. `vtex/loaders/legacy/productList.ts`
        key: String,

        /// Props as JSON
        #[arg(short, long)]
        props: Option<String>,

        /// Page URL the block runs for (default: `APPS_BASE_URL`)
        #[arg(short, long)]
        url: Option<String>,

        /// Request cookies, e.g. `"a=b; c=d"`
        #[arg(short, long)]
        cookie: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = commerce_apps::AppsConfig::from_env()?;

    match cli.command {
        Commands::Manifest => commands::manifest::list(&config)?,
        Commands::Invoke {
            key,
            props,
            url,
            cookie,
        } => {
            commands::invoke::run(
                &config,
                &key,
                props.as_deref(),
                url.as_deref(),
                cookie.as_deref(),
            )
            .await?;
        }
    }
    Ok(())
}
