//! PagSeguro CLI - Checkouts and transaction lookups from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Open a checkout and print the payment URL
//! pagseguro checkout --item "0001:Notebook Prata:24300.00:1:1000" --reference 42
//!
//! # Look up a transaction, or resolve a notification code
//! pagseguro transaction 9E884542-81B3-4419-9A75-BCC6FB495EF1
//! pagseguro notification 766B9C-AD4B044B04DA-77742F5FA653-E1AB24
//!
//! # Search a date range, following every page
//! pagseguro search --from 2011-02-01T00:00 --to 2011-02-28T23:59 --all
//! ```
//!
//! # Environment Variables
//!
//! - `PAGSEGURO_EMAIL`, `PAGSEGURO_TOKEN` - Seller credentials (required)
//! - `PAGSEGURO_SANDBOX` - Use the sandbox hosts
//! - `RUST_LOG` - Log filter (default: `info`); add `--json-logs` for JSON output

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::checkout::{CheckoutArgs, ItemArg};

#[derive(Parser)]
#[command(name = "pagseguro")]
#[command(author, version, about = "PagSeguro gateway tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a checkout and print its payment URL
    Checkout {
        /// Item as `ID:DESCRIPTION:AMOUNT:QUANTITY:WEIGHT` (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemArg>,

        /// Order reference (the configured prefix is added)
        #[arg(short, long)]
        reference: Option<String>,

        /// Buyer email
        #[arg(long)]
        sender_email: Option<String>,

        /// Buyer name
        #[arg(long)]
        sender_name: Option<String>,

        /// Where the buyer goes after paying
        #[arg(long)]
        redirect_url: Option<String>,
    },
    /// Look up a transaction by code
    Transaction {
        /// Transaction code
        code: String,
    },
    /// Resolve a notification code into its transaction
    Notification {
        /// Notification code posted by the gateway
        code: String,
    },
    /// Search transactions by date
    Search {
        /// Start of the range (`YYYY-MM-DDTHH:MM`)
        #[arg(long, value_parser = commands::search::parse_datetime)]
        from: NaiveDateTime,

        /// End of the range (`YYYY-MM-DDTHH:MM`)
        #[arg(long, value_parser = commands::search::parse_datetime)]
        to: NaiveDateTime,

        /// Page to fetch
        #[arg(long)]
        page: Option<u32>,

        /// Results per page
        #[arg(long)]
        max_results: Option<u32>,

        /// Follow every page from `--page` on
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let client = pagseguro::PagSeguroClient::from_env()?;

    match cli.command {
        Commands::Checkout {
            items,
            reference,
            sender_email,
            sender_name,
            redirect_url,
        } => {
            let args = CheckoutArgs {
                items,
                reference,
                sender_email,
                sender_name,
                redirect_url,
            };
            commands::checkout::run(&client, args).await?;
        }
        Commands::Transaction { code } => {
            commands::transaction::lookup(&client, &code).await?;
        }
        Commands::Notification { code } => {
            commands::transaction::notification(&client, &code).await?;
        }
        Commands::Search {
            from,
            to,
            page,
            max_results,
            all,
        } => {
            let mut query = pagseguro::TransactionQuery::new(from, to);
            query.page = page;
            query.max_results = max_results;
            commands::search::run(&client, &query, all).await?;
        }
    }
    Ok(())
}
