//! Bus-ticketing command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the token is saved for later runs
//! ticketweb login lan --password secret
//!
//! # Browse
//! ticketweb open /schedules --filter route=3
//! ticketweb seats 12
//!
//! # Book and pay
//! ticketweb book 12 31 32 --promo TET
//! ticketweb pay 41 450000.00 --method momo
//! ```

use std::io::{self, Write};

use clap::Parser;
use ticketweb_app::Runtime;
use ticketweb_cli::{Args, CliError, run};
use ticketweb_client::{ApiClient, FileTokenStore, HttpTransport, TokenStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let token_path = args
        .token_file
        .clone()
        .or_else(FileTokenStore::default_path)
        .ok_or(CliError::NoTokenFile)?;
    let tokens = FileTokenStore::new(token_path);
    tracing::debug!(path = %tokens.path().display(), "token file");

    let config = args.client_config(tokens.load()?);
    tracing::debug!(
        api = config.base_url(),
        signed_in = config.token().is_some(),
        "client ready"
    );

    let transport = HttpTransport::new(&config)?;
    let mut runtime = Runtime::new(ApiClient::new(config, transport));

    let mut out = io::stdout().lock();
    run(&mut runtime, &tokens, args.action, &mut out).await?;
    out.flush()?;

    Ok(())
}
