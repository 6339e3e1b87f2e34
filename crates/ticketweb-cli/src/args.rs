//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ticketweb_client::{ClientConfig, DEFAULT_API_URL};
use ticketweb_proto::{EntityId, PaymentMethod};

/// Bus-ticketing client
#[derive(Parser, Debug)]
#[command(name = "ticketweb")]
#[command(about = "Command-line client for the bus-ticketing service")]
#[command(version)]
pub struct Args {
    /// API root
    #[arg(long, env = "TICKETWEB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File holding the saved access token
    ///
    /// Defaults to `<config dir>/ticketweb/access_token`.
    #[arg(long, env = "TICKETWEB_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// OAuth2 application id used to sign in
    #[arg(long, env = "TICKETWEB_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth2 application secret used to sign in
    #[arg(long, env = "TICKETWEB_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// What to do
    #[command(subcommand)]
    pub action: Action,
}

impl Args {
    /// Client configuration from these arguments and the saved token.
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_token(token)
            .with_oauth_client(self.client_id.clone(), self.client_secret.clone())
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a view by path, e.g. `/companies`
    Open {
        /// Navigation path
        path: String,
        /// List filter as `key=value`; repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Sign in and save the access token
    Login {
        /// Account login name
        username: String,
        /// Account password
        #[arg(long, env = "TICKETWEB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved access token
    Logout,

    /// Create an account
    Register {
        /// Login name
        username: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long, env = "TICKETWEB_PASSWORD", hide_env_values = true)]
        password: String,
        /// Given name
        #[arg(long)]
        first_name: Option<String>,
        /// Family name
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Change the password of the signed-in account
    Passwd {
        /// Password in use now
        #[arg(long)]
        current: String,
        /// Replacement password
        #[arg(long)]
        new: String,
    },

    /// Show one record
    Show {
        /// Record type
        #[arg(value_enum)]
        kind: Kind,
        /// Record id
        id: EntityId,
    },

    /// Seat map of a schedule
    Seats {
        /// Schedule id
        schedule: EntityId,
    },

    /// Register a bus company
    AddCompany {
        /// Trading name
        name: String,
        /// Postal address
        #[arg(long)]
        address: Option<String>,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Register a bus
    AddBus {
        /// Owning company id
        #[arg(long)]
        company: EntityId,
        /// Registration plate
        license_plate: String,
        /// Seat count
        #[arg(long)]
        capacity: Option<u16>,
    },

    /// Book seats on a schedule
    Book {
        /// Schedule id
        schedule: EntityId,
        /// Seat ids
        #[arg(required = true)]
        seats: Vec<EntityId>,
        /// Note for the operator
        #[arg(long)]
        note: Option<String>,
        /// Discount code
        #[arg(long)]
        promo: Option<String>,
    },

    /// Pay for a reservation
    Pay {
        /// Reservation id
        reservation: EntityId,
        /// Amount, as a decimal string
        amount: String,
        /// Payment channel
        #[arg(long, value_enum, default_value_t = PayWith::BankTransfer)]
        method: PayWith,
    },

    /// Check a discount code
    Promo {
        /// Code to check
        code: String,
    },

    /// List current promotions
    Promotions,

    /// List notifications for the signed-in account
    Notifications,

    /// Send a chat message
    Say {
        /// Recipient account id
        receiver: EntityId,
        /// Message text
        message: String,
    },

    /// Ask the assistant for a reply suggestion
    Suggest {
        /// Prompt text
        message: String,
    },

    /// Print the route table
    Routes,
}

/// Record types for `show`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Bus company
    Company,
    /// Bus
    Bus,
    /// Route
    Route,
    /// Schedule
    Schedule,
    /// Reservation
    Reservation,
    /// Payment
    Payment,
}

/// Payment channels for `pay`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayWith {
    /// Cash at the counter
    Cash,
    /// Bank transfer
    BankTransfer,
    /// MoMo wallet
    Momo,
    /// Card
    CreditCard,
}

impl From<PayWith> for PaymentMethod {
    fn from(method: PayWith) -> Self {
        match method {
            PayWith::Cash => Self::Cash,
            PayWith::BankTransfer => Self::BankTransfer,
            PayWith::Momo => Self::Momo,
            PayWith::CreditCard => Self::CreditCard,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}
