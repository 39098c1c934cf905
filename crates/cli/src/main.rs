//! Nu Cart CLI - drive the cart widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Page load: create the cart slot and show the badge
//! nucart init
//!
//! # Press "Add to Cart"
//! nucart add --title "Red Rice" --price 120 --image /img/red-rice.png
//!
//! # Open the cart
//! nucart list
//!
//! # Press "+" / "-" / "Remove" on a row
//! nucart change --index 0 --by 1
//! nucart change --title "Red Rice" --by -1
//! nucart remove --index 0
//!
//! # Proceed to checkout
//! nucart checkout
//!
//! # Print HTML fragments instead of text
//! nucart --html list
//! ```
//!
//! Storage location, slot name and currency prefix come from `NUCART_*`
//! environment variables (see `nucart_widget::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use nucart_core::{ItemTitle, Price};
use nucart_widget::{LogFormat, WidgetConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

use commands::cart::{Action, Target};

#[derive(Parser)]
#[command(name = "nucart")]
#[command(author, version, about = "Nu Cart widget from the command line")]
struct Cli {
    /// Print rendered HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the cart slot if missing and show the badge
    Init,
    /// Add one unit of a product
    Add {
        /// Product title
        #[arg(short, long)]
        title: ItemTitle,

        /// Unit price (e.g. 10.50)
        #[arg(short, long)]
        price: Price,

        /// Image reference
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Show the cart contents
    List,
    /// Change the quantity of a cart entry
    Change {
        #[command(flatten)]
        target: TargetArgs,

        /// Units to add (negative to take away)
        #[arg(long, allow_negative_numbers = true)]
        by: i64,
    },
    /// Remove a cart entry
    Remove {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Check out and empty the cart
    Checkout,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Row position as shown by `list`
    #[arg(short, long)]
    index: Option<usize>,

    /// Product title
    #[arg(short, long)]
    title: Option<ItemTitle>,
}

impl From<TargetArgs> for Target {
    fn from(args: TargetArgs) -> Self {
        match (args.index, args.title) {
            (Some(index), None) => Self::Index(index),
            (None, Some(title)) => Self::Title(title),
            _ => unreachable!("clap requires exactly one of --index and --title"),
        }
    }
}

impl From<Commands> for Action {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Init => Self::Init,
            Commands::Add {
                title,
                price,
                image,
            } => Self::Add {
                title,
                price,
                image,
            },
            Commands::List => Self::List,
            Commands::Change { target, by } => Self::Change {
                target: target.into(),
                delta: by,
            },
            Commands::Remove { target } => Self::Remove {
                target: target.into(),
            },
            Commands::Checkout => Self::Checkout,
        }
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nucart_cli=info,nucart_widget=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
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

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let action = Action::from(cli.command);
    if let Err(e) = commands::cart::run(&config, &action, cli.html) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
