//! The command line args for the weir diagnostics tool

use clap::{Parser, Subcommand};
use weir_core::selector::{HASH_HEADER_ARG, HASH_PROPERTY_ARG};

/// Inspect and manage weir routing tables
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// The path to the config file for weir
    #[clap(short, long, default_value = "weir.yml")]
    pub conf: String,
    /// The command to run
    #[clap(subcommand)]
    pub cmd: Commands,
}

/// Parse a header in name=value form
///
/// # Arguments
///
/// * `raw` - The raw header arg
fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("header '{raw}' is not in name=value form")),
    }
}

/// A routing table to operate on
#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// The scope the table is in
    pub scope: String,
    /// The name of the table
    pub name: String,
}

/// How to hash items for a route
#[derive(clap::Args, Debug)]
pub struct HashArgs {
    /// The header to hash on
    #[clap(long = HASH_HEADER_ARG)]
    pub hash_header: Option<String>,
    /// The property to hash on
    #[clap(long = HASH_PROPERTY_ARG)]
    pub hash_property: Option<String>,
}

/// The values to set on a test item
#[derive(clap::Args, Debug)]
pub struct ItemArgs {
    /// The routing key to route with
    pub routing_key: String,
    /// Headers to set in name=value form
    #[clap(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
    /// The correlation id to set
    #[clap(long)]
    pub correlation_id: Option<String>,
    /// The message id to set
    #[clap(long)]
    pub message_id: Option<String>,
    /// The timestamp to set
    #[clap(long)]
    pub timestamp: Option<u64>,
}

/// The commands the diagnostics tool supports
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every routing table with a ring
    Tables,
    /// Print the bucket ring for a routing table
    RingState {
        #[clap(flatten)]
        table: TableArgs,
        /// Print the ring as json
        #[clap(long)]
        json: bool,
    },
    /// Create an empty ring for a routing table
    Create {
        #[clap(flatten)]
        table: TableArgs,
    },
    /// Delete the ring for a routing table
    Delete {
        #[clap(flatten)]
        table: TableArgs,
    },
    /// Bind a destination with the weight in a binding key
    Bind {
        #[clap(flatten)]
        table: TableArgs,
        /// The destination to bind
        destination: String,
        /// The binding key holding this bindings weight
        binding_key: String,
    },
    /// Remove every binding for a destination
    Unbind {
        #[clap(flatten)]
        table: TableArgs,
        /// The destination to unbind
        destination: String,
    },
    /// Show which destination an item would be routed to
    Route {
        #[clap(flatten)]
        table: TableArgs,
        #[clap(flatten)]
        item: ItemArgs,
        #[clap(flatten)]
        hash: HashArgs,
    },
}
