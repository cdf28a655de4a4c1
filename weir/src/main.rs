//! The weir diagnostics tool

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::{event, Level};

mod args;

use args::{Args, Commands, HashArgs, ItemArgs, TableArgs};
use weir::conf::Backend;
use weir::report;
use weir::{
    Conf, Destination, HashConfig, HashRouter, Message, RingStore, RoutingTableId, Stores,
    WeirError,
};

impl From<TableArgs> for RoutingTableId {
    fn from(args: TableArgs) -> Self {
        RoutingTableId::new(args.scope, args.name)
    }
}

impl From<ItemArgs> for Message {
    fn from(args: ItemArgs) -> Self {
        let mut msg = Message::new(args.routing_key);
        for (name, value) in args.headers {
            msg = msg.with_header(name, value);
        }
        if let Some(correlation_id) = args.correlation_id {
            msg = msg.with_correlation_id(correlation_id);
        }
        if let Some(message_id) = args.message_id {
            msg = msg.with_message_id(message_id);
        }
        if let Some(timestamp) = args.timestamp {
            msg = msg.with_timestamp(timestamp);
        }
        msg
    }
}

impl HashArgs {
    /// Build the hash config these args describe
    fn config(&self) -> Result<HashConfig, WeirError> {
        Ok(HashConfig::from_args(
            self.hash_header.as_deref(),
            self.hash_property.as_deref(),
        )?)
    }
}

/// Print a table's ring after it changed
///
/// # Arguments
///
/// * `table` - The table that changed
/// * `router` - The router to read the new ring from
fn print_ring(table: &RoutingTableId, router: &HashRouter<Stores>) -> Result<(), WeirError> {
    match router.inspect(table)? {
        Some(ring) => print!("{}", report::ring_state(table, &ring)),
        None => println!("{} has no ring", table.bright_red()),
    }
    Ok(())
}

fn main() -> Result<(), WeirError> {
    // parse our command line args
    let args = Args::parse();
    // load our config
    let conf = Conf::new(&args.conf)?;
    // setup tracing
    weir::trace::setup(&conf)?;
    // changes to an in memory store are lost when we exit
    if conf.storage.backend == Backend::Memory {
        event!(
            Level::WARN,
            "Using the in memory backend; nothing will be persisted"
        );
    }
    // open our ring store and build a router on top of it
    let router = HashRouter::new(Stores::new(&conf)?);
    match args.cmd {
        Commands::Tables => {
            for table in router.store().tables()? {
                println!("{table}");
            }
        }
        Commands::RingState { table, json } => {
            let table = RoutingTableId::from(table);
            let ring = router.lookup(&table)?;
            if json {
                println!("{}", report::ring_state_json(&table, &ring)?);
            } else {
                print!("{}", report::ring_state(&table, &ring));
            }
        }
        Commands::Create { table } => {
            let table = RoutingTableId::from(table);
            router.create_table(&table)?;
            print_ring(&table, &router)?;
        }
        Commands::Delete { table } => {
            let table = RoutingTableId::from(table);
            if router.delete_table(&table)? {
                println!("Deleted {}", table.bright_blue());
            } else {
                println!("{} has no ring", table.bright_red());
            }
        }
        Commands::Bind {
            table,
            destination,
            binding_key,
        } => {
            let table = RoutingTableId::from(table);
            router.add_binding(&table, &Destination::new(destination), &binding_key)?;
            print_ring(&table, &router)?;
        }
        Commands::Unbind { table, destination } => {
            let table = RoutingTableId::from(table);
            router.remove_bindings(&table, &[Destination::new(destination)])?;
            print_ring(&table, &router)?;
        }
        Commands::Route { table, item, hash } => {
            let table = RoutingTableId::from(table);
            let config = hash.config()?;
            let msg = Message::from(item);
            match router.route(&table, &msg, &config)? {
                Some(destination) => println!("{}", destination.green()),
                None => println!("{}", "unroutable".bright_red()),
            }
        }
    }
    Ok(())
}
