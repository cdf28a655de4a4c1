//! Enables trace logging for weir to some sink

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::conf::{Conf, Tracing};
use crate::errors::WeirError;

/// Setup local tracing to stderr
fn setup_local(conf: &Tracing) -> impl Layer<Registry> + Send + Sync {
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(conf.level.to_filter())
}

/// Setup basic tracing
///
/// # Arguments
///
/// * `conf` - The weir config
pub fn setup(conf: &Conf) -> Result<(), WeirError> {
    // setup our local tracer
    let local = setup_local(&conf.tracing);
    // setup our registry
    tracing_subscriber::registry().with(local).try_init()?;
    Ok(())
}
