//! Tracing setup
//!
//! The terminal belongs to the driver while the program runs, so log
//! records go to a writer supplied by the caller (normally a file).

use std::io::Write;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{ArborError, ArborResult};

const DEFAULT_DIRECTIVES: &str = "arbor=info,arbor_core=info";
const DEBUG_DIRECTIVES: &str = "arbor=debug,arbor_core=debug";

/// Install the global subscriber writing to `writer`.
///
/// `RUST_LOG` takes precedence over the defaults; `debug` raises the
/// default level of the arbor crates.
pub fn init_tracing<W>(writer: W, debug: bool) -> ArborResult<()>
where
    W: Write + Send + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            DEBUG_DIRECTIVES
        } else {
            DEFAULT_DIRECTIVES
        })
    });

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ArborError::Tracing {
            message: e.to_string(),
        })
}
