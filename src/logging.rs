//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`; run summaries are printed
//! to stdout separately by [`crate::output`].
//!
//! | Flags | Filter |
//! |-------|--------|
//! | (none) | `shutterpage=info` |
//! | `-v` | `shutterpage=debug` |
//! | `-vv` | `shutterpage=trace` |
//! | `-q` | `shutterpage=error` |
//!
//! `RUST_LOG` overrides the table when set. Output is colored when stderr is
//! a terminal and compact plain text otherwise.

use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the given verbosity flags.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "shutterpage=error";
    }
    match verbose {
        0 => "shutterpage=info",
        1 => "shutterpage=debug",
        _ => "shutterpage=trace",
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .compact()
            .with_ansi(false)
            .with_target(false)
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
