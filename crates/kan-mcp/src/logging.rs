//! Tracing setup for the server binary.
//!
//! All output goes to stderr; stdout carries the MCP protocol.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Directive that lets request traces through regardless of `RUST_LOG`.
pub const TRACE_DIRECTIVE: &str = "kan::trace=debug";

/// Filter used when `RUST_LOG` is unset.
///
/// Request traces from the `kan` client are debug events, so they are only
/// let through when the debug flag is on.
#[must_use]
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "kan=debug,kan_mcp=info"
    } else {
        "kan=warn,kan_mcp=info"
    }
}

/// Build the filter from a `RUST_LOG` value and the debug flag.
///
/// `RUST_LOG` replaces the default directives when set and valid. With the
/// debug flag on, request traces are enabled on top of whichever applies.
#[must_use]
pub fn filter(rust_log: Option<&str>, debug: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(debug)));
    match (debug, TRACE_DIRECTIVE.parse::<Directive>()) {
        (true, Ok(directive)) => filter.add_directive(directive),
        _ => filter,
    }
}

/// Install the global stderr subscriber.
pub fn init(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(rust_log.as_deref(), debug))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
