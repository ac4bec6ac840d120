//! Logging setup.
//!
//! Logs go to stderr so they never interleave with the rendered display on
//! stdout. `RUST_LOG` takes precedence over the configured level:
//! ```bash
//! RUST_LOG=glasscalc=debug glasscalc eval 5 + 3 =
//! ```

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize logging with a default filter such as `warn` or `debug`.
///
/// Safe to call multiple times (only first call takes effect).
pub fn init_with_level(level: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}
