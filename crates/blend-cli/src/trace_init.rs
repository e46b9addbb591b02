use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "blend_core=info";
const VERBOSE_FILTER: &str = "blend_core=debug,blend_cli=debug";

/// Install the stderr subscriber. `RUST_LOG` overrides the default filter
/// unless `verbose` is set.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(filter)
            .init();
    });
}
