//! Logger setup for the headless binary
//!
//! The Bevy front end installs its own subscriber through `LogPlugin`, so
//! this is only used when running without the UI.

use env_logger::{Builder, Env};

/// Filter applied when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,corridor_sim=debug"
    } else {
        "warn,corridor_sim=info"
    }
}

/// Initialize the global logger. `RUST_LOG` takes precedence over the
/// built-in filter.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);

    // Only fails if a logger is already installed
    let _ = builder.try_init();
}
