//! Tracing subscriber initialisation.
//!
//! The core library only emits spans and events; this binary decides where
//! they go. Output is written to stderr so it never mixes with the prompts.
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before any event fires.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn default_filter(verbose: u8) -> EnvFilter {
    let level = derive_level(verbose);
    EnvFilter::new(format!("create_pywire_app={level},scaffolder_core={level}"))
}

fn derive_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_default() {
        assert_eq!(derive_level(0), "warn");
    }

    #[test]
    fn level_steps_with_each_flag() {
        assert_eq!(derive_level(1), "info");
        assert_eq!(derive_level(2), "debug");
        assert_eq!(derive_level(3), "trace");
        assert_eq!(derive_level(12), "trace");
    }

    #[test]
    fn default_filter_covers_both_crates() {
        let rendered = default_filter(2).to_string();
        assert!(rendered.contains("create_pywire_app=debug"));
        assert!(rendered.contains("scaffolder_core=debug"));
    }
}
