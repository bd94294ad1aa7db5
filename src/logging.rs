//! Logger setup.
//!
//! `RUST_LOG` overrides the default `kiosk_display=info` filter, e.g.
//! `RUST_LOG=kiosk_display=debug` to see reloads, panel changes and the
//! periodic frame statistics.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "kiosk_display=info,kiosk=info";

/// Install the global logger. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.filter_module("notify", LevelFilter::Warn);

    builder.format(|buf, record| {
        let style = buf.default_level_style(record.level());
        writeln!(
            buf,
            "[{} {style}{}{style:#}][{}] {}",
            buf.timestamp_seconds(),
            record.level(),
            record.module_path().unwrap_or("<unknown>"),
            record.args()
        )
    });

    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        log::info!("logger initialised");
    }
}
