// In: src/observability.rs

//! Logging backend installation. The library itself only talks to the `log`
//! facade; this module wires up `env_logger` for callers that want to see the
//! cursor's fetch/close trace without bringing their own logger.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

use crate::error::RowStreamError;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Debug` level, once per process.
///
/// When `log_file` is given, records are appended to that file instead of
/// stderr. Subsequent calls are no-ops, including their `log_file` argument.
pub fn enable_verbose_logging(log_file: Option<&str>) -> Result<(), RowStreamError> {
    // Open the file outside the `Once` so a bad path surfaces as an error.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
