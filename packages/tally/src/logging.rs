//! Logging to the browser console.
//!
//! `tracing` is built with its `log` feature, so events are forwarded as [`log`] records whenever
//! no `tracing` subscriber is installed. [`init_console`] routes those records to the console.
//!
//! _This API requires the following crate features to be activated: `dom`_

use crate::error::Error;

/// Install [`console_log`] as the global logger. Records above `level` are discarded.
///
/// Fails with [`Error::Logger`] if a global logger was already installed.
pub fn init_console(level: log::Level) -> Result<(), Error> {
    console_log::init_with_level(level).map_err(|err| Error::Logger(err.to_string()))?;
    tracing::debug!(%level, "console logging enabled");
    Ok(())
}
