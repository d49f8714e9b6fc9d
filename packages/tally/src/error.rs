//! Errors raised while mounting views and installing the logger.

use thiserror::Error;

/// Errors returned by [`render`](crate::render), [`render_to`](crate::render_to) and
/// [`logging::init_console`](crate::logging::init_console).
#[derive(Debug, Error)]
pub enum Error {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("`window` has no `document`")]
    NoDocument,
    #[error("`document` has no `body`")]
    NoBody,
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("failed to install the console logger: {0}")]
    Logger(String),
}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
