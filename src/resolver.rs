//! Payload resolution: what string ends up inside the QR symbol.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::copy_page::render_compact_copy_page;
use crate::error::{Error, Result};

/// Prefix of every data URL produced by [`data_url`].
pub const DATA_URL_PREFIX: &str = "data:text/html;base64,";

/// How the text reaches the person scanning the code.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// The symbol carries the literal text.
    DirectEmbed,
    /// The symbol carries a compact copy page as a `data:` URL.
    #[default]
    DataUrlEmbed,
    /// The symbol carries the URL of a copy page published elsewhere.
    ExternalUrl(String),
}

impl DeliveryMode {
    /// Short name used in logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            DeliveryMode::DirectEmbed => "direct",
            DeliveryMode::DataUrlEmbed => "data-url",
            DeliveryMode::ExternalUrl(_) => "external",
        }
    }
}

/// Wraps an HTML document in a base64 `data:` URL.
pub fn data_url(html: &str) -> String {
    let encoded = STANDARD.encode(html.as_bytes());
    format!("{DATA_URL_PREFIX}{encoded}")
}

/// Produces the exact string to encode for `text` under `mode`.
///
/// Data URLs embed the compact copy page, which leaves room for a few
/// hundred characters of text even in the largest symbol.
///
/// # Errors
///
/// [`Error::MissingHostedUrl`] when `mode` is [`DeliveryMode::ExternalUrl`]
/// with an empty URL. Any other URL is returned as given.
///
/// # Example
///
/// ```rust
/// use qrcopy::resolver::{resolve, DeliveryMode};
///
/// assert_eq!(resolve("hello", &DeliveryMode::DirectEmbed).unwrap(), "hello");
/// assert!(resolve("hello", &DeliveryMode::DataUrlEmbed)
///     .unwrap()
///     .starts_with("data:text/html;base64,"));
/// ```
pub fn resolve(text: &str, mode: &DeliveryMode) -> Result<String> {
    let payload = match mode {
        DeliveryMode::DirectEmbed => text.to_owned(),
        DeliveryMode::DataUrlEmbed => {
            let url = data_url(&render_compact_copy_page(text));
            warn!(len = url.len(), "data URLs are not opened by every scanner; consider hosting the copy page");
            url
        }
        DeliveryMode::ExternalUrl(url) => {
            if url.is_empty() {
                return Err(Error::MissingHostedUrl);
            }
            url.clone()
        }
    };
    debug!(mode = mode.name(), len = payload.len(), "resolved QR payload");
    Ok(payload)
}
