use crate::policy::ErrorCorrection;

/// Errors raised while turning text into a QR code.
///
/// None of these are fatal: they are reported back to whoever submitted the
/// text, who can shorten it, pick another delivery mode or supply a URL.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload does not fit in the requested (or largest) QR version.
    #[error(
        "payload is {len} bytes but version {version} holds at most {capacity} bytes at {level} error correction"
    )]
    CapacityExceeded {
        len: usize,
        capacity: usize,
        version: u8,
        level: ErrorCorrection,
    },

    /// External-URL delivery was chosen without a hosted URL.
    #[error("external URL mode needs the URL of the hosted copy page")]
    MissingHostedUrl,

    /// A fixed version outside 1..=40 was requested.
    #[error("QR version {0} does not exist (valid range is 1 to 40)")]
    InvalidVersion(u8),

    /// Any other fault from the QR library or the image codec.
    #[error("QR encoding failed: {0}")]
    EncodingFailure(String),

    /// Writing an artifact to disk failed.
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A short suggestion on how to resubmit.
    pub fn hint(&self) -> &'static str {
        match self {
            Error::CapacityExceeded { .. } => {
                "shorten the text, lower the error correction level, or host the copy page and use its URL"
            }
            Error::MissingHostedUrl => "supply the URL where copy.html is published",
            Error::InvalidVersion(_) => "pick a version between 1 and 40, or leave it unset to auto-fit",
            Error::EncodingFailure(_) => "check the encoding settings and try again",
            Error::Io(_) => "check that the output directory is writable",
        }
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(err: qrcode::types::QrError) -> Self {
        Error::EncodingFailure(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::EncodingFailure(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
