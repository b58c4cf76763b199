//! One user submission, from raw text to downloadable artifacts.
//!
//! Each submission renders the downloadable copy page once, then performs
//! exactly one payload resolution and at most one encode. Nothing is shared
//! between submissions.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::copy_page::{render_copy_page, COPY_PAGE_FILE_NAME, PNG_FILE_NAME};
use crate::encoder::{self, RasterImage};
use crate::error::Result;
use crate::helper;
use crate::policy::EncodingPolicy;
use crate::resolver::{self, DeliveryMode};

/// File name of the optional SVG rendering.
pub const SVG_FILE_NAME: &str = "qr-code.svg";

/// Text entered by the user together with its rendered copy page.
#[derive(Clone, Debug)]
pub struct Submission<'a> {
    text: &'a str,
    page: String,
}

/// Result of the QR step of a submission.
#[derive(Clone, Debug)]
pub struct QrOutput {
    /// The string inside the symbol.
    pub payload: String,
    pub image: RasterImage,
}

impl<'a> Submission<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            page: render_copy_page(text),
        }
    }

    pub fn text(&self) -> &str {
        self.text
    }

    /// The copy page, offered for download whatever happens to the QR step.
    pub fn copy_page(&self) -> &str {
        &self.page
    }

    /// Resolves the payload for `mode`.
    pub fn payload(&self, mode: &DeliveryMode) -> Result<String> {
        resolver::resolve(self.text, mode)
    }

    /// Resolves and encodes the QR code for this submission.
    #[instrument(skip_all, fields(mode = mode.name(), text_len = self.text.len()))]
    pub fn qr(&self, mode: &DeliveryMode, policy: &EncodingPolicy) -> Result<QrOutput> {
        let payload = self.payload(mode)?;
        let image = encoder::encode(&payload, policy)?;
        info!(
            version = image.symbol().version(),
            ec = %image.symbol().error_correction(),
            payload_len = payload.len(),
            "generated QR code"
        );
        Ok(QrOutput { payload, image })
    }
}

/// Writes the copy page into `dir` as `copy.html`.
pub fn write_copy_page(dir: &Path, submission: &Submission<'_>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(COPY_PAGE_FILE_NAME);
    fs::write(&path, submission.copy_page())?;
    Ok(path)
}

/// Writes the QR image into `dir` as `qr-code.png`, plus `qr-code.svg` when
/// `svg_border` is set.
pub fn write_qr(dir: &Path, output: &QrOutput, svg_border: Option<u32>) -> Result<Vec<PathBuf>> {
    let png = output.image.to_png()?;
    let mut written = Vec::new();
    let write = |name: &str, bytes: &[u8]| -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    };
    written.push(write(PNG_FILE_NAME, &png)?);
    if let Some(border) = svg_border {
        let svg = helper::to_svg_string(output.image.symbol(), border);
        written.push(write(SVG_FILE_NAME, svg.as_bytes())?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn data_url_fits_while_the_download_page_would_not() {
        let sub = Submission::new("hello");
        let url = sub.payload(&DeliveryMode::DataUrlEmbed).unwrap();
        assert_eq!(url, resolver::resolve("hello", &DeliveryMode::DataUrlEmbed).unwrap());
        assert!(url.len() <= crate::capacity::max_byte_capacity(crate::ErrorCorrection::Low));
        assert!(resolver::data_url(sub.copy_page()).len() > url.len());

        let out = sub.qr(&DeliveryMode::DataUrlEmbed, &EncodingPolicy::default()).unwrap();
        assert_eq!(out.payload, url);
    }

    #[test]
    fn direct_submission_encodes_the_text() {
        let sub = Submission::new("hello");
        let out = sub.qr(&DeliveryMode::DirectEmbed, &EncodingPolicy::default()).unwrap();
        assert_eq!(out.payload, "hello");
        assert_eq!(out.image.symbol().version(), 1);
    }

    #[test]
    fn missing_url_still_leaves_a_copy_page() {
        let sub = Submission::new("hello");
        let err = sub
            .qr(&DeliveryMode::ExternalUrl(String::new()), &EncodingPolicy::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingHostedUrl));
        assert!(sub.copy_page().contains("hello"));
    }

    #[test]
    fn long_text_as_data_url_overflows() {
        let text = "x".repeat(3000);
        let sub = Submission::new(&text);
        let err = sub.qr(&DeliveryMode::DataUrlEmbed, &EncodingPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { .. }));
    }

    #[test]
    fn writes_artifacts_to_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = Submission::new("hello");
        let page = write_copy_page(dir.path(), &sub).unwrap();
        assert_eq!(fs::read_to_string(&page).unwrap(), sub.copy_page());

        let out = sub.qr(&DeliveryMode::DirectEmbed, &EncodingPolicy::default()).unwrap();
        let files = write_qr(dir.path(), &out, Some(4)).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with(PNG_FILE_NAME));
        assert_eq!(fs::read(&files[0]).unwrap(), out.image.to_png().unwrap());
        assert!(fs::read_to_string(&files[1]).unwrap().contains("<svg"));
    }
}
