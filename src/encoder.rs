//! QR encoding of a resolved payload.
//!
//! This module is a thin layer over the `qrcode` crate: it chooses the
//! symbol version (see [`crate::capacity`]), encodes the payload as a single
//! byte-mode segment and rasterises the result according to an
//! [`EncodingPolicy`].

use image::GrayImage;
use qrcode::bits::Bits;
use qrcode::{Color, QrCode, Version};
use tracing::debug;

use crate::capacity;
use crate::error::Result;
use crate::helper;
use crate::policy::{EncodingPolicy, ErrorCorrection};

/// A QR Code symbol: a square grid of dark and light modules.
///
/// Instances are immutable after creation. Create one with [`QrSymbol::new`]
/// or indirectly through [`encode`].
///
/// # Example
///
/// ```rust
/// use qrcopy::encoder::QrSymbol;
/// use qrcopy::policy::ErrorCorrection;
///
/// let qr = QrSymbol::new("Hello, World!", ErrorCorrection::Low, None).unwrap();
/// assert_eq!(qr.version(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSymbol {
    version: u8,
    level: ErrorCorrection,
    /// Width and height in modules, `version * 4 + 17`.
    size: usize,
    /// Row-major, `true` = dark.
    modules: Vec<bool>,
}

impl QrSymbol {
    /// Encodes `payload` into a symbol.
    ///
    /// With `version == None` the smallest version that holds the payload at
    /// `level` is used. With a fixed version the payload must fit in it.
    ///
    /// # Errors
    ///
    /// * [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) if the payload is too long.
    /// * [`Error::InvalidVersion`](crate::Error::InvalidVersion) if a fixed version is outside 1..=40.
    /// * [`Error::EncodingFailure`](crate::Error::EncodingFailure) for any fault inside the QR library.
    pub fn new(payload: &str, level: ErrorCorrection, version: Option<u8>) -> Result<Self> {
        let data = payload.as_bytes();
        let version = match version {
            Some(v) => {
                capacity::check_fits(data.len(), v, level)?;
                v
            }
            None => capacity::fit_version(data.len(), level)?,
        };

        let mut bits = Bits::new(Version::Normal(i16::from(version)));
        bits.push_byte_data(data)?;
        bits.push_terminator(level.ec_level())?;
        let code = QrCode::with_bits(bits, level.ec_level())?;

        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect::<Vec<_>>();
        debug!(len = data.len(), version, %level, size, "encoded QR symbol");

        Ok(Self {
            version,
            level: ErrorCorrection::from_ec_level(code.error_correction_level()),
            size,
            modules,
        })
    }

    /// Returns this symbol's version, in the range 1 to 40.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns this symbol's error correction level.
    pub fn error_correction(&self) -> ErrorCorrection {
        self.level
    }

    /// Returns the width (and height) of this symbol in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the color of the module at (x, y): `true` for dark.
    ///
    /// Coordinates outside the grid are part of the quiet zone and read as
    /// light, so callers can draw a border by iterating past the edges.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let size = self.size as i64;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            self.modules[(y * size + x) as usize]
        } else {
            false
        }
    }
}

/// A rendered QR symbol: black modules on white, ready to save as PNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pixels: GrayImage,
    symbol: QrSymbol,
}

impl RasterImage {
    /// The symbol this image was drawn from.
    pub fn symbol(&self) -> &QrSymbol {
        &self.symbol
    }

    /// The raster itself.
    pub fn pixels(&self) -> &GrayImage {
        &self.pixels
    }

    /// Image width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Encodes the image as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        helper::png_bytes(&self.pixels)
    }
}

/// Encodes `payload` under `policy` and rasterises it.
///
/// Pure function of its inputs: calling it twice with the same arguments
/// produces identical images.
///
/// # Example
///
/// ```rust
/// use qrcopy::encoder::encode;
/// use qrcopy::policy::EncodingPolicy;
///
/// let img = encode("hello", &EncodingPolicy::default()).unwrap();
/// // 21 modules + 2 * 4 border modules, 10 pixels each
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
pub fn encode(payload: &str, policy: &EncodingPolicy) -> Result<RasterImage> {
    let symbol = QrSymbol::new(payload, policy.ec_level, policy.version)?;
    let pixels = helper::to_gray_image(&symbol, policy.module_size, policy.border)?;
    Ok(RasterImage { pixels, symbol })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::max_byte_capacity;
    use crate::Error;

    #[test]
    fn auto_fit_uses_smallest_version() {
        let qr = QrSymbol::new("hello", ErrorCorrection::Low, None).unwrap();
        assert_eq!(qr.version(), 1);
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.error_correction(), ErrorCorrection::Low);

        let qr = QrSymbol::new(&"a".repeat(18), ErrorCorrection::Low, None).unwrap();
        assert_eq!(qr.version(), 2);
        assert_eq!(qr.size(), 25);
    }

    #[test]
    fn fixed_version_is_honoured() {
        let qr = QrSymbol::new("hello", ErrorCorrection::Medium, Some(7)).unwrap();
        assert_eq!(qr.version(), 7);
        assert_eq!(qr.size(), 45);
    }

    #[test]
    fn fixed_version_too_small_fails() {
        let err = QrSymbol::new(&"a".repeat(18), ErrorCorrection::Low, Some(1)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { len: 18, capacity: 17, version: 1, .. }));
    }

    #[test]
    fn version_out_of_range_fails() {
        assert!(matches!(
            QrSymbol::new("x", ErrorCorrection::Low, Some(0)),
            Err(Error::InvalidVersion(0))
        ));
        assert!(matches!(
            QrSymbol::new("x", ErrorCorrection::Low, Some(41)),
            Err(Error::InvalidVersion(41))
        ));
    }

    #[test]
    fn largest_payload_fits_and_one_more_byte_does_not() {
        let max = max_byte_capacity(ErrorCorrection::Low);
        assert_eq!(max, 2953);

        let qr = QrSymbol::new(&"x".repeat(max), ErrorCorrection::Low, None).unwrap();
        assert_eq!(qr.version(), 40);
        assert_eq!(qr.size(), 177);

        let err = QrSymbol::new(&"x".repeat(max + 1), ErrorCorrection::Low, None).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { len: 2954, capacity: 2953, .. }));
    }

    #[test]
    fn capacity_counts_utf8_bytes_not_chars() {
        // 'é' is two bytes, so 9 of them need 18 bytes.
        let qr = QrSymbol::new(&"é".repeat(9), ErrorCorrection::Low, None).unwrap();
        assert_eq!(qr.version(), 2);
    }

    #[test]
    fn finder_pattern_corners_are_dark() {
        let qr = QrSymbol::new("hello", ErrorCorrection::Low, None).unwrap();
        let last = qr.size() as i64 - 1;
        assert!(qr.is_dark(0, 0));
        assert!(qr.is_dark(last, 0));
        assert!(qr.is_dark(0, last));
        assert!(!qr.is_dark(-1, 0));
        assert!(!qr.is_dark(0, last + 1));
    }

    #[test]
    fn encode_respects_module_size_and_border() {
        let policy = EncodingPolicy::default().with_module_size(3).with_border(2);
        let img = encode("hello", &policy).unwrap();
        assert_eq!(img.dimensions(), ((21 + 4) * 3, (21 + 4) * 3));
        assert_eq!(img.symbol().version(), 1);

        // Quiet zone is white, top-left finder module is black.
        assert_eq!(img.pixels().get_pixel(0, 0).0, [255]);
        assert_eq!(img.pixels().get_pixel(6, 6).0, [0]);
    }

    #[test]
    fn encode_is_deterministic() {
        let policy = EncodingPolicy::default();
        let a = encode("same input", &policy).unwrap().to_png().unwrap();
        let b = encode("same input", &policy).unwrap().to_png().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_module_size_is_rejected() {
        let policy = EncodingPolicy::default().with_module_size(0);
        assert!(matches!(encode("hello", &policy), Err(Error::EncodingFailure(_))));
    }

    #[test]
    fn oversized_module_size_is_an_error_not_an_abort() {
        let policy = EncodingPolicy::default().with_module_size(5_000_000);
        assert!(matches!(encode("hello", &policy), Err(Error::EncodingFailure(_))));
    }
}
