use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use crate::encoder::QrSymbol;
use crate::error::{Error, Result};

/*---- Utilities ----*/

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Largest raster, in pixels, that [`to_gray_image`] will allocate.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 26;

/// Rasterises `qr` into a greyscale image.
///
/// Every module becomes a `module_size` x `module_size` square, and `border`
/// light modules are added on each side as the quiet zone.
///
/// # Errors
///
/// Returns [`Error::EncodingFailure`] if `module_size` is zero or the image
/// would exceed [`MAX_IMAGE_PIXELS`].
pub fn to_gray_image(qr: &QrSymbol, module_size: u32, border: u32) -> Result<GrayImage> {
    if module_size == 0 {
        return Err(Error::EncodingFailure("module size must be at least one pixel".into()));
    }
    let side = u32::try_from(qr.size())
        .ok()
        .and_then(|s| s.checked_add(border.checked_mul(2)?))
        .and_then(|m| m.checked_mul(module_size))
        .ok_or_else(|| Error::EncodingFailure("image dimensions overflow".into()))?;
    let pixels = u64::from(side) * u64::from(side);
    if pixels > MAX_IMAGE_PIXELS {
        return Err(Error::EncodingFailure(format!(
            "{side}x{side} image exceeds the {MAX_IMAGE_PIXELS} pixel limit; use a smaller module size or border"
        )));
    }

    let border = i64::from(border);
    let module_size = i64::from(module_size);
    let mut img = GrayImage::new(side, side);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = i64::from(x) / module_size - border;
        let qr_y = i64::from(y) / module_size - border;
        *pixel = if qr.is_dark(qr_x, qr_y) { DARK } else { LIGHT };
    }
    Ok(img)
}

/// Encodes a greyscale image as PNG bytes.
pub fn png_bytes(img: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Returns a string of SVG code for an image depicting the given QR symbol,
/// with the given number of border modules.
///
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Example
///
/// ```rust
/// use qrcopy::encoder::QrSymbol;
/// use qrcopy::helper::to_svg_string;
/// use qrcopy::policy::ErrorCorrection;
///
/// let qr = QrSymbol::new("hello", ErrorCorrection::Low, None).unwrap();
/// let svg = to_svg_string(&qr, 4);
/// assert!(svg.contains("viewBox=\"0 0 29 29\""));
/// ```
pub fn to_svg_string(qr: &QrSymbol, border: u32) -> String {
    let size = qr.size() as i64;
    let border = i64::from(border);
    let dimension = size + border * 2;

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..size {
        for x in 0..size {
            if qr.is_dark(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Draws the symbol with block characters for a terminal preview.
///
/// Each module is two characters wide so the symbol keeps its square shape
/// in a typical monospace font.
pub fn to_terminal_string(qr: &QrSymbol, border: u32) -> String {
    let size = qr.size() as i64;
    let border = i64::from(border);
    let mut out = String::new();
    for y in -border..size + border {
        for x in -border..size + border {
            let c = if qr.is_dark(x, y) { '\u{2588}' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}
