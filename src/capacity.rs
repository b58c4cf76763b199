//! QR symbol capacity and version selection.
//!
//! Capacities are derived from the QR Code Model 2 error correction tables,
//! so they can be checked against the published capacity tables without
//! rendering anything.

use crate::error::{Error, Result};
use crate::policy::ErrorCorrection;

/// Smallest QR version.
pub const MIN_VERSION: u8 = 1;
/// Largest QR version.
pub const MAX_VERSION: u8 = 40;

/// Number of error correction codewords in each block, indexed by
/// `[ErrorCorrection::ordinal()][version]`. Index 0 is unused.
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

/// Number of error correction blocks, same indexing as above.
static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Byte-mode segment header: 4 mode bits.
const BYTE_MODE_INDICATOR_BITS: usize = 4;

/// Returns an error unless `version` is in `1..=40`.
pub fn check_version(version: u8) -> Result<()> {
    if (MIN_VERSION..=MAX_VERSION).contains(&version) {
        Ok(())
    } else {
        Err(Error::InvalidVersion(version))
    }
}

/// Number of modules available for data and error correction once the
/// function patterns (finders, timing, alignment, format and version info)
/// are drawn. Includes remainder bits.
fn raw_data_modules(version: u8) -> usize {
    let ver = usize::from(version);
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Number of 8-bit data codewords (excluding error correction) a symbol
/// holds. `version` must already be in range.
fn data_codewords(version: u8, level: ErrorCorrection) -> usize {
    let v = usize::from(version);
    let row = level.ordinal();
    let ecc = usize::from(ECC_CODEWORDS_PER_BLOCK[row][v]) * usize::from(NUM_ERROR_CORRECTION_BLOCKS[row][v]);
    raw_data_modules(version) / 8 - ecc
}

/// Width of the byte-mode character count field.
fn byte_count_bits(version: u8) -> usize {
    if version <= 9 {
        8
    } else {
        16
    }
}

/// Maximum number of bytes a single byte-mode segment can carry.
///
/// # Example
///
/// ```rust
/// use qrcopy::capacity::byte_capacity;
/// use qrcopy::policy::ErrorCorrection;
///
/// assert_eq!(byte_capacity(1, ErrorCorrection::Low).unwrap(), 17);
/// assert_eq!(byte_capacity(40, ErrorCorrection::Low).unwrap(), 2953);
/// assert!(byte_capacity(41, ErrorCorrection::Low).is_err());
/// ```
///
/// # Errors
///
/// [`Error::InvalidVersion`] if `version` is outside `1..=40`.
pub fn byte_capacity(version: u8, level: ErrorCorrection) -> Result<usize> {
    check_version(version)?;
    Ok(capacity_of(version, level))
}

fn capacity_of(version: u8, level: ErrorCorrection) -> usize {
    let data_bits = data_codewords(version, level) * 8;
    (data_bits - BYTE_MODE_INDICATOR_BITS - byte_count_bits(version)) / 8
}

/// Largest payload, in bytes, that any version holds at `level`.
pub fn max_byte_capacity(level: ErrorCorrection) -> usize {
    capacity_of(MAX_VERSION, level)
}

/// Picks the smallest version whose byte-mode capacity holds `len` bytes.
///
/// Fails with [`Error::CapacityExceeded`] when not even version 40 is large
/// enough.
pub fn fit_version(len: usize, level: ErrorCorrection) -> Result<u8> {
    (MIN_VERSION..=MAX_VERSION)
        .find(|&v| capacity_of(v, level) >= len)
        .ok_or(Error::CapacityExceeded {
            len,
            capacity: max_byte_capacity(level),
            version: MAX_VERSION,
            level,
        })
}

/// Checks that `len` bytes fit in the given fixed `version`.
pub fn check_fits(len: usize, version: u8, level: ErrorCorrection) -> Result<()> {
    let capacity = byte_capacity(version, level)?;
    if len <= capacity {
        Ok(())
    } else {
        Err(Error::CapacityExceeded {
            len,
            capacity,
            version,
            level,
        })
    }
}
