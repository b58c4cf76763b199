//! Encoding policy: error correction level, symbol version, module size and border.

use core::fmt;
use core::str::FromStr;

use qrcode::EcLevel;

/// Error correction level for a QR code.
///
/// Higher levels survive more damage but leave less room for data.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub enum ErrorCorrection {
    /// Tolerates ~7% erroneous codewords.
    #[default]
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ];

    /// Row index into the error correction tables (0 to 3).
    pub(crate) fn ordinal(self) -> usize {
        use ErrorCorrection::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    pub(crate) fn ec_level(self) -> EcLevel {
        use ErrorCorrection::*;
        match self {
            Low => EcLevel::L,
            Medium => EcLevel::M,
            Quartile => EcLevel::Q,
            High => EcLevel::H,
        }
    }

    pub(crate) fn from_ec_level(level: EcLevel) -> Self {
        match level {
            EcLevel::L => ErrorCorrection::Low,
            EcLevel::M => ErrorCorrection::Medium,
            EcLevel::Q => ErrorCorrection::Quartile,
            EcLevel::H => ErrorCorrection::High,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCorrection::Low => "low",
            ErrorCorrection::Medium => "medium",
            ErrorCorrection::Quartile => "quartile",
            ErrorCorrection::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrection::Low),
            "m" | "medium" => Ok(ErrorCorrection::Medium),
            "q" | "quartile" => Ok(ErrorCorrection::Quartile),
            "h" | "high" => Ok(ErrorCorrection::High),
            other => Err(format!(
                "unknown error correction level `{other}` (expected low, medium, quartile or high)"
            )),
        }
    }
}

/// How a payload is turned into an image.
///
/// The default favours capacity: `Low` error correction, auto-fit version,
/// 10 pixels per module and the standard 4-module quiet zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingPolicy {
    pub ec_level: ErrorCorrection,
    /// `None` picks the smallest version that fits.
    pub version: Option<u8>,
    /// Pixels per module.
    pub module_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
}

impl EncodingPolicy {
    pub const DEFAULT_MODULE_SIZE: u32 = 10;
    pub const DEFAULT_BORDER: u32 = 4;

    pub fn with_ec_level(mut self, ec_level: ErrorCorrection) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size;
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        Self {
            ec_level: ErrorCorrection::Low,
            version: None,
            module_size: Self::DEFAULT_MODULE_SIZE,
            border: Self::DEFAULT_BORDER,
        }
    }
}
