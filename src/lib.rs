//! # qrcopy
//!
//! Turn a piece of text into a QR code that someone can scan to get the text
//! onto their phone's clipboard.
//!
//! `qrcopy` builds two artifacts from the text: a self-contained HTML "copy
//! page" with a one-tap copy button, and a QR code. What the QR code carries
//! depends on the [`DeliveryMode`]:
//!
//! - [`DeliveryMode::DirectEmbed`]: the text itself.
//! - [`DeliveryMode::DataUrlEmbed`]: the whole copy page as a `data:` URL.
//! - [`DeliveryMode::ExternalUrl`]: the URL of a copy page you published
//!   yourself (see [`hosting`] for GitHub Pages URLs).
//!
//! ## Features
//!
//! - Smallest-version auto-fit or a fixed version, checked against the QR
//!   capacity tables.
//! - Four error correction levels; `Low` by default to leave the most room
//!   for data URLs.
//! - PNG, SVG and terminal rendering with configurable module size and
//!   quiet zone.
//! - Deterministic output: the same input always gives the same bytes.
//!
//! ## Example
//!
//! ```rust
//! use qrcopy::{DeliveryMode, EncodingPolicy, Submission};
//!
//! let submission = Submission::new("Hello, World!");
//! let html = submission.copy_page();
//! assert!(html.contains("Hello, World!"));
//!
//! let out = submission
//!     .qr(&DeliveryMode::DirectEmbed, &EncodingPolicy::default())
//!     .unwrap();
//! assert_eq!(out.payload, "Hello, World!");
//! let png: Vec<u8> = out.image.to_png().unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`resolver`]: what string goes into the QR code.
//! - [`encoder`]: QR symbol creation and rasterisation.
//! - [`capacity`]: capacity tables and version selection.
//! - [`copy_page`]: the HTML copy page.
//! - [`helper`]: PNG, SVG and terminal rendering.

#![forbid(unsafe_code)]

pub mod capacity;
pub mod copy_page;
pub mod encoder;
pub mod error;
pub mod helper;
pub mod hosting;
pub mod policy;
pub mod resolver;
pub mod submission;

pub use encoder::{encode, QrSymbol, RasterImage};
pub use error::{Error, Result};
pub use policy::{EncodingPolicy, ErrorCorrection};
pub use resolver::{resolve, DeliveryMode};
pub use submission::{QrOutput, Submission};
