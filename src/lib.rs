//! # colorcard
//!
//! Colorimetry engine for photo analysis.
//!
//! Turns raw sRGB samples into the readouts a photographer's color tool shows:
//! color descriptors, display luminance and Zone System classification, sampled
//! luminance/RGB/hue histograms, WCAG 2.1 contrast checks, and simulation of color
//! vision deficiencies. Image decoding is left to the caller; anything implementing
//! [`image::ImageAccessor`] can be analysed.
//!
//! ## Features
//!
//! - **Pure functions**: conversions, histograms, contrast and CVD simulation hold no
//!   shared state and are safe to call from any thread
//! - **Edge-aware sampling**: strided histograms also visit the last row and column
//! - **Explicit context**: caches and configuration live in an [`AnalysisContext`]
//!   passed by the caller
//! - **SIMD reductions**: framebuffer statistics via [trueno](https://crates.io/crates/trueno)
//!
//! ## Quick Start
//!
//! ```
//! use colorcard::prelude::*;
//!
//! let ratio = contrast_ratio(Rgb::WHITE, Rgb::BLACK);
//! assert_eq!(ratio, 21.0);
//! assert_eq!(wcag_level(ratio, false), WcagLevel::Aaa);
//!
//! let mut fb = Framebuffer::new(10, 10).unwrap();
//! fb.clear(Rgba::BLACK);
//! let hist = calculate_histogram(&fb, 4);
//! assert_eq!(hist.count(0), 16);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel trueno reductions
//!
//! ## References
//!
//! - Adams, A. (1948). *The Negative*. The Zone System.
//! - W3C (2018). *Web Content Accessibility Guidelines (WCAG) 2.1*, relative luminance
//!   and contrast ratio.
//! - Lam, K. M. (1985). Metamerism and colour constancy. The Bradford transform.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Opt-in debug logging.
#[macro_use]
pub mod debug;

/// Color types and color space conversions.
pub mod color;

/// Image access trait and sampling grids.
pub mod image;

/// RGBA pixel buffer.
pub mod framebuffer;

// ============================================================================
// Analysis Modules
// ============================================================================

/// Zone classification of display luminance.
pub mod zone;

/// Luminance, RGB and hue histograms.
pub mod histogram;

/// WCAG 2.1 contrast evaluation.
pub mod contrast;

/// Color vision deficiency simulation.
pub mod cvd;

/// Zone highlight overlays.
pub mod overlay;

// ============================================================================
// Output, Caching and Configuration
// ============================================================================

/// Output encoders (PNG).
pub mod output;

/// Image and histogram caches.
pub mod cache;

/// YAML configuration.
pub mod config;

/// Configuration and caches for an analysis session.
pub mod context;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for colorcard operations.
pub mod error;

pub use context::AnalysisContext;
pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```
/// use colorcard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{
        display_luminance, hex_to_rgb, rgb_to_hex, rgb_to_hsb, rgb_to_lab, ColorInfo, Rgb, Rgba,
    };
    pub use crate::config::Config;
    pub use crate::context::AnalysisContext;
    pub use crate::contrast::{contrast_info, contrast_ratio, wcag_level, ContrastInfo, WcagLevel};
    pub use crate::cvd::{simulate_colorblind, CvdType};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::histogram::{calculate_histogram, LuminanceHistogram};
    pub use crate::image::ImageAccessor;
    pub use crate::zone::{zone_bounds, zone_label, Zone};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
