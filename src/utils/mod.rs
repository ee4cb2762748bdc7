//! Utility modules shared across the configuration core.
//!
//! # Available Utilities
//!
//! - [`color`] - RGB color values, the swatch palette and derived hand colors

pub mod color;
