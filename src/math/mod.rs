// src/math/mod.rs
//! Mathematical utilities for the heart scene.
//!
//! This module provides reusable mathematical components including:
//! - Cubic Bézier evaluation and polygon orientation
//! - Ear-clipping triangulation
//! - sRGB color conversion

pub mod bezier;
pub mod color;
pub mod triangulate;

pub use self::bezier::{signed_area, CubicSegment};
pub use self::color::Rgb;
pub use self::triangulate::ear_clip;
