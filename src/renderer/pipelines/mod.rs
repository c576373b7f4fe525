// src/renderer/pipelines/mod.rs
//! Rendering pipeline implementations.

pub mod base;
pub mod glow;
pub mod heart;
pub mod particles;
pub mod shadow;
