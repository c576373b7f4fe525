// src/lib.rs
//! Animated 3D heart viewer library.
//!
//! Builds an extruded, beveled heart solid, a spherical shell of particles
//! and a small light rig, and renders them with wgpu behind a mount gate
//! that shows a placeholder until the GPU scene is ready.

pub mod app;
pub mod camera;
pub mod config;
pub mod math;
pub mod mount;
pub mod renderer;
pub mod scene;
pub mod ui;
