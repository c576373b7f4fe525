// src/scene/particles.rs
//! The particle shell surrounding the heart.
//!
//! Points are sampled with uniform spherical angles and a uniform radius,
//! which clusters them toward the inner radius. That density is part of the
//! look and is kept as-is rather than corrected to a uniform shell.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Fixed seed for reproducible fields; `None` samples from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            min_radius: 3.0,
            max_radius: 5.0,
            seed: None,
        }
    }
}

/// Write-once particle positions, stored flat as `[x0, y0, z0, x1, ...]`.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Box<[f32]>,
}

impl ParticleField {
    pub fn generate(config: &ParticleConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::generate_with(config, &mut rng)
    }

    pub fn generate_with<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Self {
        let span = config.max_radius - config.min_radius;
        let mut positions = Vec::with_capacity(config.count * 3);

        for _ in 0..config.count {
            let theta = rng.gen::<f32>() * TAU;
            let phi = rng.gen::<f32>() * PI;
            let radius = config.min_radius + rng.gen::<f32>() * span;

            let p = spherical_to_cartesian(radius, theta, phi);
            positions.extend_from_slice(&[p.x, p.y, p.z]);
        }

        Self { positions: positions.into_boxed_slice() }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The flat position buffer, ready for upload.
    pub fn as_flat(&self) -> &[f32] {
        &self.positions
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }
}

/// `theta` is the azimuth in the XY plane, `phi` the angle from +Z.
#[inline]
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * cos_theta,
        radius * sin_phi * sin_theta,
        radius * cos_phi,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> ParticleConfig {
        ParticleConfig { seed: Some(seed), ..Default::default() }
    }

    #[test]
    fn test_count_and_buffer_layout() {
        let field = ParticleField::generate(&seeded(7));
        assert_eq!(field.len(), 1000);
        assert_eq!(field.as_flat().len(), 3000);
    }

    #[test]
    fn test_radii_within_shell() {
        for seed in [1, 2, 3] {
            let field = ParticleField::generate(&seeded(seed));
            for p in field.points() {
                let r = p.length();
                assert!((3.0 - 1e-4..=5.0 + 1e-4).contains(&r), "radius {} out of shell", r);
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = ParticleField::generate(&seeded(42));
        let b = ParticleField::generate(&seeded(42));
        assert_eq!(a.as_flat(), b.as_flat());

        let c = ParticleField::generate(&seeded(43));
        assert_ne!(a.as_flat(), c.as_flat());
    }

    #[test]
    fn test_spherical_axes() {
        let up = spherical_to_cartesian(2.0, 0.0, 0.0);
        assert!((up - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);

        let x = spherical_to_cartesian(1.0, 0.0, PI / 2.0);
        assert!((x - Vec3::X).length() < 1e-6);

        let y = spherical_to_cartesian(1.0, PI / 2.0, PI / 2.0);
        assert!((y - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_density_favors_inner_radius() {
        // Uniform radius puts half the points in [3,4], whereas a uniform
        // shell would put only ~38% there.
        let field = ParticleField::generate(&ParticleConfig { count: 20_000, seed: Some(9), ..Default::default() });
        let inner = field.points().filter(|p| p.length() < 4.0).count() as f32 / field.len() as f32;
        assert!((inner - 0.5).abs() < 0.03, "inner fraction {}", inner);
    }
}
