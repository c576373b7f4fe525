// src/camera.rs
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use winit::event::{ElementState, MouseButton, WindowEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            fov_y_deg: 50.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            target: config.target,
            up: Vec3::Y,
            fov_y_rad: config.fov_y_deg.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection with wgpu's [0, 1] clip depth.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, aspect_ratio.max(1e-6), self.near, self.far)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub auto_rotate: bool,
    /// 1.0 = one turn per 60 s.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    /// Polar angle limits measured from +Y, radians.
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: false,
            enable_pan: false,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            rotate_speed: 1.0,
            min_polar: PI / 3.0,
            max_polar: PI / 1.5,
        }
    }
}

/// Orbits the camera around its target at a fixed distance.
///
/// The camera position is derived from user drag offsets plus an
/// auto-rotation that depends only on elapsed time, so frame drops never
/// make the orbit drift. Auto-rotation holds still while the left button is
/// down and resumes from the same angle on release.
pub struct OrbitController {
    config: OrbitConfig,
    target: Vec3,
    radius: f32,
    /// Azimuth about +Y, measured from +Z toward +X, before auto-rotation.
    azimuth: f32,
    /// Angle from +Y, always within the configured limits.
    polar: f32,
    mouse_down: bool,
    last_mouse: Option<(f64, f64)>,
    /// Seconds of scene time spent holding the orbit.
    held_total: f32,
    /// Scene time at which the current hold began.
    held_since: Option<f32>,
}

impl OrbitController {
    pub fn new(config: OrbitConfig, camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (azimuth, polar) = if radius > 1e-6 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let mut controller = Self {
            config,
            target: camera.target,
            radius,
            azimuth,
            polar,
            mouse_down: false,
            last_mouse: None,
            held_total: 0.0,
            held_since: None,
        };
        controller.polar = controller.clamp_polar(polar);
        controller
    }

    /// Feeds a window event; returns true when it changed the orbit.
    pub fn handle_event(&mut self, event: &WindowEvent, viewport_height: f32) -> bool {
        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                if *button == MouseButton::Left {
                    self.mouse_down = *state == ElementState::Pressed;
                }
                // Right/middle buttons would pan; panning is disabled.
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_orbit((position.x, position.y), viewport_height)
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_down = false;
                self.last_mouse = None;
                false
            }
            WindowEvent::MouseWheel { .. } => self.handle_scroll(),
            _ => false,
        }
    }

    fn handle_scroll(&mut self) -> bool {
        if !self.config.enable_zoom {
            return false;
        }
        log::debug!("zoom is enabled but the heart camera keeps a fixed distance");
        false
    }

    fn handle_cursor_orbit(&mut self, xy: (f64, f64), viewport_height: f32) -> bool {
        let mut moved = false;
        if let Some(last) = self.last_mouse {
            if self.mouse_down && self.config.enable_rotate {
                let h = viewport_height.max(1.0);
                let dx = (xy.0 - last.0) as f32;
                let dy = (xy.1 - last.1) as f32;
                let speed = TAU * self.config.rotate_speed / h;
                self.rotate(-dx * speed, -dy * speed);
                moved = true;
            }
        }
        self.last_mouse = Some(xy);
        moved
    }

    fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth = (self.azimuth + d_azimuth).rem_euclid(TAU);
        self.polar = self.clamp_polar(self.polar + d_polar);
    }

    fn clamp_polar(&self, polar: f32) -> f32 {
        const EPS: f32 = 1e-6;
        polar
            .clamp(self.config.min_polar, self.config.max_polar)
            .clamp(EPS, PI - EPS)
    }

    /// Starts or ends a hold of the auto-rotation clock at scene time `elapsed`.
    fn sync_hold(&mut self, elapsed: f32) {
        match (self.mouse_down, self.held_since) {
            (true, None) => self.held_since = Some(elapsed),
            (false, Some(start)) => {
                self.held_total += (elapsed - start).max(0.0);
                self.held_since = None;
            }
            _ => {}
        }
    }

    /// Scene time that counts toward auto-rotation.
    fn rotating_time(&self, elapsed: f32) -> f32 {
        let now = self.held_since.map_or(elapsed, |start| start.min(elapsed));
        (now - self.held_total).max(0.0)
    }

    /// Azimuth swept by auto-rotation after `elapsed` seconds.
    pub fn auto_rotation(&self, elapsed: f32) -> f32 {
        if self.config.auto_rotate {
            TAU / 60.0 * self.config.auto_rotate_speed * self.rotating_time(elapsed)
        } else {
            0.0
        }
    }

    pub fn azimuth_at(&self, elapsed: f32) -> f32 {
        self.azimuth - self.auto_rotation(elapsed)
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let theta = self.azimuth_at(elapsed);
        let (sin_phi, cos_phi) = self.polar.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Places `camera` on the orbit for the given time.
    pub fn apply(&mut self, camera: &mut Camera, elapsed: f32) {
        self.sync_hold(elapsed);
        camera.target = self.target;
        camera.position = self.position_at(elapsed);
        camera.up = Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        let camera = Camera::from_config(&CameraConfig::default());
        OrbitController::new(OrbitConfig::default(), &camera)
    }

    #[test]
    fn test_initial_pose_matches_camera() {
        let orbit = controller();
        assert!((orbit.position_at(0.0) - Vec3::new(0.0, 0.0, 8.0)).length() < 1e-5);
        assert!((orbit.polar() - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotation_is_time_driven() {
        let orbit = controller();
        // speed 0.5 -> one turn every 120 s
        assert!((orbit.auto_rotation(120.0) - TAU).abs() < 1e-4);
        assert!((orbit.position_at(120.0) - orbit.position_at(0.0)).length() < 1e-3);
        assert_eq!(orbit.position_at(7.5), orbit.position_at(7.5));

        // Quarter turn moves the camera from +Z to -X (azimuth decreasing).
        let p = orbit.position_at(30.0);
        assert!((p - Vec3::new(-8.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_distance_is_fixed() {
        let mut orbit = controller();
        orbit.rotate(1.0, 0.4);
        for t in [0.0, 3.3, 47.0] {
            assert!((orbit.position_at(t).length() - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_polar_is_clamped() {
        let mut orbit = controller();
        orbit.rotate(0.0, -10.0);
        assert!((orbit.polar() - PI / 3.0).abs() < 1e-6);
        orbit.rotate(0.0, 10.0);
        assert!((orbit.polar() - PI / 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_drag_requires_button() {
        let mut orbit = controller();
        assert!(!orbit.handle_cursor_orbit((10.0, 10.0), 720.0));
        assert!(!orbit.handle_cursor_orbit((50.0, 10.0), 720.0));
        assert_eq!(orbit.azimuth_at(0.0), 0.0);

        orbit.mouse_down = true;
        assert!(orbit.handle_cursor_orbit((410.0, 10.0), 720.0));
        // 360 px of a 720 px viewport = half a turn
        assert!((orbit.azimuth_at(0.0) - PI).abs() < 1e-4);
    }

    #[test]
    fn test_auto_rotation_pauses_while_dragging() {
        let mut orbit = controller();
        let mut camera = Camera::from_config(&CameraConfig::default());
        let per_second = TAU / 60.0 * 0.5;

        orbit.apply(&mut camera, 10.0);
        orbit.mouse_down = true;
        orbit.apply(&mut camera, 10.0);
        let held = camera.position;

        // No drag movement: the camera stays put however long the button is held.
        orbit.apply(&mut camera, 25.0);
        assert!((camera.position - held).length() < 1e-4);
        assert!((orbit.auto_rotation(25.0) - 10.0 * per_second).abs() < 1e-4);

        // Release resumes from the held angle.
        orbit.mouse_down = false;
        orbit.apply(&mut camera, 25.0);
        assert!((camera.position - held).length() < 1e-4);
        assert!((orbit.auto_rotation(30.0) - 15.0 * per_second).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_disabled() {
        let mut orbit = controller();
        let before = orbit.position_at(0.0);
        assert!(!orbit.handle_scroll());
        assert_eq!(orbit.position_at(0.0), before);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::from_config(&CameraConfig::default());
        let vp = camera.projection_matrix(16.0 / 9.0) * camera.view_matrix();
        let clip = vp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let z = clip.z / clip.w;
        assert!(z > 0.0 && z < 1.0);
    }
}
