use super::geometry::{circle, fibonacci_sphere, lat_lon_to_point, wire_sphere};
use super::{Camera, Clock, Frame, Rgba, Scene, SceneInputs, Transform};
use crate::motion::damp;
use glam::Vec3;
use std::f32::consts::TAU;

/// Chennai, 13.0827° N 80.2707° E.
pub const HOME_LAT: f32 = 13.0827;
pub const HOME_LON: f32 = 80.2707;

/// Small contact-section globe that idles in a slow spin and, while hovered,
/// swings home into view and zooms in.
pub struct MiniGlobe {
    rotation: Vec3,
    camera_z: f32,
    home: Vec3,
    target: Vec3,
    land: Vec<Vec3>,
    shell: Vec<Vec<Vec3>>,
    hovered: bool,
    time: f32,
}

impl MiniGlobe {
    pub const RADIUS: f32 = 2.0;
    pub const IDLE_SPIN: f32 = 0.2;
    pub const IDLE_DISTANCE: f32 = 6.5;
    pub const FOCUS_DISTANCE: f32 = 4.5;
    const START_DISTANCE: f32 = 7.5;
    const RATE: f32 = 2.0;

    pub fn new() -> Self {
        let home = lat_lon_to_point(HOME_LAT, HOME_LON, Self::RADIUS * 1.01);
        // Yaw that turns the home meridian toward +Z, then a tilt by the latitude.
        let yaw = (-home.x).atan2(home.z).rem_euclid(TAU);
        Self {
            rotation: Vec3::ZERO,
            camera_z: Self::START_DISTANCE,
            home,
            target: Vec3::new(HOME_LAT.to_radians(), yaw, 0.0),
            land: fibonacci_sphere(700, Self::RADIUS),
            shell: wire_sphere(Self::RADIUS, 7, 8, 48),
            hovered: false,
            time: 0.0,
        }
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_z
    }

    /// Rotation the globe settles on while hovered.
    pub fn focus_rotation(&self) -> Vec3 {
        self.target
    }

    /// Home marker in world space under the current rotation.
    pub fn home_position(&self) -> Vec3 {
        Transform::IDENTITY
            .rotated(self.rotation)
            .matrix()
            .transform_point3(self.home)
    }
}

impl Default for MiniGlobe {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MiniGlobe {
    fn name(&self) -> &'static str {
        "contact-globe"
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, self.camera_z), 45.0)
    }

    fn update(&mut self, clock: &Clock, inputs: &SceneInputs) {
        let delta = clock.delta;
        self.time = clock.elapsed;
        self.hovered = inputs.hovered;

        if inputs.hovered {
            self.rotation.x = damp(self.rotation.x, self.target.x, Self::RATE, delta);
            // Wrapping first keeps the swing home under one turn.
            let current = self.rotation.y.rem_euclid(TAU);
            self.rotation.y = damp(current, self.target.y, Self::RATE, delta);
            self.camera_z = damp(self.camera_z, Self::FOCUS_DISTANCE, Self::RATE, delta);
        } else {
            self.rotation.y += delta * Self::IDLE_SPIN;
            self.camera_z = damp(self.camera_z, Self::IDLE_DISTANCE, Self::RATE, delta);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let accent = Rgba::hex(0x3b82f6);

        // Atmosphere rim, always facing the camera.
        frame.polyline(&circle(Self::RADIUS * 1.025, 96), true, accent.alpha(0.35), 6.0);

        frame.with(&Transform::IDENTITY.rotated(self.rotation), |frame| {
            for ring in &self.shell {
                frame.polyline(ring, true, accent.alpha(0.25), 1.0);
            }
            for &dot in &self.land {
                frame.point(dot, 0.018, Rgba::hex(0x93c5fd).alpha(0.7));
            }
            let pulse = 0.5 + 0.5 * (self.time * 4.0).sin().abs();
            let marker = if self.hovered {
                Rgba::hex(0xf472b6)
            } else {
                Rgba::hex(0xf472b6).alpha(0.6)
            };
            frame.point(self.home, 0.05 + 0.04 * pulse, marker);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(globe: &mut MiniGlobe, clock: &mut Clock, hovered: bool, frames: usize) {
        let inputs = SceneInputs {
            hovered,
            ..SceneInputs::default()
        };
        for _ in 0..frames {
            clock.advance(1.0 / 60.0);
            globe.update(clock, &inputs);
        }
    }

    #[test]
    fn idles_with_a_slow_spin_and_settles_back() {
        let mut globe = MiniGlobe::new();
        let mut clock = Clock::default();
        step(&mut globe, &mut clock, false, 60);
        assert!((globe.rotation().y - 0.2).abs() < 1e-3);
        step(&mut globe, &mut clock, false, 600);
        assert!((globe.camera_distance() - MiniGlobe::IDLE_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn hover_brings_home_to_the_front() {
        let mut globe = MiniGlobe::new();
        let mut clock = Clock::default();
        step(&mut globe, &mut clock, false, 500);
        step(&mut globe, &mut clock, true, 600);

        let focus = globe.focus_rotation();
        assert!((globe.rotation().y - focus.y).abs() < 1e-3);
        assert!((globe.rotation().x - HOME_LAT.to_radians()).abs() < 1e-3);
        assert!((globe.camera_distance() - MiniGlobe::FOCUS_DISTANCE).abs() < 1e-3);

        let home = globe.home_position();
        assert!(home.x.abs() < 0.02, "{home:?}");
        assert!(home.y.abs() < 0.02, "{home:?}");
        assert!(home.z > 2.0);
    }

    #[test]
    fn hover_never_spins_more_than_a_turn() {
        let mut globe = MiniGlobe::new();
        let mut clock = Clock::default();
        step(&mut globe, &mut clock, false, 6000);
        step(&mut globe, &mut clock, true, 1);
        assert!(globe.rotation().y.abs() < TAU);
    }
}
