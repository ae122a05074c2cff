use super::geometry::{box_edges, circle, random_in_cube, rect};
use super::loaders::Starfield;
use super::{Camera, Clock, Frame, Rgba, Scene, SceneInputs, Transform};
use crate::motion::FloatMotion;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

const SKY: Rgba = Rgba::hex(0x0ea5e9);
const BLUE: Rgba = Rgba::hex(0x3b82f6);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sparkle {
    base: Vec3,
    phase: f32,
}

/// Maintenance backdrop: a glowing server rack inside slowly turning data
/// rings.
pub struct ServerRackScene {
    stars: Starfield,
    sparkles: Vec<Sparkle>,
    float: FloatMotion,
    stream_angle: f32,
    time: f32,
}

impl ServerRackScene {
    pub const BLADES: usize = 8;
    pub const SPARKLES: usize = 200;
    const SPARKLE_EXTENT: f32 = 4.0;
    const SPARKLE_SPEED: f32 = 0.4;

    pub fn new(rng: &mut impl Rng) -> Self {
        let sparkles = (0..Self::SPARKLES)
            .map(|_| Sparkle {
                base: random_in_cube(rng, Self::SPARKLE_EXTENT),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self {
            stars: Starfield::new(rng, 600, 100.0, 150.0),
            sparkles,
            float: FloatMotion::new(2.0, 0.1, 0.2),
            stream_angle: 0.0,
            time: 0.0,
        }
    }

    pub fn stream_angle(&self) -> f32 {
        self.stream_angle
    }

    /// Sideways sway of the whole set, and its small yaw.
    pub fn sway(&self) -> (f32, f32) {
        (
            (self.time * 0.2).sin() * 0.5,
            (self.time * 0.1).sin() * 0.05,
        )
    }

    fn sparkle_position(&self, sparkle: &Sparkle) -> Vec3 {
        let span = Self::SPARKLE_EXTENT * 2.0;
        let rise = (sparkle.base.y + Self::SPARKLE_EXTENT + self.time * Self::SPARKLE_SPEED)
            .rem_euclid(span);
        Vec3::new(sparkle.base.x, rise - Self::SPARKLE_EXTENT, sparkle.base.z)
    }

    fn draw_unit(frame: &mut Frame) {
        frame.segments(&box_edges(Vec3::new(2.0, 4.0, 2.0)), Rgba::hex(0x1e293b), 1.0);
        frame.segments(&box_edges(Vec3::new(2.05, 4.05, 2.05)), SKY, 1.5);
        for i in 0..Self::BLADES {
            let color = if i % 2 == 0 { SKY } else { BLUE };
            let blade = Transform::at(Vec3::new(0.0, -1.5 + i as f32 * 0.45, 1.01));
            frame.with(&blade, |frame| {
                frame.polyline(&rect(1.6, 0.2), true, color, 2.0);
            });
        }
        let vent = Transform::at(Vec3::new(1.01, 0.0, 0.0)).rotated(Vec3::new(0.0, FRAC_PI_2, 0.0));
        frame.with(&vent, |frame| {
            frame.polyline(&rect(1.5, 3.5), true, Rgba::hex(0x334155), 1.0);
        });
    }
}

impl Scene for ServerRackScene {
    fn name(&self) -> &'static str {
        "server-rack"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x000000))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 1.0, 8.0), 50.0).looking_at(Vec3::new(0.0, 0.5, 0.0))
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
        self.stream_angle += clock.delta * 0.2;
    }

    fn draw(&self, frame: &mut Frame) {
        self.stars.draw(frame, self.time, 0.25);

        let (x, yaw) = self.sway();
        let set = Transform::at(Vec3::new(x, 0.0, 0.0)).rotated(Vec3::new(0.0, yaw, 0.0));
        frame.with(&set, |frame| {
            frame.with(&Transform::floating(&self.float, self.time), Self::draw_unit);

            let stream = Transform::IDENTITY.rotated(Vec3::new(0.0, self.stream_angle, 0.0));
            frame.with(&stream, |frame| {
                let flat = Transform::IDENTITY.rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0));
                frame.with(&flat, |frame| {
                    frame.polyline(&circle(3.0, 100), true, SKY.alpha(0.3), 1.5);
                    frame.polyline(&circle(4.5, 100), true, BLUE.alpha(0.2), 1.0);
                });
                for sparkle in &self.sparkles {
                    let glow = 0.25 + 0.25 * (self.time * 2.0 + sparkle.phase).sin();
                    frame.point(
                        self.sparkle_position(sparkle),
                        0.03,
                        Rgba::hex(0x22d3ee).alpha(glow.max(0.05)),
                    );
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn sparkles_rise_and_wrap_inside_the_box() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut scene = ServerRackScene::new(&mut rng);
        for seconds in [0.0, 3.3, 19.7, 250.0] {
            scene.time = seconds;
            for sparkle in &scene.sparkles {
                let at = scene.sparkle_position(sparkle);
                assert!((-4.0..=4.0).contains(&at.y), "{at:?}");
            }
        }
    }

    #[test]
    fn data_stream_turns_with_frame_time() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut scene = ServerRackScene::new(&mut rng);
        let mut clock = Clock::default();
        for _ in 0..120 {
            clock.advance(1.0 / 60.0);
            scene.update(&clock, &SceneInputs::default());
        }
        assert!((scene.stream_angle() - 0.4).abs() < 1e-3);
        let (x, yaw) = scene.sway();
        assert!(x.abs() <= 0.5 && yaw.abs() <= 0.05);
    }
}
