use super::geometry::box_edges;
use super::{Camera, Clock, Frame, Rgba, Scene, SceneInputs, Transform};
use crate::motion::FloatMotion;
use crate::scroll::{laptop_pose, LaptopPose};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub body: Rgba,
    pub deck: Rgba,
    pub keys: Rgba,
    pub screen: Rgba,
}

impl Palette {
    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                body: Rgba::hex(0xa3a3a3),
                deck: Rgba::hex(0x525252),
                keys: Rgba::hex(0x737373),
                screen: Rgba::hex(0x4a9eff),
            }
        } else {
            Self {
                body: Rgba::hex(0x404040),
                deck: Rgba::hex(0x8a8a8a),
                keys: Rgba::hex(0x1a1a1a),
                screen: Rgba::hex(0x2563eb),
            }
        }
    }
}

/// The scroll-driven laptop behind the hero headline.
pub struct LaptopScene {
    float: FloatMotion,
    pose: LaptopPose,
    palette: Palette,
    time: f32,
}

impl LaptopScene {
    pub const SCALE: f32 = 1.45;
    pub const KEY_ROWS: usize = 6;
    pub const KEY_COLUMNS: usize = 14;

    pub fn new() -> Self {
        Self {
            float: FloatMotion::new(1.0, 0.1, 0.2),
            pose: laptop_pose(0.0, 0.0),
            palette: Palette::for_theme(true),
            time: 0.0,
        }
    }

    pub fn pose(&self) -> LaptopPose {
        self.pose
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Flat square on the XZ plane at height `y`.
    fn pad(center: Vec3, width: f32, depth: f32) -> [Vec3; 4] {
        let (w, d) = (width / 2.0, depth / 2.0);
        [
            center + Vec3::new(-w, 0.0, -d),
            center + Vec3::new(w, 0.0, -d),
            center + Vec3::new(w, 0.0, d),
            center + Vec3::new(-w, 0.0, d),
        ]
    }

    fn draw_base(&self, frame: &mut Frame) {
        frame.with(&Transform::at(Vec3::new(0.0, -0.05, 0.0)), |frame| {
            frame.segments(&box_edges(Vec3::new(2.4, 0.08, 1.6)), self.palette.body, 1.5);
        });
        frame.polyline(
            &Self::pad(Vec3::new(0.0, 0.01, 0.1), 2.2, 1.2),
            true,
            self.palette.deck,
            1.0,
        );
        for row in 0..Self::KEY_ROWS {
            for col in 0..Self::KEY_COLUMNS {
                let center = Vec3::new(-1.0 + col as f32 * 0.155, 0.02, -0.35 + row as f32 * 0.17);
                frame.polyline(&Self::pad(center, 0.13, 0.13), true, self.palette.keys, 1.0);
            }
        }
        frame.polyline(
            &Self::pad(Vec3::new(0.0, 0.02, 0.55), 0.9, 0.55),
            true,
            self.palette.deck,
            1.0,
        );
        frame.line(
            Vec3::new(-1.0, 0.05, -0.8),
            Vec3::new(1.0, 0.05, -0.8),
            Rgba::hex(0x111111),
            4.0,
        );
    }

    fn draw_lid(&self, frame: &mut Frame) {
        let hinge = Transform::at(Vec3::new(0.0, 0.05, -0.8)).rotated(Vec3::new(-0.3, 0.0, 0.0));
        frame.with(&hinge, |frame| {
            frame.with(&Transform::at(Vec3::new(0.0, 0.6, -0.02)), |frame| {
                frame.segments(&box_edges(Vec3::new(2.4, 1.4, 0.04)), self.palette.body, 1.5);
            });
            frame.with(&Transform::at(Vec3::new(0.0, 0.6, 0.01)), |frame| {
                frame.polyline(
                    &super::geometry::rect(2.35, 1.35),
                    true,
                    Rgba::hex(0x050505).alpha(0.8),
                    1.0,
                );
            });

            // Scrolling code on the display.
            let lines = 9;
            for i in 0..lines {
                let phase = (self.time * 0.6 + i as f32 * 0.37).fract();
                let y = 0.6 + 0.5 - (i as f32 / (lines - 1) as f32) * 1.0;
                let indent = if i % 3 == 1 { 0.15 } else { 0.0 };
                let length = 0.4 + 0.9 * ((i * 7 % 5) as f32 / 4.0);
                let start = -1.0 + indent;
                frame.line(
                    Vec3::new(start, y, 0.016),
                    Vec3::new(start + length, y, 0.016),
                    self.palette.screen.alpha(0.35 + 0.45 * phase),
                    2.0,
                );
            }
        });
    }
}

impl Default for LaptopScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LaptopScene {
    fn name(&self) -> &'static str {
        "hero-laptop"
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.2, 9.0), 30.0).looking_at(Vec3::new(0.0, 0.2, 0.0))
    }

    fn update(&mut self, clock: &Clock, inputs: &SceneInputs) {
        self.time = clock.elapsed;
        self.pose = laptop_pose(inputs.scroll_progress, clock.elapsed);
        self.palette = Palette::for_theme(inputs.dark);
    }

    fn draw(&self, frame: &mut Frame) {
        let body = Transform::at(self.pose.position)
            .rotated(self.pose.rotation)
            .scaled(Self::SCALE);
        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.with(&body, |frame| {
                self.draw_base(frame);
                self.draw_lid(frame);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_tracks_scroll_progress() {
        let mut scene = LaptopScene::new();
        let inputs = SceneInputs {
            scroll_progress: 0.5,
            ..SceneInputs::default()
        };
        scene.update(&Clock::default(), &inputs);
        assert!((scene.pose().rotation.y - 1.0).abs() < 1e-6);
        assert!((scene.pose().rotation.x - 0.15).abs() < 1e-6);
    }

    #[test]
    fn palette_follows_theme() {
        let mut scene = LaptopScene::new();
        assert_eq!(scene.palette(), Palette::for_theme(true));
        let light = SceneInputs {
            dark: false,
            ..SceneInputs::default()
        };
        scene.update(&Clock::default(), &light);
        assert_eq!(scene.palette(), Palette::for_theme(false));
    }

    #[test]
    fn keyboard_has_every_key() {
        let scene = LaptopScene::new();
        let mut frame = Frame::new();
        scene.draw_base(&mut frame);
        // 12 base edges, deck, keys, trackpad and hinge.
        let keys = LaptopScene::KEY_ROWS * LaptopScene::KEY_COLUMNS;
        assert_eq!(frame.len(), 12 + 4 + keys * 4 + 4 + 1);
    }
}
