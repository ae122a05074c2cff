//! Wireframe 3D scenes: world-space draw lists, a camera, and the [`Scene`]
//! trait every animated canvas drives once per frame.

pub mod geometry;
pub mod globe;
pub mod hero;
pub mod loaders;
mod projector;
pub mod rack;

pub use projector::{project, DrawCommand, Viewport};

use crate::loader::LoaderVariant;
use crate::motion::FloatMotion;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::{rngs::SmallRng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::hex(0xffffff);

    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiplies the current alpha by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn scaled_by(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The bob and sway of `motion` at `time`, as a wrapper transform.
    pub fn floating(motion: &FloatMotion, time: f32) -> Self {
        Self::at(Vec3::Y * motion.offset_y(time)).rotated(motion.rotation(time))
    }

    /// Translation * rotation (XYZ Euler) * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, fov_deg: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_deg,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Camera circling `target` at `radius`, `height` above it; `angle` is
    /// measured from +z toward +x.
    pub fn orbit(target: Vec3, radius: f32, height: f32, angle: f32, fov_deg: f32) -> Self {
        let offset = Vec3::new(angle.sin() * radius, height, angle.cos() * radius);
        Self::new(target + offset, fov_deg).looking_at(target)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// World-space width visible at the target plane.
    pub fn visible_width(&self, aspect: f32) -> f32 {
        let distance = (self.position - self.target).length();
        2.0 * distance * (self.fov_deg.to_radians() / 2.0).tan() * aspect
    }
}

/// Scene time. Deltas are clamped so a backgrounded tab does not teleport
/// every animation when it resumes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    pub elapsed: f32,
    pub delta: f32,
}

impl Clock {
    pub const MAX_DELTA: f32 = 0.1;

    pub fn advance(&mut self, delta: f32) {
        self.delta = delta.clamp(0.0, Self::MAX_DELTA);
        self.elapsed += self.delta;
    }

    /// This frame's length in 60 fps frames, for per-frame constants.
    pub fn frames(&self) -> f32 {
        self.delta * 60.0
    }
}

/// Page state a scene may react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneInputs {
    pub aspect: f32,
    pub scroll_progress: f32,
    pub hovered: bool,
    pub dark: bool,
}

impl Default for SceneInputs {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            scroll_progress: 0.0,
            hovered: false,
            dark: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// `width` is in screen pixels.
    Line { from: Vec3, to: Vec3, width: f32 },
    Point { at: Vec3, radius: f32 },
    Text { at: Vec3, text: String, size: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub color: Rgba,
}

/// World-space draw list with a transform stack.
#[derive(Debug, Default)]
pub struct Frame {
    items: Vec<Primitive>,
    stack: Vec<Mat4>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.stack.clear();
    }

    pub fn items(&self) -> &[Primitive] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn push(&mut self, transform: &Transform) {
        let matrix = self.current() * transform.matrix();
        self.stack.push(matrix);
    }

    pub fn push_matrix(&mut self, matrix: Mat4) {
        let combined = self.current() * matrix;
        self.stack.push(combined);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn with(&mut self, transform: &Transform, draw: impl FnOnce(&mut Self)) {
        self.push(transform);
        draw(self);
        self.pop();
    }

    fn to_world(&self, point: Vec3) -> Vec3 {
        self.current().transform_point3(point)
    }

    fn uniform_scale(&self) -> f32 {
        self.current().determinant().abs().cbrt()
    }

    pub fn line(&mut self, from: Vec3, to: Vec3, color: Rgba, width: f32) {
        if color.a <= 0.0 {
            return;
        }
        let shape = Shape::Line {
            from: self.to_world(from),
            to: self.to_world(to),
            width,
        };
        self.items.push(Primitive { shape, color });
    }

    pub fn segments(&mut self, segments: &[(Vec3, Vec3)], color: Rgba, width: f32) {
        for (from, to) in segments {
            self.line(*from, *to, color, width);
        }
    }

    pub fn polyline(&mut self, points: &[Vec3], closed: bool, color: Rgba, width: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, width);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], color, width);
        }
    }

    pub fn point(&mut self, at: Vec3, radius: f32, color: Rgba) {
        let radius = radius * self.uniform_scale();
        if color.a <= 0.0 || radius <= 0.0 {
            return;
        }
        let shape = Shape::Point {
            at: self.to_world(at),
            radius,
        };
        self.items.push(Primitive { shape, color });
    }

    pub fn text(&mut self, at: Vec3, text: impl Into<String>, size: f32, color: Rgba) {
        let size = size * self.uniform_scale();
        if color.a <= 0.0 || size <= 0.0 {
            return;
        }
        let shape = Shape::Text {
            at: self.to_world(at),
            text: text.into(),
            size,
        };
        self.items.push(Primitive { shape, color });
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    /// Clear colour; `None` leaves the canvas transparent.
    fn background(&self) -> Option<Rgba> {
        None
    }

    fn camera(&self) -> Camera;

    fn update(&mut self, clock: &Clock, inputs: &SceneInputs);

    fn draw(&self, frame: &mut Frame);
}

/// Every scene the site mounts on a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Intro(LoaderVariant),
    HeroLaptop,
    ContactGlobe,
    ServerRack,
}

impl SceneKind {
    /// Builds the scene; `seed` drives any randomised layout.
    pub fn build(self, seed: u64) -> Box<dyn Scene> {
        let mut rng = SmallRng::seed_from_u64(seed);
        match self {
            Self::Intro(variant) => loaders::build(variant, &mut rng),
            Self::HeroLaptop => Box::new(hero::LaptopScene::new()),
            Self::ContactGlobe => Box::new(globe::MiniGlobe::new()),
            Self::ServerRack => Box::new(rack::ServerRackScene::new(&mut rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_unpack() {
        let colour = Rgba::hex(0x3b82f6);
        assert_eq!((colour.r, colour.g, colour.b), (0x3b, 0x82, 0xf6));
        assert_eq!(colour.alpha(0.5).css(), "rgba(59, 130, 246, 0.500)");
        assert_eq!(colour.alpha(0.5).fade(0.5).a, 0.25);
    }

    #[test]
    fn orbit_starts_on_the_z_axis_and_faces_the_target() {
        let target = Vec3::new(1.0, 0.0, 0.0);
        let camera = Camera::orbit(target, 10.0, 2.0, 0.0, 45.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 10.0));
        assert_eq!(camera.target, target);

        let quarter = Camera::orbit(Vec3::ZERO, 10.0, 0.0, std::f32::consts::FRAC_PI_2, 45.0);
        assert!((quarter.position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn frame_applies_nested_transforms() {
        let mut frame = Frame::new();
        frame.with(&Transform::at(Vec3::new(1.0, 0.0, 0.0)), |frame| {
            frame.with(&Transform::IDENTITY.scaled(2.0), |frame| {
                frame.point(Vec3::new(1.0, 0.0, 0.0), 0.5, Rgba::WHITE);
            });
        });
        frame.point(Vec3::ZERO, 0.5, Rgba::WHITE);

        match &frame.items()[0].shape {
            Shape::Point { at, radius } => {
                assert!((*at - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
                assert!((radius - 1.0).abs() < 1e-5);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        match &frame.items()[1].shape {
            Shape::Point { at, .. } => assert_eq!(*at, Vec3::ZERO),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn zero_scale_and_invisible_items_are_dropped() {
        let mut frame = Frame::new();
        frame.with(&Transform::IDENTITY.scaled(0.0), |frame| {
            frame.point(Vec3::ZERO, 1.0, Rgba::WHITE);
        });
        frame.line(Vec3::ZERO, Vec3::X, Rgba::WHITE.alpha(0.0), 1.0);
        assert!(frame.is_empty());
    }

    #[test]
    fn clock_clamps_long_frames() {
        let mut clock = Clock::default();
        clock.advance(1.0 / 60.0);
        clock.advance(3.0);
        assert_eq!(clock.delta, Clock::MAX_DELTA);
        assert!((clock.elapsed - (1.0 / 60.0 + Clock::MAX_DELTA)).abs() < 1e-6);
        assert!((clock.frames() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn every_scene_kind_draws_something() {
        let mut kinds = vec![
            SceneKind::HeroLaptop,
            SceneKind::ContactGlobe,
            SceneKind::ServerRack,
        ];
        kinds.extend(LoaderVariant::ALL.map(SceneKind::Intro));

        for kind in kinds {
            let mut scene = kind.build(7);
            let mut clock = Clock::default();
            let inputs = SceneInputs::default();
            for _ in 0..90 {
                clock.advance(1.0 / 30.0);
                scene.update(&clock, &inputs);
            }
            let mut frame = Frame::new();
            scene.draw(&mut frame);
            assert!(!frame.is_empty(), "{kind:?} drew nothing");

            let commands = project(&frame, &scene.camera(), Viewport::new(1280.0, 720.0));
            assert!(!commands.is_empty(), "{kind:?} projected nothing");
        }
    }
}
