//! The full-screen intro scenes, one per [`LoaderVariant`].

use super::geometry::{
    arc, box_edges, circle, fibonacci_sphere, grid, prism_edges, random_in_cube, random_on_shell,
    rect, wire_sphere,
};
use super::{Camera, Clock, Frame, Rgba, Scene, SceneInputs, Transform};
use crate::loader::{LoaderVariant, Typewriter};
use crate::motion::{ease_out_cubic, FloatMotion};
use glam::{Mat4, Quat, Vec3};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI, TAU};

const BLUE: Rgba = Rgba::hex(0x3b82f6);
const SKY: Rgba = Rgba::hex(0x60a5fa);
const CYAN: Rgba = Rgba::hex(0x06b6d4);
const PURPLE: Rgba = Rgba::hex(0xa855f7);
const NIGHT: Rgba = Rgba::hex(0x020617);

pub fn build(variant: LoaderVariant, rng: &mut SmallRng) -> Box<dyn Scene> {
    match variant {
        LoaderVariant::Terminal => Box::new(TerminalScene::new()),
        LoaderVariant::Cloud => Box::new(CloudScene::new(rng)),
        LoaderVariant::Constellation => Box::new(ConstellationScene::new(rng)),
        LoaderVariant::Assembler => Box::new(AssemblerScene::new(rng)),
        LoaderVariant::Globe => Box::new(GlobeScene::new(rng)),
        LoaderVariant::Architect => Box::new(ArchitectScene::new(rng)),
        LoaderVariant::Kubernetes => Box::new(KubernetesScene::new()),
        LoaderVariant::Pipeline => Box::new(PipelineScene::new()),
        LoaderVariant::Truck => Box::new(TruckScene::new(rng)),
    }
}

/// Distant points on a spherical shell, slowly turning.
#[derive(Clone, Debug)]
pub struct Starfield {
    points: Vec<Vec3>,
    spin: f32,
    color: Rgba,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng, count: usize, inner: f32, outer: f32) -> Self {
        Self {
            points: (0..count)
                .map(|_| random_on_shell(rng, inner, outer))
                .collect(),
            spin: 0.01,
            color: Rgba::WHITE.alpha(0.8),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn draw(&self, frame: &mut Frame, time: f32, radius: f32) {
        let turn = Transform::IDENTITY.rotated(Vec3::new(0.0, self.spin * time, 0.0));
        frame.with(&turn, |frame| {
            for (i, &star) in self.points.iter().enumerate() {
                let twinkle = 0.6 + 0.4 * (time * 1.5 + i as f32).sin().abs();
                frame.point(star, radius, self.color.fade(twinkle));
            }
        });
    }
}

pub struct TerminalScene {
    typewriter: Typewriter,
    float: FloatMotion,
    time: f32,
    aspect: f32,
}

impl TerminalScene {
    const LINE_HEIGHT: f32 = 0.28;

    pub fn new() -> Self {
        Self {
            typewriter: Typewriter::terminal(),
            float: FloatMotion::new(2.0, 0.1, 0.2),
            time: 0.0,
            aspect: 16.0 / 9.0,
        }
    }

    /// Narrow viewports shrink the panel so it fits across.
    pub fn panel_scale(&self) -> f32 {
        let width = self.camera().visible_width(self.aspect);
        if width < 5.0 {
            width / 6.5
        } else {
            1.0
        }
    }
}

impl Default for TerminalScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for TerminalScene {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x050505))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 5.0), 50.0)
    }

    fn update(&mut self, clock: &Clock, inputs: &SceneInputs) {
        self.time = clock.elapsed;
        self.aspect = inputs.aspect;
    }

    fn draw(&self, frame: &mut Frame) {
        let text = self.typewriter.visible(self.time);
        let panel = Transform::IDENTITY.scaled(self.panel_scale());

        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.with(&panel, |frame| {
                frame.with(&Transform::at(Vec3::new(0.0, 0.0, -0.11)), |frame| {
                    frame.polyline(&rect(6.1, 3.1), true, Rgba::hex(0x333333), 2.0);
                });
                frame.with(&Transform::at(Vec3::new(0.0, 0.0, -0.1)), |frame| {
                    frame.polyline(&rect(6.0, 3.0), true, Rgba::hex(0x1f2937).alpha(0.8), 1.0);
                });
                for (row, line) in text.lines().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let at = Vec3::new(-2.8, 1.2 - row as f32 * Self::LINE_HEIGHT, 0.1);
                    frame.text(at, line, 0.2, Rgba::hex(0x4ade80));
                }
            });
        });

        let floor = Transform::at(Vec3::new(0.0, -2.0, -5.0)).rotated(Vec3::new(0.5, 0.0, 0.0));
        frame.with(&floor, |frame| {
            frame.segments(&grid(20.0, 20), Rgba::hex(0x444444).alpha(0.6), 1.0);
        });
    }
}

pub struct CloudScene {
    puffs: Vec<(Vec3, f32)>,
    lock_float: FloatMotion,
    time: f32,
}

impl CloudScene {
    pub fn new(rng: &mut impl Rng) -> Self {
        let puffs = (0..20)
            .map(|_| {
                let at = Vec3::new(
                    rng.random_range(-2.5..=2.5),
                    rng.random_range(-0.5..=0.5),
                    rng.random_range(-0.5..=0.5),
                );
                (at, rng.random_range(0.5..=1.0))
            })
            .collect();
        Self {
            puffs,
            lock_float: FloatMotion::new(4.0, 0.5, 0.5),
            time: 0.0,
        }
    }

    fn draw_padlock(frame: &mut Frame) {
        let gold = Rgba::hex(0xfbbf24);
        frame.segments(&box_edges(Vec3::new(1.0, 0.8, 0.4)), gold, 2.0);
        frame.with(&Transform::at(Vec3::new(0.0, 0.6, 0.0)), |frame| {
            frame.polyline(&arc(0.3, 0.0, PI, 16), false, Rgba::hex(0xd1d5db), 4.0);
        });
        frame.with(&Transform::at(Vec3::new(0.0, 0.0, 0.21)), |frame| {
            frame.polyline(&circle(0.1, 16), true, Rgba::hex(0x92400e), 2.0);
        });
    }
}

impl Scene for CloudScene {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x0f172a))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 8.0), 50.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        for (i, &(at, radius)) in self.puffs.iter().enumerate() {
            let drift = Vec3::new((self.time * 0.4 + i as f32).sin() * 0.2, 0.0, 0.0);
            frame.point(at + drift, radius, Rgba::WHITE.alpha(0.12));
        }

        frame.with(&Transform::at(Vec3::new(0.0, -0.5, 2.0)), |frame| {
            frame.with(
                &Transform::floating(&self.lock_float, self.time),
                Self::draw_padlock,
            );
        });
    }
}

pub struct ConstellationScene {
    stars: Starfield,
    float: FloatMotion,
    time: f32,
}

impl ConstellationScene {
    pub const NODES: [Vec3; 5] = [
        Vec3::new(-2.0, 1.0, 0.0),
        Vec3::new(2.0, 1.5, -1.0),
        Vec3::new(0.0, -1.0, 1.0),
        Vec3::new(-1.5, -1.5, -1.0),
        Vec3::new(1.5, -0.5, 0.0),
    ];
    pub const LINKS: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 3), (2, 4), (0, 3)];

    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            stars: Starfield::new(rng, 600, 100.0, 150.0),
            float: FloatMotion::new(1.0, 0.2, 0.2),
            time: 0.0,
        }
    }
}

impl Scene for ConstellationScene {
    fn name(&self) -> &'static str {
        "constellation"
    }

    fn background(&self) -> Option<Rgba> {
        Some(NIGHT)
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 6.0), 50.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        self.stars.draw(frame, self.time, 0.25);
        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            for (a, b) in Self::LINKS {
                frame.line(Self::NODES[a], Self::NODES[b], SKY.alpha(0.3), 1.0);
            }
            for node in Self::NODES {
                frame.point(node, 0.08, SKY);
            }
        });
    }
}

pub struct AssemblerScene {
    starts: Vec<Vec3>,
    targets: Vec<Vec3>,
    float: FloatMotion,
    time: f32,
}

impl AssemblerScene {
    pub const COUNT: usize = 40;
    pub const RADIUS: f32 = 4.0;

    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            starts: (0..Self::COUNT).map(|_| random_in_cube(rng, 10.0)).collect(),
            targets: fibonacci_sphere(Self::COUNT, Self::RADIUS),
            float: FloatMotion::new(2.0, 0.5, 0.5),
            time: 0.0,
        }
    }

    /// Fraction of the flight from scatter to sphere, two seconds long.
    pub fn assembly(&self) -> f32 {
        (self.time * 0.5).min(1.0)
    }

    pub fn node_position(&self, i: usize) -> Vec3 {
        let progress = self.assembly();
        let mut at = self.starts[i].lerp(self.targets[i], ease_out_cubic(progress));
        if progress >= 1.0 {
            at.y += (self.time + i as f32).sin() * 0.05;
        }
        at
    }
}

impl Scene for AssemblerScene {
    fn name(&self) -> &'static str {
        "assembler"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x000000))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 12.0), 75.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        let hexagon = prism_edges(0.5, 0.2, 6);
        let glow = (2.0 + (self.time * 4.0).sin()) / 3.0;

        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.point(Vec3::ZERO, 0.35, BLUE.alpha(0.6 * glow));
            let spin = Transform::IDENTITY.rotated(Vec3::new(0.0, self.time * 0.1, 0.0));
            frame.with(&spin, |frame| {
                for i in 0..Self::COUNT {
                    let at = self.node_position(i);
                    let facing = at.normalize_or_zero();
                    let rotation = if facing == Vec3::ZERO {
                        Quat::IDENTITY
                    } else {
                        Quat::from_rotation_arc(Vec3::Y, facing)
                    };
                    frame.push_matrix(Mat4::from_rotation_translation(rotation, at));
                    frame.segments(&hexagon, Rgba::WHITE.alpha(0.85), 1.0);
                    frame.pop();
                }
            });
        });
    }
}

pub struct GlobeScene {
    cities: Vec<Vec3>,
    shell: Vec<Vec<Vec3>>,
    dust: Vec<Vec3>,
    float: FloatMotion,
    time: f32,
}

impl GlobeScene {
    pub const RADIUS: f32 = 2.5;

    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            cities: fibonacci_sphere(1500, Self::RADIUS),
            shell: wire_sphere(Self::RADIUS, 11, 12, 48),
            dust: (0..200).map(|_| random_in_cube(rng, 10.0)).collect(),
            float: FloatMotion::new(1.0, 0.1, 0.1),
            time: 0.0,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.time * 0.15
    }
}

impl Scene for GlobeScene {
    fn name(&self) -> &'static str {
        "globe"
    }

    fn background(&self) -> Option<Rgba> {
        Some(NIGHT)
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 8.0), 45.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        for &mote in &self.dust {
            frame.point(mote, 0.02, Rgba::WHITE.alpha(0.4));
        }

        let spin = Transform::IDENTITY.rotated(Vec3::new(0.0, self.rotation(), 0.0));
        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.with(&spin, |frame| {
                for ring in &self.shell {
                    frame.polyline(ring, true, Rgba::hex(0x1e40af).alpha(0.15), 1.0);
                }
                for &city in &self.cities {
                    frame.point(city, 0.025, SKY);
                }
                let inner = Transform::IDENTITY.rotated(Vec3::new(FRAC_PI_2, FRAC_PI_6, 0.0));
                frame.with(&inner, |frame| {
                    frame.polyline(&circle(3.2, 100), true, BLUE.alpha(0.5), 1.5);
                });
                let outer = Transform::IDENTITY.rotated(Vec3::new(FRAC_PI_3, -FRAC_PI_6, 0.0));
                frame.with(&outer, |frame| {
                    frame.polyline(&circle(3.8, 100), true, Rgba::hex(0x93c5fd).alpha(0.3), 1.5);
                });
            });
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub position: Vec3,
    pub height: f32,
    pub delay: f32,
}

impl Building {
    /// Growth in [0, 1]: nothing before the delay, then half a second of
    /// cubic ease.
    pub fn growth(&self, time: f32) -> f32 {
        if time <= self.delay {
            0.0
        } else {
            ease_out_cubic(((time - self.delay) * 2.0).min(1.0))
        }
    }
}

pub struct ArchitectScene {
    buildings: Vec<Building>,
    time: f32,
}

impl ArchitectScene {
    pub const HALF_GRID: i32 = 5;
    pub const MIN_HEIGHT: f32 = 0.2;

    pub fn new(rng: &mut impl Rng) -> Self {
        let mut buildings = Vec::new();
        for x in -Self::HALF_GRID..=Self::HALF_GRID {
            for z in -Self::HALF_GRID..=Self::HALF_GRID {
                let dist = ((x * x + z * z) as f32).sqrt();
                let height = (rng.random::<f32>() * 3.0 + 0.5 + (5.0 - dist) * 0.5)
                    .max(Self::MIN_HEIGHT);
                let delay = dist * 0.1 + rng.random::<f32>() * 0.5;
                if rng.random_bool(0.7) {
                    buildings.push(Building {
                        position: Vec3::new(x as f32 * 1.2, height / 2.0, z as f32 * 1.2),
                        height,
                        delay,
                    });
                }
            }
        }
        Self { buildings, time: 0.0 }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }
}

impl Scene for ArchitectScene {
    fn name(&self) -> &'static str {
        "architect"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x000000))
    }

    fn camera(&self) -> Camera {
        Camera::orbit(Vec3::ZERO, 15.0, 12.0, self.time * 0.2, 45.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        frame.segments(&grid(20.0, 20), Rgba::hex(0x1e3a8a), 1.0);

        let unit = box_edges(Vec3::ONE);
        for building in &self.buildings {
            let growth = building.growth(self.time);
            if growth <= 0.0 {
                continue;
            }
            let placed = Transform::at(building.position)
                .scaled_by(Vec3::new(1.0, building.height, 1.0) * growth);
            frame.with(&placed, |frame| {
                frame.segments(&unit, Rgba::hex(0xbfdbfe).alpha(0.7), 1.0);
            });
        }
    }
}

pub struct KubernetesScene {
    float: FloatMotion,
    time: f32,
}

impl KubernetesScene {
    pub const SPOKES: usize = 7;

    pub fn new() -> Self {
        Self {
            float: FloatMotion::new(2.0, 0.2, 0.5),
            time: 0.0,
        }
    }

    pub fn wheel_angle(&self) -> f32 {
        -self.time * 1.5
    }
}

impl Default for KubernetesScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for KubernetesScene {
    fn name(&self) -> &'static str {
        "kubernetes"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x030014))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 8.0), 50.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        let floor =
            Transform::at(Vec3::new(0.0, -4.0, -10.0)).rotated(Vec3::new(-PI / 2.5, 0.0, 0.0));
        frame.with(&floor, |frame| {
            frame.segments(&grid(40.0, 40), Rgba::hex(0xff00ff).alpha(0.25), 1.0);
        });

        let wheel = Transform::IDENTITY.rotated(Vec3::new(0.0, 0.0, self.wheel_angle()));
        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.with(&wheel, |frame| {
                frame.polyline(&circle(2.2, 64), true, CYAN, 5.0);
                frame.polyline(&circle(0.8, 32), true, PURPLE, 5.0);
                frame.polyline(&circle(0.4, 16), true, CYAN, 3.0);
                for i in 0..Self::SPOKES {
                    let angle = TAU * i as f32 / Self::SPOKES as f32;
                    let spoke = Transform::IDENTITY.rotated(Vec3::new(0.0, 0.0, angle));
                    frame.with(&spoke, |frame| {
                        frame.line(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.6, 0.0), PURPLE, 4.0);
                        frame.line(Vec3::new(0.0, 2.4, 0.0), Vec3::new(0.0, 3.0, 0.0), CYAN, 7.0);
                    });
                }
            });
        });
    }
}

pub struct PipelineScene {
    float: FloatMotion,
    time: f32,
}

impl PipelineScene {
    pub const ITEMS: usize = 8;
    const SPEED: f32 = 4.0;
    const LIMIT: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            float: FloatMotion::new(1.0, 0.2, 0.2),
            time: 0.0,
        }
    }

    /// Position and scale of package `i` on the conveyor.
    pub fn package(&self, i: usize) -> (Vec3, f32) {
        let offset = i as f32 * 2.5;
        let z = (self.time * Self::SPEED + offset).rem_euclid(Self::LIMIT * 2.0) - Self::LIMIT;
        let y = (z * 0.5).sin() * 0.2;
        let dist = z.abs();
        let scale = if dist < 1.0 { 1.0 + (1.0 - dist) * 0.5 } else { 1.0 };
        (Vec3::new(0.0, y, z), scale)
    }
}

impl Default for PipelineScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PipelineScene {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0x050505))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(5.0, 3.0, 5.0), 50.0)
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
    }

    fn draw(&self, frame: &mut Frame) {
        let tilt = Transform::IDENTITY.rotated(Vec3::new(0.2, -0.5, 0.0));
        let package = box_edges(Vec3::splat(0.8));
        let shell = box_edges(Vec3::splat(0.82));

        frame.with(&Transform::floating(&self.float, self.time), |frame| {
            frame.with(&tilt, |frame| {
                frame.with(&Transform::at(Vec3::new(0.0, -2.0, 0.0)), |frame| {
                    frame.segments(&grid(20.0, 20), Rgba::hex(0x222222), 1.0);
                });

                let gate = Transform::IDENTITY.rotated(Vec3::new(0.0, 0.0, FRAC_PI_4));
                frame.with(&gate, |frame| {
                    frame.polyline(&circle(1.5, 4), true, BLUE, 4.0);
                });
                frame.polyline(&rect(2.5, 2.5), true, BLUE.alpha(0.15), 1.0);

                for i in 0..Self::ITEMS {
                    let (at, scale) = self.package(i);
                    frame.with(&Transform::at(at).scaled(scale), |frame| {
                        frame.segments(&package, Rgba::hex(0x00ffff).alpha(0.9), 2.0);
                        frame.segments(&shell, Rgba::WHITE.alpha(0.3), 1.0);
                    });
                }
            });
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolPackage {
    pub position: Vec3,
    pub spin: f32,
    pub scale: f32,
    pub color: Rgba,
}

pub struct TruckScene {
    rng: SmallRng,
    tools: Vec<ToolPackage>,
    time: f32,
}

impl TruckScene {
    pub const TOOL_POOL: usize = 10;
    const SPAWN_CHANCE: f32 = 0.05;
    const TOOL_COLORS: [Rgba; 3] = [CYAN, PURPLE, BLUE];

    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(rng.random()),
            tools: Vec::with_capacity(Self::TOOL_POOL),
            time: 0.0,
        }
    }

    pub fn truck_x(&self) -> f32 {
        -15.0 + (self.time * 6.0).rem_euclid(30.0)
    }

    pub fn bounce(&self) -> f32 {
        (self.time * 15.0).sin() * 0.05
    }

    pub fn tools(&self) -> &[ToolPackage] {
        &self.tools
    }

    fn spawn_tool(&mut self) {
        if self.tools.len() == Self::TOOL_POOL {
            self.tools.remove(0);
        }
        let color = Self::TOOL_COLORS[self.rng.random_range(0..Self::TOOL_COLORS.len())];
        self.tools.push(ToolPackage {
            position: Vec3::new(-2.0, 0.0, 0.0),
            spin: self.rng.random_range(0.0..0.5),
            scale: 1.0,
            color,
        });
    }

    fn draw_truck(frame: &mut Frame) {
        let parts = [
            (Vec3::new(0.0, 0.5, 0.0), Vec3::new(4.0, 0.5, 2.0), Rgba::hex(0x6b7280)),
            (Vec3::new(1.2, 1.5, 0.0), Vec3::new(1.5, 1.5, 2.0), Rgba::hex(0xef4444)),
            (
                Vec3::new(1.2, 1.8, 0.0),
                Vec3::new(1.55, 0.8, 2.05),
                Rgba::hex(0x93c5fd).alpha(0.6),
            ),
            (Vec3::new(-1.0, 1.5, 0.0), Vec3::new(2.5, 2.0, 2.1), Rgba::hex(0xf8fafc)),
        ];
        for (at, size, color) in parts {
            frame.with(&Transform::at(at), |frame| {
                frame.segments(&box_edges(size), color, 2.0);
            });
        }
        frame.text(Vec3::new(-2.2, 1.9, 1.1), "DevOps", 0.8, Rgba::hex(0x0f172a));

        for x in [-1.2, 1.2] {
            for z in [-1.0, 1.0] {
                frame.with(&Transform::at(Vec3::new(x, 0.0, z)), |frame| {
                    frame.polyline(&circle(0.4, 16), true, Rgba::hex(0x111111), 3.0);
                });
            }
        }
    }
}

impl Scene for TruckScene {
    fn name(&self) -> &'static str {
        "truck"
    }

    fn background(&self) -> Option<Rgba> {
        Some(Rgba::hex(0xbae6fd))
    }

    fn camera(&self) -> Camera {
        Camera::new(Vec3::new(0.0, 2.0, 10.0), 50.0).looking_at(Vec3::new(0.0, 2.0, 0.0))
    }

    fn update(&mut self, clock: &Clock, _inputs: &SceneInputs) {
        self.time = clock.elapsed;
        let frames = clock.frames();

        for tool in &mut self.tools {
            tool.spin += 0.05 * frames;
            tool.position.y -= 0.05 * frames;
            tool.position.x -= 0.1 * frames;
            if tool.position.y < -3.0 {
                tool.scale *= 0.9_f32.powf(frames);
            }
        }

        let chance = 1.0 - (1.0 - Self::SPAWN_CHANCE).powf(frames);
        if self.rng.random::<f32>() < chance {
            self.spawn_tool();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let ground = Rgba::hex(0x86efac);
        let road = Rgba::hex(0x555555);
        for z in [-10.0, -6.0, 6.0, 10.0] {
            frame.line(Vec3::new(-50.0, -1.0, z), Vec3::new(50.0, -1.0, z), ground, 2.0);
        }
        for z in [-2.0, 2.0] {
            frame.line(Vec3::new(-50.0, -0.9, z), Vec3::new(50.0, -0.9, z), road, 3.0);
        }

        let truck = Transform::at(Vec3::new(self.truck_x(), self.bounce(), 0.0));
        frame.with(&truck, |frame| {
            Self::draw_truck(frame);
            let crate_edges = box_edges(Vec3::splat(0.5));
            for tool in &self.tools {
                let placed = Transform::at(tool.position)
                    .rotated(Vec3::new(tool.spin, tool.spin, 0.0))
                    .scaled(tool.scale);
                frame.with(&placed, |frame| {
                    frame.segments(&crate_edges, tool.color, 2.0);
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn run(scene: &mut dyn Scene, seconds: f32) {
        let mut clock = Clock::default();
        let inputs = SceneInputs::default();
        let steps = (seconds * 60.0).round() as usize;
        for _ in 0..steps {
            clock.advance(1.0 / 60.0);
            scene.update(&clock, &inputs);
        }
    }

    #[test]
    fn terminal_panel_shrinks_on_narrow_screens() {
        let mut scene = TerminalScene::new();
        assert_eq!(scene.panel_scale(), 1.0);

        let portrait = SceneInputs {
            aspect: 0.5,
            ..SceneInputs::default()
        };
        scene.update(&Clock::default(), &portrait);
        let width = scene.camera().visible_width(0.5);
        assert!(width < 5.0);
        assert!((scene.panel_scale() - width / 6.5).abs() < 1e-5);
    }

    #[test]
    fn terminal_draws_typed_lines() {
        let mut scene = TerminalScene::new();
        run(&mut scene, 2.0);
        let mut frame = Frame::new();
        scene.draw(&mut frame);
        let lines = frame
            .items()
            .iter()
            .filter(|item| matches!(item.shape, Shape::Text { .. }))
            .count();
        assert!(lines >= 3, "only {lines} lines typed");
    }

    #[test]
    fn assembler_lands_on_sphere_after_two_seconds() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut scene = AssemblerScene::new(&mut rng);
        run(&mut scene, 2.1);
        assert_eq!(scene.assembly(), 1.0);
        for i in 0..AssemblerScene::COUNT {
            let radius = scene.node_position(i).length();
            assert!((radius - AssemblerScene::RADIUS).abs() < 0.06, "node {i} at {radius}");
        }
    }

    #[test]
    fn assembler_starts_scattered() {
        let mut rng = SmallRng::seed_from_u64(11);
        let scene = AssemblerScene::new(&mut rng);
        assert_eq!(scene.assembly(), 0.0);
        let scattered = (0..AssemblerScene::COUNT)
            .filter(|&i| (scene.node_position(i).length() - AssemblerScene::RADIUS).abs() > 0.5)
            .count();
        assert!(scattered > AssemblerScene::COUNT / 2);
    }

    #[test]
    fn architect_buildings_grow_after_delay() {
        let mut rng = SmallRng::seed_from_u64(5);
        let scene = ArchitectScene::new(&mut rng);
        assert!(!scene.buildings().is_empty());
        assert!(scene.buildings().len() <= 121);
        for building in scene.buildings() {
            assert!(building.height >= ArchitectScene::MIN_HEIGHT);
            assert_eq!(building.growth(building.delay), 0.0);
            assert_eq!(building.growth(building.delay + 0.6), 1.0);
        }
    }

    #[test]
    fn architect_camera_orbits_at_fixed_radius() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = ArchitectScene::new(&mut rng);
        for seconds in [0.0, 1.3, 7.9] {
            let clock = Clock {
                elapsed: seconds,
                delta: 0.0,
            };
            scene.update(&clock, &SceneInputs::default());
            let position = scene.camera().position;
            assert!((Vec3::new(position.x, 0.0, position.z).length() - 15.0).abs() < 1e-3);
            assert_eq!(position.y, 12.0);
        }
    }

    #[test]
    fn pipeline_packages_loop_and_swell_at_the_gate() {
        let mut scene = PipelineScene::new();
        for seconds in [0.0, 0.9, 4.2, 13.7] {
            scene.time = seconds;
            for i in 0..PipelineScene::ITEMS {
                let (at, scale) = scene.package(i);
                assert!((-10.0..10.0).contains(&at.z));
                assert!((1.0..=1.5).contains(&scale));
            }
        }
        scene.time = 0.0;
        assert_eq!(scene.package(4), (Vec3::ZERO, 1.5));
    }

    #[test]
    fn truck_wraps_and_caps_its_tool_pool() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut scene = TruckScene::new(&mut rng);
        run(&mut scene, 10.0);
        assert!(scene.tools().len() <= TruckScene::TOOL_POOL);
        assert!(!scene.tools().is_empty());
        assert!((-15.0..15.0).contains(&scene.truck_x()));
        assert!(scene.bounce().abs() <= 0.05);
    }

    #[test]
    fn kubernetes_wheel_spins_backwards() {
        let mut scene = KubernetesScene::new();
        run(&mut scene, 1.0);
        assert!((scene.wheel_angle() + 1.5).abs() < 1e-3);
    }

    #[test]
    fn globe_turns_slowly() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut scene = GlobeScene::new(&mut rng);
        run(&mut scene, 2.0);
        assert!((scene.rotation() - 0.3).abs() < 1e-3);
    }

    #[test]
    fn starfield_keeps_its_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        let stars = Starfield::new(&mut rng, 600, 100.0, 150.0);
        assert_eq!(stars.len(), 600);
        let mut frame = Frame::new();
        stars.draw(&mut frame, 0.0, 0.2);
        assert_eq!(frame.len(), 600);
    }
}
