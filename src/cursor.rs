//! Sparkle trail, pointer-follow spring and the sound throttle behind the
//! custom cursor.

use crate::motion::Spring;
use crate::scene::Rgba;
use glam::Vec2;
use rand::{rngs::SmallRng, Rng, SeedableRng};

pub const SPARKLE_COLORS: [Rgba; 3] = [
    Rgba::hex(0xffffff),
    Rgba::hex(0xe2e8f0),
    Rgba::hex(0x38bdf8),
];

/// Elements under the pointer that grow the ring.
pub const INTERACTIVE_SELECTOR: &str = "a, button, [role=\"button\"], [data-magnetic=\"true\"]";

const INTERACTIVE_TAGS: [&str; 4] = ["A", "BUTTON", "INPUT", "TEXTAREA"];

pub fn is_interactive(tag_name: &str, inside_interactive: bool) -> bool {
    inside_interactive
        || INTERACTIVE_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per 60 fps frame.
    pub velocity: Vec2,
    pub life: f32,
    pub size: f32,
    pub color: Rgba,
}

impl Particle {
    const DECAY_PER_FRAME: f32 = 0.02;

    fn spawn(at: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            position: at,
            velocity: Vec2::new(
                (rng.random::<f32>() - 0.5) * 1.5,
                (rng.random::<f32>() - 0.5) * 1.5,
            ),
            life: 1.0,
            size: rng.random::<f32>() * 2.0 + 1.0,
            color: SPARKLE_COLORS[rng.random_range(0..SPARKLE_COLORS.len())],
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Fixed-capacity particle pool. Dead slots are reused first; a full pool
/// overwrites its oldest live particle.
#[derive(Clone, Debug)]
pub struct SparkleSystem {
    particles: Vec<Particle>,
    capacity: usize,
}

impl Default for SparkleSystem {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl SparkleSystem {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn spawn(&mut self, at: Vec2, rng: &mut impl Rng) {
        let particle = Particle::spawn(at, rng);
        if let Some(slot) = self.particles.iter_mut().find(|p| !p.is_alive()) {
            *slot = particle;
        } else if self.particles.len() < self.capacity {
            self.particles.push(particle);
        } else if let Some(oldest) = self
            .particles
            .iter_mut()
            .min_by(|a, b| a.life.total_cmp(&b.life))
        {
            *oldest = particle;
        }
    }

    /// Advances by `delta` seconds, normalised to 60 fps frames.
    pub fn step(&mut self, delta: f32) {
        let frames = delta.max(0.0) * 60.0;
        for particle in self.particles.iter_mut().filter(|p| p.is_alive()) {
            particle.position += particle.velocity * frames;
            particle.life -= Particle::DECAY_PER_FRAME * frames;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    MouseMove,
    TouchMove,
    TouchStart,
}

impl PointerKind {
    pub fn sparkles(self, rng: &mut impl Rng) -> usize {
        match self {
            Self::MouseMove => usize::from(rng.random_bool(0.5)),
            Self::TouchMove => usize::from(rng.random_bool(0.9)),
            Self::TouchStart => 3,
        }
    }

    pub fn wants_sound(self, rng: &mut impl Rng) -> bool {
        match self {
            Self::MouseMove => rng.random_bool(0.2),
            Self::TouchMove => rng.random_bool(0.3),
            Self::TouchStart => true,
        }
    }
}

/// Drops sounds that arrive within `min_gap_ms` of the last one played.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundThrottle {
    min_gap_ms: f64,
    last_ms: Option<f64>,
}

impl Default for SoundThrottle {
    fn default() -> Self {
        Self::new(40.0)
    }
}

impl SoundThrottle {
    pub fn new(min_gap_ms: f64) -> Self {
        Self {
            min_gap_ms,
            last_ms: None,
        }
    }

    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms - last < self.min_gap_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub gain: f32,
    pub duration: f32,
}

impl Tone {
    /// The confirmation click.
    pub const CLICK: Self = Self {
        frequency: 800.0,
        gain: 0.2,
        duration: 0.1,
    };

    pub fn sparkle(rng: &mut impl Rng) -> Self {
        Self {
            frequency: 1200.0 + rng.random::<f32>() * 1800.0,
            gain: 0.05,
            duration: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStyle {
    pub size: f32,
    pub opacity: f32,
    pub dot_scale: f32,
}

impl RingStyle {
    pub fn for_hover(hovering: bool) -> Self {
        if hovering {
            Self {
                size: 60.0,
                opacity: 1.0,
                dot_scale: 0.5,
            }
        } else {
            Self {
                size: 24.0,
                opacity: 0.6,
                dot_scale: 1.0,
            }
        }
    }
}

/// All cursor state for one page: the trail, the spring-follow dot and the
/// sparkle sound policy.
#[derive(Clone, Debug)]
pub struct CursorEffects {
    pub sparkles: SparkleSystem,
    x: Spring,
    y: Spring,
    target: Vec2,
    throttle: SoundThrottle,
    rng: SmallRng,
    visible: bool,
    hovering: bool,
}

impl CursorEffects {
    const OFFSCREEN: f32 = -100.0;

    pub fn new(seed: u64) -> Self {
        Self {
            sparkles: SparkleSystem::default(),
            x: Spring::cursor(Self::OFFSCREEN),
            y: Spring::cursor(Self::OFFSCREEN),
            target: Vec2::splat(Self::OFFSCREEN),
            throttle: SoundThrottle::default(),
            rng: SmallRng::seed_from_u64(seed),
            visible: false,
            hovering: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows the cursor layer without moving it, as on mouse down.
    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
        if hovering {
            self.visible = true;
        }
    }

    pub fn ring(&self) -> RingStyle {
        RingStyle::for_hover(self.hovering)
    }

    /// Feeds one pointer event; returns the sparkle tone to play, if any.
    pub fn pointer(&mut self, kind: PointerKind, at: Vec2, sound_on: bool, now_ms: f64) -> Option<Tone> {
        self.visible = true;
        if kind != PointerKind::TouchStart {
            self.target = at;
        }
        for _ in 0..kind.sparkles(&mut self.rng) {
            self.sparkles.spawn(at, &mut self.rng);
        }
        if sound_on && kind.wants_sound(&mut self.rng) && self.throttle.try_fire(now_ms) {
            Some(Tone::sparkle(&mut self.rng))
        } else {
            None
        }
    }

    /// Advances the trail and the follow springs; returns the dot position.
    pub fn tick(&mut self, delta: f32) -> Vec2 {
        self.sparkles.step(delta);
        Vec2::new(
            self.x.step(self.target.x, delta),
            self.y.step(self.target.y, delta),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_never_exceeds_capacity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut system = SparkleSystem::new(16);
        for i in 0..100 {
            system.spawn(Vec2::new(i as f32, 0.0), &mut rng);
            system.step(1.0 / 240.0);
        }
        assert_eq!(system.live_count(), 16);
        assert_eq!(system.capacity(), 16);
    }

    #[test]
    fn full_pool_replaces_the_oldest() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut system = SparkleSystem::new(2);
        system.spawn(Vec2::ZERO, &mut rng);
        system.step(0.1);
        system.spawn(Vec2::ZERO, &mut rng);
        system.spawn(Vec2::new(50.0, 50.0), &mut rng);

        let lives: Vec<f32> = system.live().map(|p| p.life).collect();
        assert_eq!(lives, vec![1.0, 1.0]);
    }

    #[test]
    fn particles_fade_out_after_fifty_frames() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut system = SparkleSystem::new(8);
        system.spawn(Vec2::ZERO, &mut rng);
        for _ in 0..49 {
            system.step(1.0 / 60.0);
        }
        assert_eq!(system.live_count(), 1);
        for _ in 0..2 {
            system.step(1.0 / 60.0);
        }
        assert_eq!(system.live_count(), 0);

        system.spawn(Vec2::ZERO, &mut rng);
        assert_eq!(system.live_count(), 1);
    }

    #[test]
    fn particle_ranges() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let particle = Particle::spawn(Vec2::ZERO, &mut rng);
            assert!(particle.velocity.x.abs() <= 0.75 && particle.velocity.y.abs() <= 0.75);
            assert!((1.0..=3.0).contains(&particle.size));
            assert!(SPARKLE_COLORS.contains(&particle.color));
            assert_eq!(particle.alpha(), 1.0);
        }
    }

    #[test]
    fn touch_start_bursts_three_and_always_sounds() {
        let mut cursor = CursorEffects::new(4);
        let tone = cursor.pointer(PointerKind::TouchStart, Vec2::new(10.0, 10.0), true, 0.0);
        assert_eq!(cursor.sparkles.live_count(), 3);
        let tone = tone.expect("touch start plays");
        assert!((1200.0..=3000.0).contains(&tone.frequency));
        assert_eq!(tone.gain, 0.05);
        assert!(cursor.is_visible());
    }

    #[test]
    fn muted_cursor_never_sounds() {
        let mut cursor = CursorEffects::new(5);
        for i in 0..200 {
            let tone = cursor.pointer(PointerKind::TouchMove, Vec2::ZERO, false, i as f64 * 100.0);
            assert!(tone.is_none());
        }
    }

    #[test]
    fn throttle_enforces_minimum_gap() {
        let mut throttle = SoundThrottle::default();
        assert!(throttle.try_fire(1000.0));
        assert!(!throttle.try_fire(1039.0));
        assert!(throttle.try_fire(1040.0));
    }

    #[test]
    fn mouse_spawn_rate_is_about_half() {
        let mut rng = SmallRng::seed_from_u64(6);
        let spawned: usize = (0..1000)
            .map(|_| PointerKind::MouseMove.sparkles(&mut rng))
            .sum();
        assert!((400..600).contains(&spawned), "{spawned}");
    }

    #[test]
    fn interactive_targets() {
        assert!(is_interactive("a", false));
        assert!(is_interactive("TEXTAREA", false));
        assert!(!is_interactive("DIV", false));
        assert!(is_interactive("SPAN", true));
        assert_eq!(RingStyle::for_hover(true).size, 60.0);
        assert_eq!(RingStyle::for_hover(false).size, 24.0);
    }

    #[test]
    fn dot_follows_pointer() {
        let mut cursor = CursorEffects::new(7);
        assert!(!cursor.is_visible());
        cursor.pointer(PointerKind::MouseMove, Vec2::new(300.0, 200.0), false, 0.0);
        let mut at = Vec2::ZERO;
        for _ in 0..120 {
            at = cursor.tick(1.0 / 60.0);
        }
        assert!((at - Vec2::new(300.0, 200.0)).length() < 1.0);
    }
}
