//! Interpolation, easing and the small motion models every animated component
//! drives its transforms with.

use glam::Vec3;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, unclamped. Degenerate ranges map
/// to 0.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1].
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    clamp01(elapsed / duration)
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - clamp01(t);
    1.0 - inv * inv * inv
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// Frame-rate scaled approach of `current` toward `target`. `rate * delta` is
/// capped at 1 so a long frame lands on the target instead of overshooting.
pub fn damp(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    lerp(current, target, (rate * delta).clamp(0.0, 1.0))
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// The curve sections and the navigation bar enter with.
    pub const SMOOTH_OUT: Self = Self::new(0.22, 1.0, 0.36, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The same curve as a CSS timing function.
    pub fn css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }

    fn sample(a1: f32, a2: f32, t: f32) -> f32 {
        let c = 3.0 * a1;
        let b = 3.0 * (a2 - a1) - c;
        let a = 1.0 - c - b;
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a1: f32, a2: f32, t: f32) -> f32 {
        let c = 3.0 * a1;
        let b = 3.0 * (a2 - a1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * t + 2.0 * b) * t + c
    }

    fn solve_t_for_x(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, t) - x;
            if error.abs() < 1e-6 {
                return t;
            }
            let slope = Self::sample_derivative(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    pub fn ease(&self, x: f32) -> f32 {
        let x = clamp01(x);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::sample(self.y1, self.y2, self.solve_t_for_x(x))
    }
}

/// Damped spring integrated with semi-implicit Euler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub value: f32,
    pub velocity: f32,
}

impl Spring {
    const MAX_STEP: f32 = 1.0 / 120.0;

    pub fn new(stiffness: f32, damping: f32, mass: f32, value: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            value,
            velocity: 0.0,
        }
    }

    /// The settings the cursor dot follows the pointer with.
    pub fn cursor(value: f32) -> Self {
        Self::new(400.0, 30.0, 0.8, value)
    }

    /// Advances by `delta` seconds, sub-stepping so long frames stay stable.
    pub fn step(&mut self, target: f32, delta: f32) -> f32 {
        let mut remaining = delta.max(0.0);
        while remaining > 0.0 {
            let dt = remaining.min(Self::MAX_STEP);
            let force = -self.stiffness * (self.value - target) - self.damping * self.velocity;
            self.velocity += force / self.mass * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }
        self.value
    }

    pub fn is_settled(&self, target: f32) -> bool {
        (self.value - target).abs() < 0.01 && self.velocity.abs() < 0.01
    }
}

/// Idle hover of a floating object: a slow bob plus a small sway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl FloatMotion {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }

    /// Vertical offset at `time` seconds.
    pub fn offset_y(&self, time: f32) -> f32 {
        (time / 4.0 * self.speed).sin() / 10.0 * self.float_intensity
    }

    /// Euler sway at `time` seconds.
    pub fn rotation(&self, time: f32) -> Vec3 {
        let phase = time / 4.0 * self.speed;
        Vec3::new(
            phase.cos() / 8.0 * self.rotation_intensity,
            phase.sin() / 8.0 * self.rotation_intensity,
            phase.sin() / 20.0 * self.rotation_intensity,
        )
    }
}

/// Staggered entrance: fades in and slides from `offset` to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub delay: f32,
    pub duration: f32,
    pub offset: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealState {
    pub opacity: f32,
    pub translate: f32,
}

impl Reveal {
    pub const fn new(delay: f32, duration: f32, offset: f32) -> Self {
        Self {
            delay,
            duration,
            offset,
        }
    }

    /// `since_visible` is `None` until the element has entered view.
    pub fn sample(&self, since_visible: Option<f32>) -> RevealState {
        let Some(since) = since_visible else {
            return RevealState {
                opacity: 0.0,
                translate: self.offset,
            };
        };
        let eased = CubicBezier::SMOOTH_OUT.ease(progress(since - self.delay, self.duration));
        RevealState {
            opacity: eased,
            translate: self.offset * (1.0 - eased),
        }
    }

    pub fn is_done(&self, since_visible: f32) -> bool {
        since_visible >= self.delay + self.duration
    }
}

/// Index into a looping slideshow of `len` slides advancing every `period`
/// seconds while active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cycle {
    pub len: usize,
    pub period: f32,
}

impl Cycle {
    pub const fn new(len: usize, period: f32) -> Self {
        Self { len, period }
    }

    pub fn index(&self, active_for: Option<f32>) -> usize {
        match active_for {
            Some(elapsed) if self.len > 0 && self.period > 0.0 => {
                ((elapsed.max(0.0) / self.period).floor() as usize) % self.len
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn ease_out_cubic_hits_endpoints_and_front_loads() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(approx(ease_out_cubic(0.5), 0.875));
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!(approx(ease_in_out_cubic(0.5), 0.5));
        assert!(approx(ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75), 1.0));
    }

    #[test]
    fn progress_clamps_and_handles_zero_duration() {
        assert_eq!(progress(-1.0, 2.0), 0.0);
        assert_eq!(progress(1.0, 2.0), 0.5);
        assert_eq!(progress(5.0, 2.0), 1.0);
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn inverse_lerp_of_degenerate_range_is_zero() {
        assert_eq!(inverse_lerp(2.0, 2.0, 5.0), 0.0);
        assert!(approx(inverse_lerp(0.0, 4.0, 1.0), 0.25));
    }

    #[test]
    fn damp_never_overshoots_on_long_frames() {
        assert_eq!(damp(0.0, 10.0, 2.0, 5.0), 10.0);
        assert!(approx(damp(0.0, 10.0, 2.0, 0.1), 2.0));
    }

    #[test]
    fn smooth_out_bezier_is_monotonic_and_fast_early() {
        let curve = CubicBezier::SMOOTH_OUT;
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = curve.ease(step as f32 / 20.0);
            assert!(value + 1e-4 >= previous);
            previous = value;
        }
        assert!(curve.ease(0.3) > 0.6);
        assert_eq!(curve.ease(1.0), 1.0);
    }

    #[test]
    fn bezier_renders_as_css() {
        assert_eq!(CubicBezier::SMOOTH_OUT.css(), "cubic-bezier(0.22, 1, 0.36, 1)");
    }

    #[test]
    fn linear_bezier_matches_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for step in 0..=10 {
            let x = step as f32 / 10.0;
            assert!(approx(linear.ease(x), x));
        }
    }

    #[test]
    fn cursor_spring_settles_on_target() {
        let mut spring = Spring::cursor(-100.0);
        for _ in 0..120 {
            spring.step(250.0, 1.0 / 60.0);
        }
        assert!(spring.is_settled(250.0), "value {}", spring.value);
    }

    #[test]
    fn spring_survives_a_huge_frame_gap() {
        let mut spring = Spring::cursor(0.0);
        let value = spring.step(100.0, 5.0);
        assert!(value.is_finite());
        assert!((value - 100.0).abs() < 1.0);
    }

    #[test]
    fn float_motion_stays_within_intensity() {
        let float = FloatMotion::new(2.0, 0.5, 0.5);
        for step in 0..200 {
            let t = step as f32 * 0.1;
            assert!(float.offset_y(t).abs() <= 0.05 + 1e-6);
            assert!(float.rotation(t).x.abs() <= 0.5 / 8.0 + 1e-6);
        }
    }

    #[test]
    fn reveal_waits_for_view_and_delay() {
        let reveal = Reveal::new(0.2, 0.8, 30.0);
        let hidden = reveal.sample(None);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.translate, 30.0);

        assert_eq!(reveal.sample(Some(0.1)).opacity, 0.0);
        let done = reveal.sample(Some(1.0));
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.translate, 0.0);
        assert!(reveal.is_done(1.0));
    }

    #[test]
    fn cycle_advances_and_resets_when_inactive() {
        let slides = Cycle::new(3, 2.5);
        assert_eq!(slides.index(Some(0.0)), 0);
        assert_eq!(slides.index(Some(2.6)), 1);
        assert_eq!(slides.index(Some(7.6)), 0);
        assert_eq!(slides.index(None), 0);
    }
}
