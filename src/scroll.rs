use crate::motion::clamp01;
use glam::Vec3;

/// Scroll offset past which the navigation bar turns solid.
pub const NAV_SCROLLED_THRESHOLD: f64 = 50.0;

pub fn nav_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLLED_THRESHOLD
}

/// Progress of a tall section scrolled from "section top at viewport top" to
/// "section bottom at viewport bottom".
pub fn section_progress(scroll_y: f64, top: f64, height: f64, viewport: f64) -> f32 {
    let span = height - viewport;
    if span <= 0.0 {
        return if scroll_y >= top { 1.0 } else { 0.0 };
    }
    clamp01(((scroll_y - top) / span) as f32)
}

/// Progress from "section top at viewport centre" to "section bottom at
/// viewport centre".
pub fn centered_progress(scroll_y: f64, top: f64, height: f64, viewport: f64) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let centre = scroll_y + viewport / 2.0;
    clamp01(((centre - top) / height) as f32)
}

/// Pose of the hero laptop for a given scroll progress and clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaptopPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

pub fn laptop_pose(scroll_progress: f32, time: f32) -> LaptopPose {
    let p = clamp01(scroll_progress);
    LaptopPose {
        position: Vec3::new(0.0, (time * 0.5).sin() * 0.05 - 0.6, 0.0),
        rotation: Vec3::new(0.1 + p * 0.1, -0.5 + p * 3.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_threshold_is_exclusive() {
        assert!(!nav_is_scrolled(50.0));
        assert!(nav_is_scrolled(50.5));
    }

    #[test]
    fn hero_progress_spans_section_minus_viewport() {
        // 300vh hero on a 1000px viewport scrolls through 2000px.
        assert_eq!(section_progress(0.0, 0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(section_progress(1000.0, 0.0, 3000.0, 1000.0), 0.5);
        assert_eq!(section_progress(5000.0, 0.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn short_section_progress_is_a_step() {
        assert_eq!(section_progress(10.0, 100.0, 500.0, 800.0), 0.0);
        assert_eq!(section_progress(100.0, 100.0, 500.0, 800.0), 1.0);
    }

    #[test]
    fn centered_progress_starts_when_top_reaches_middle() {
        assert_eq!(centered_progress(0.0, 1000.0, 2000.0, 800.0), 0.0);
        assert_eq!(centered_progress(600.0, 1000.0, 2000.0, 800.0), 0.0);
        assert_eq!(centered_progress(1600.0, 1000.0, 2000.0, 800.0), 0.5);
        assert_eq!(centered_progress(9000.0, 1000.0, 2000.0, 800.0), 1.0);
    }

    #[test]
    fn laptop_turns_three_radians_over_the_hero() {
        let start = laptop_pose(0.0, 0.0);
        let end = laptop_pose(1.0, 0.0);
        assert!((start.rotation.y + 0.5).abs() < 1e-6);
        assert!((end.rotation.y - 2.5).abs() < 1e-6);
        assert!((end.rotation.x - 0.2).abs() < 1e-6);
        assert!((start.position.y + 0.6).abs() < 1e-6);
    }
}
