//! Wireframe generators. Everything is centred on the origin; callers place
//! it with a [`super::Transform`].

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

pub type Segment = (Vec3, Vec3);

/// `count` points spread evenly over a sphere of `radius`.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    let n = count as f32;
    (0..count)
        .map(|i| {
            let phi = (-1.0 + 2.0 * i as f32 / n).clamp(-1.0, 1.0).acos();
            let theta = (n * PI).sqrt() * phi;
            Vec3::new(
                radius * theta.cos() * phi.sin(),
                radius * theta.sin() * phi.sin(),
                radius * phi.cos(),
            )
        })
        .collect()
}

/// Circle in the XY plane.
pub fn circle(radius: f32, segments: usize) -> Vec<Vec3> {
    arc(radius, 0.0, TAU, segments)
        .into_iter()
        .take(segments.max(3))
        .collect()
}

/// Arc in the XY plane from `start` sweeping `sweep` radians, endpoints
/// included.
pub fn arc(radius: f32, start: f32, sweep: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * i as f32 / segments as f32;
            Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
        .collect()
}

/// Closed rectangle outline in the XY plane.
pub fn rect(width: f32, height: f32) -> [Vec3; 4] {
    let (w, h) = (width / 2.0, height / 2.0);
    [
        Vec3::new(-w, -h, 0.0),
        Vec3::new(w, -h, 0.0),
        Vec3::new(w, h, 0.0),
        Vec3::new(-w, h, 0.0),
    ]
}

pub fn box_edges(size: Vec3) -> Vec<Segment> {
    let h = size / 2.0;
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    let mut edges = Vec::with_capacity(12);
    for &y in &[-1.0, 1.0] {
        for &z in &[-1.0, 1.0] {
            edges.push((corner(-1.0, y, z), corner(1.0, y, z)));
        }
    }
    for &x in &[-1.0, 1.0] {
        for &z in &[-1.0, 1.0] {
            edges.push((corner(x, -1.0, z), corner(x, 1.0, z)));
        }
    }
    for &x in &[-1.0, 1.0] {
        for &y in &[-1.0, 1.0] {
            edges.push((corner(x, y, -1.0), corner(x, y, 1.0)));
        }
    }
    edges
}

/// Square grid on the XZ plane, `divisions` cells per side.
pub fn grid(size: f32, divisions: usize) -> Vec<Segment> {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut lines = Vec::with_capacity(2 * (divisions + 1));
    for i in 0..=divisions {
        let offset = -half + step * i as f32;
        lines.push((Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half)));
        lines.push((Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset)));
    }
    lines
}

/// Prism with a regular `sides`-gon cross-section, standing on the Y axis.
pub fn prism_edges(radius: f32, height: f32, sides: usize) -> Vec<Segment> {
    let ring: Vec<Vec3> = (0..sides.max(3))
        .map(|i| {
            let angle = TAU * i as f32 / sides.max(3) as f32;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect();
    let top = Vec3::Y * (height / 2.0);
    let mut edges = Vec::with_capacity(ring.len() * 3);
    for (i, &p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        edges.push((p - top, q - top));
        edges.push((p + top, q + top));
        edges.push((p - top, p + top));
    }
    edges
}

/// Latitude/longitude wire sphere as polylines.
pub fn wire_sphere(radius: f32, parallels: usize, meridians: usize, segments: usize) -> Vec<Vec<Vec3>> {
    let mut rings = Vec::with_capacity(parallels + meridians);
    for i in 1..=parallels {
        let lat = -PI / 2.0 + PI * i as f32 / (parallels + 1) as f32;
        let y = lat.sin() * radius;
        let r = lat.cos() * radius;
        rings.push(
            circle(r, segments)
                .into_iter()
                .map(|p| Vec3::new(p.x, y, p.y))
                .collect(),
        );
    }
    for i in 0..meridians {
        let lon = PI * i as f32 / meridians.max(1) as f32;
        rings.push(
            circle(radius, segments)
                .into_iter()
                .map(|p| Vec3::new(p.x * lon.cos(), p.y, p.x * lon.sin()))
                .collect(),
        );
    }
    rings
}

pub fn random_in_cube(rng: &mut impl Rng, half_extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
    )
}

/// Uniform direction scaled to a radius in `[inner, outer)`.
pub fn random_on_shell(rng: &mut impl Rng, inner: f32, outer: f32) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let angle: f32 = rng.random_range(0.0..TAU);
    let r = (1.0 - z * z).sqrt();
    let radius = if outer > inner {
        rng.random_range(inner..outer)
    } else {
        inner
    };
    Vec3::new(r * angle.cos(), r * angle.sin(), z) * radius
}

/// Geographic position to a point on a Y-up sphere.
pub fn lat_lon_to_point(lat_deg: f32, lon_deg: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn fibonacci_points_sit_on_the_sphere() {
        let points = fibonacci_sphere(1500, 2.5);
        assert_eq!(points.len(), 1500);
        for p in &points {
            assert!((p.length() - 2.5).abs() < 1e-3);
        }
        assert!((points[0].z + 2.5).abs() < 1e-3);
    }

    #[test]
    fn box_and_prism_edge_counts() {
        assert_eq!(box_edges(Vec3::ONE).len(), 12);
        assert_eq!(prism_edges(1.0, 2.0, 6).len(), 18);
        assert_eq!(grid(10.0, 10).len(), 22);
    }

    #[test]
    fn arc_includes_both_endpoints() {
        let points = arc(1.0, 0.0, PI, 8);
        assert_eq!(points.len(), 9);
        assert!((points[0] - Vec3::X).length() < 1e-5);
        assert!((points[8] + Vec3::X).length() < 1e-5);
        assert_eq!(circle(1.0, 16).len(), 16);
    }

    #[test]
    fn shell_samples_respect_radii() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = random_on_shell(&mut rng, 20.0, 40.0);
            assert!(p.length() >= 20.0 - 1e-3 && p.length() <= 40.0 + 1e-3);
        }
    }

    #[test]
    fn equator_and_pole_positions() {
        let pole = lat_lon_to_point(90.0, 0.0, 1.0);
        assert!((pole - Vec3::Y).length() < 1e-5);
        let equator = lat_lon_to_point(0.0, 0.0, 2.0);
        assert!(equator.y.abs() < 1e-5);
        assert!((equator.length() - 2.0).abs() < 1e-5);
    }
}
