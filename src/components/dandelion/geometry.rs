//! Geometry helpers: Fibonacci sphere, head rotation, perspective projection.

use glam::DVec3;

/// Golden angle in radians, `pi * (3 - sqrt(5))`.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Point `i` of `n` on a Fibonacci sphere of radius `radius`.
///
/// Points spiral from the top pole (`y = +r`) to the bottom pole. For `n < 2`
/// the single point sits on the top pole.
pub fn fibonacci_point(i: usize, n: usize, radius: f64) -> DVec3 {
	let y = if n < 2 {
		1.0
	} else {
		1.0 - 2.0 * i as f64 / (n - 1) as f64
	};
	let radius_xy = (1.0 - y * y).max(0.0).sqrt();
	let theta = i as f64 * GOLDEN_ANGLE;
	DVec3::new(theta.cos() * radius_xy, y, theta.sin() * radius_xy) * radius
}

/// All `n` points of a Fibonacci sphere of radius `radius`.
pub fn fibonacci_sphere(n: usize, radius: f64) -> Vec<DVec3> {
	(0..n).map(|i| fibonacci_point(i, n, radius)).collect()
}

/// Rotate `p` about the view axis (z) by `angle` radians.
///
/// Positive angles tilt clockwise on screen, matching a head leaning right.
pub fn rotate_z(p: DVec3, angle: f64) -> DVec3 {
	let (s, c) = angle.sin_cos();
	DVec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

/// Perspective scale factor for depth `z`. Larger `z` is farther away.
///
/// Points at or behind the eye (`focal + z <= 0`) get scale 0 and are culled.
pub fn perspective_scale(z: f64, focal: f64) -> f64 {
	let denom = focal + z;
	if denom <= f64::EPSILON { 0.0 } else { focal / denom }
}

/// A point projected into screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	/// Screen x in pixels.
	pub x: f64,
	/// Screen y in pixels.
	pub y: f64,
	/// Combined perspective and display scale.
	pub scale: f64,
}

/// Project head-relative point `p` to the screen around `anchor`.
///
/// `unit` converts world units to pixels (the display scale factor).
pub fn project(p: DVec3, anchor: (f64, f64), focal: f64, unit: f64) -> Projected {
	let scale = perspective_scale(p.z, focal);
	Projected {
		x: anchor.0 + p.x * scale * unit,
		y: anchor.1 + p.y * scale * unit,
		scale,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sphere_points_lie_on_radius() {
		for n in [2, 3, 17, 500, 1500] {
			for p in fibonacci_sphere(n, 160.0) {
				assert!((p.length() - 160.0).abs() < 1e-9, "n={n} len={}", p.length());
			}
		}
	}

	#[test]
	fn sphere_is_deterministic() {
		assert_eq!(fibonacci_sphere(800, 42.0), fibonacci_sphere(800, 42.0));
	}

	#[test]
	fn consecutive_points_never_coincide() {
		let points = fibonacci_sphere(1500, 160.0);
		for pair in points.windows(2) {
			assert!(pair[0].distance(pair[1]) > 1e-6);
		}
	}

	#[test]
	fn spiral_spans_both_poles() {
		let points = fibonacci_sphere(100, 1.0);
		assert!((points[0].y - 1.0).abs() < 1e-12);
		assert!((points[99].y + 1.0).abs() < 1e-12);
	}

	#[test]
	fn hemispheres_are_balanced() {
		let points = fibonacci_sphere(1000, 1.0);
		let upper = points.iter().filter(|p| p.y > 0.0).count();
		let front = points.iter().filter(|p| p.z > 0.0).count();
		assert_eq!(upper, 500);
		assert!((450..=550).contains(&front), "front={front}");
	}

	#[test]
	fn single_point_sits_on_pole() {
		let points = fibonacci_sphere(1, 5.0);
		assert_eq!(points, vec![DVec3::new(0.0, 5.0, 0.0)]);
	}

	#[test]
	fn rotation_preserves_length_and_depth() {
		let p = DVec3::new(3.0, -4.0, 7.0);
		let r = rotate_z(p, 0.8);
		assert!((r.length() - p.length()).abs() < 1e-12);
		assert_eq!(r.z, 7.0);
		let back = rotate_z(r, -0.8);
		assert!(back.distance(p) < 1e-12);
	}

	#[test]
	fn farther_points_project_smaller() {
		let near = project(DVec3::new(10.0, 0.0, -50.0), (100.0, 100.0), 600.0, 1.0);
		let far = project(DVec3::new(10.0, 0.0, 50.0), (100.0, 100.0), 600.0, 1.0);
		assert!(near.scale > 1.0 && far.scale < 1.0);
		assert!(near.x > far.x);
		assert_eq!(perspective_scale(-600.0, 600.0), 0.0);
	}
}
