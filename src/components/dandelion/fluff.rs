//! Static fuzz strands covering the receptacle.

use std::f64::consts::TAU;

use rand::Rng;

/// One short decorative line on the receptacle disk, in head-local units.
#[derive(Clone, Debug)]
pub struct FluffStrand {
	/// Offset from the receptacle center.
	pub x: f64,
	/// Offset from the receptacle center, y down.
	pub y: f64,
	/// Direction in radians.
	pub angle: f64,
	/// Length in world units.
	pub length: f64,
	/// Opacity in [0, 1].
	pub alpha: f64,
}

/// Scatter `count` strands over a disk of `radius`, uniform by area.
pub fn scatter<R: Rng>(count: usize, radius: f64, rng: &mut R) -> Vec<FluffStrand> {
	(0..count)
		.map(|_| {
			let r = radius * rng.gen_range(0.0f64..1.0).sqrt();
			let t = rng.gen_range(0.0..TAU);
			FluffStrand {
				x: t.cos() * r,
				y: t.sin() * r,
				angle: rng.gen_range(0.0..TAU),
				length: rng.gen_range(6.0..14.0),
				alpha: rng.gen_range(0.2..0.6),
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn strands_stay_on_the_disk() {
		let mut rng = SmallRng::seed_from_u64(5);
		let strands = scatter(90, 26.0, &mut rng);
		assert_eq!(strands.len(), 90);
		for s in &strands {
			assert!((s.x * s.x + s.y * s.y).sqrt() <= 26.0 + 1e-9);
			assert!((6.0..14.0).contains(&s.length));
			assert!((0.2..0.6).contains(&s.alpha));
		}
	}
}
