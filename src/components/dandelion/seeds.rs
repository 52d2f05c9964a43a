//! Seed particles of the dandelion head.
//!
//! Seeds live in head-relative coordinates (x right, y down, z away from the
//! viewer). Attached seeds are recomputed from their origin every frame;
//! detached seeds integrate their own velocity. All seeds attach and detach
//! together.

use glam::DVec3;
use rand::Rng;

use super::geometry::{fibonacci_sphere, rotate_z};

/// Minimum outward speed given to a seed on dispersal.
const EXPLOSION_MIN: f64 = 2.0;
/// Random extra outward speed on top of `EXPLOSION_MIN`.
const EXPLOSION_RANGE: f64 = 4.0;
/// Horizontal wind per unit of blow strength.
const WIND_PUSH: f64 = 6.0;
/// Upward lift per unit of blow strength.
const WIND_LIFT: f64 = 1.5;
/// Per-axis random jitter half-width.
const JITTER: f64 = 0.5;

const SEED_DRAG: f64 = 0.985;
const SEED_GRAVITY: f64 = 0.03;
/// Alpha lost per frame while flying.
const FLIGHT_FADE: f64 = 0.004;

/// Radial breathing in world units at full activity.
const BREATH_AMPLITUDE: f64 = 4.0;
const BREATH_RATE: f64 = 0.002;
/// Phase offset between neighbouring seeds so the head ripples.
const BREATH_PHASE_STEP: f64 = 0.37;

/// One seed ("hair") of the flower head.
#[derive(Clone, Debug, PartialEq)]
pub struct Seed {
	/// Head-relative position this frame.
	pub position: DVec3,
	/// Resting point on the head sphere. Never changes after init.
	pub origin: DVec3,
	/// Velocity in world units per frame, zero while attached.
	pub velocity: DVec3,
	/// Frames of flight left.
	pub life: f64,
	/// Flight budget restored on regrowth.
	pub max_life: f64,
	/// Opacity in [0, 1].
	pub alpha: f64,
	/// Visual scale factor, fixed at init.
	pub size: f64,
	/// Whether the seed rides on the head.
	pub is_attached: bool,
}

impl Seed {
	/// Unit outward direction of the resting position.
	pub fn direction(&self) -> DVec3 {
		self.origin.normalize_or_zero()
	}
}

/// The full set of seeds plus a reusable depth-sort buffer.
pub struct SeedField {
	/// Seeds in creation order.
	pub seeds: Vec<Seed>,
	order: Vec<usize>,
}

impl SeedField {
	/// Place `count` seeds on a sphere of `radius`, all attached and opaque.
	pub fn new<R: Rng>(count: usize, radius: f64, rng: &mut R) -> Self {
		let seeds = fibonacci_sphere(count, radius)
			.into_iter()
			.map(|origin| {
				let max_life = rng.gen_range(200.0..320.0);
				Seed {
					position: origin,
					origin,
					velocity: DVec3::ZERO,
					life: max_life,
					max_life,
					alpha: 1.0,
					size: rng.gen_range(0.6..1.2),
					is_attached: true,
				}
			})
			.collect();

		Self {
			seeds,
			order: (0..count).collect(),
		}
	}

	/// Number of seeds.
	pub fn len(&self) -> usize {
		self.seeds.len()
	}

	/// Whether the head has no seeds at all.
	pub fn is_empty(&self) -> bool {
		self.seeds.is_empty()
	}

	/// Whether every seed rides on the head.
	pub fn all_attached(&self) -> bool {
		self.seeds.iter().all(|s| s.is_attached)
	}

	/// Launch every seed outward, pushed by wind proportional to `blow_strength`.
	///
	/// `angle` is the current head tilt so the burst matches what is on screen.
	pub fn detach_all<R: Rng>(&mut self, blow_strength: f64, angle: f64, rng: &mut R) {
		let wind = DVec3::new(WIND_PUSH, -WIND_LIFT, 0.0) * blow_strength;
		for seed in &mut self.seeds {
			let outward = rotate_z(seed.direction(), angle);
			let magnitude = EXPLOSION_MIN + rng.gen_range(0.0..EXPLOSION_RANGE);
			let jitter = DVec3::new(
				rng.gen_range(-JITTER..JITTER),
				rng.gen_range(-JITTER..JITTER),
				rng.gen_range(-JITTER..JITTER),
			);
			seed.velocity = outward * magnitude + wind + jitter;
			seed.is_attached = false;
		}
	}

	/// Snap every seed back onto the head, invisible, ready to fade in.
	pub fn reattach_all(&mut self) {
		for seed in &mut self.seeds {
			seed.position = seed.origin;
			seed.velocity = DVec3::ZERO;
			seed.is_attached = true;
			seed.alpha = 0.0;
			seed.life = seed.max_life;
		}
	}

	/// Advance all seeds by one frame.
	///
	/// `activity` in [0, 1] scales the breathing of attached seeds; at zero the
	/// head is perfectly still apart from its tilt. While regrowing, attached
	/// seeds are raised to `regrow_alpha` (never lowered).
	pub fn update(&mut self, angle: f64, activity: f64, now_ms: f64, regrow_alpha: Option<f64>) {
		let breath_base = now_ms * BREATH_RATE;
		for (i, seed) in self.seeds.iter_mut().enumerate() {
			if seed.is_attached {
				let breath = (breath_base + i as f64 * BREATH_PHASE_STEP).sin()
					* activity * BREATH_AMPLITUDE;
				let rest = seed.origin + seed.direction() * breath;
				seed.position = rotate_z(rest, angle);
				if let Some(target) = regrow_alpha {
					seed.alpha = seed.alpha.max(target.clamp(0.0, 1.0));
				}
			} else {
				seed.velocity *= SEED_DRAG;
				seed.velocity.y += SEED_GRAVITY;
				seed.position += seed.velocity;
				seed.alpha = (seed.alpha - FLIGHT_FADE).max(0.0);
				seed.life = (seed.life - 1.0).max(0.0);
			}
		}
	}

	/// Reorder the draw list back to front (largest z first).
	pub fn sort_by_depth(&mut self) {
		let seeds = &self.seeds;
		self.order
			.sort_unstable_by(|&a, &b| seeds[b].position.z.total_cmp(&seeds[a].position.z));
	}

	/// Seed indices in the order of the last `sort_by_depth`.
	pub fn draw_order(&self) -> &[usize] {
		&self.order
	}
}
