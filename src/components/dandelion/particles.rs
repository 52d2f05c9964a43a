//! Sparkle bursts released when the flower is blown apart.

use std::f64::consts::TAU;

use rand::Rng;

const SPARKLE_DRAG: f64 = 0.95;
const SPARKLE_GRAVITY: f64 = 0.04;

/// A single burst particle in screen space.
#[derive(Clone, Debug, Default)]
pub struct Sparkle {
	/// Position in canvas pixels.
	pub x: f64,
	/// Position in canvas pixels, y down.
	pub y: f64,
	/// Velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity, positive down.
	pub vy: f64,
	/// Frames left. Dead at zero or below.
	pub life: f64,
	/// Lifetime the fade is measured against.
	pub max_life: f64,
	/// Radius in pixels.
	pub size: f64,
	/// Opacity at full life.
	pub alpha: f64,
}

impl Sparkle {
	/// Whether the slot still has life left.
	pub fn is_alive(&self) -> bool {
		self.life > 0.0
	}

	/// Opacity after fading by remaining life.
	pub fn faded_alpha(&self) -> f64 {
		if !self.is_alive() || self.max_life <= 0.0 {
			return 0.0;
		}
		self.alpha * (self.life / self.max_life)
	}
}

/// Fixed-size sparkle pool. Slots are recycled, never reallocated.
pub struct SparklePool {
	/// Fixed slots, reused by every burst.
	pub sparkles: Vec<Sparkle>,
}

impl SparklePool {
	/// Pool of `count` dead slots.
	pub fn new(count: usize) -> Self {
		Self {
			sparkles: vec![Sparkle::default(); count],
		}
	}

	/// Repopulate every slot with a fresh burst centered on `(x, y)`.
	///
	/// `strength` in [0, 1] scales both the burst speed and the sparkle size.
	pub fn trigger<R: Rng>(&mut self, x: f64, y: f64, strength: f64, rng: &mut R) {
		let strength = strength.clamp(0.0, 1.0);
		for s in &mut self.sparkles {
			let angle = rng.gen_range(0.0..TAU);
			let speed = (1.5 + rng.gen_range(0.0..5.0)) * (0.5 + strength);
			let max_life = rng.gen_range(40.0..90.0);
			*s = Sparkle {
				x,
				y,
				vx: angle.cos() * speed,
				vy: angle.sin() * speed,
				life: max_life,
				max_life,
				size: (1.0 + rng.gen_range(0.0..2.5)) * (0.6 + 0.4 * strength),
				alpha: 0.6 + rng.gen_range(0.0..0.4),
			};
		}
	}

	/// Advance live sparkles by one frame.
	pub fn update(&mut self) {
		for s in self.sparkles.iter_mut().filter(|s| s.is_alive()) {
			s.x += s.vx;
			s.y += s.vy;
			s.vx *= SPARKLE_DRAG;
			s.vy = s.vy * SPARKLE_DRAG + SPARKLE_GRAVITY;
			s.life -= 1.0;
		}
	}

	/// Number of slots with life left.
	pub fn live_count(&self) -> usize {
		self.sparkles.iter().filter(|s| s.is_alive()).count()
	}
}
