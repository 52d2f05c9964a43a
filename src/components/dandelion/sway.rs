//! Damped spring turning the raw sway signal into a head tilt angle.
//!
//! Constants are per frame at a 60 Hz display refresh. At other refresh rates
//! the flower simply feels stiffer or looser.

/// Raw sway magnitudes below this snap to zero.
pub const SWAY_DEADZONE: f64 = 0.05;
/// Tilt in radians for a full-scale sway input.
pub const MAX_TILT: f64 = 0.5;
/// Spring stiffness per frame.
pub const SPRING_K: f64 = 0.008;
/// Velocity retained per frame.
pub const SPRING_DAMPING: f64 = 0.95;

const AMBIENT_AMPLITUDE_SLOW: f64 = 0.03;
const AMBIENT_AMPLITUDE_FAST: f64 = 0.015;
const AMBIENT_RATE_SLOW: f64 = 0.0006;
const AMBIENT_RATE_FAST: f64 = 0.0014;

/// Largest angle the idle drift can produce, spring overshoot included.
pub const AMBIENT_BOUND: f64 = 0.05;

/// Zero out jitter around rest.
pub fn apply_deadzone(raw: f64) -> f64 {
	if raw.abs() < SWAY_DEADZONE { 0.0 } else { raw }
}

/// Slow idle oscillation so the flower never looks frozen.
pub fn ambient_drift(now_ms: f64) -> f64 {
	(now_ms * AMBIENT_RATE_SLOW).sin() * AMBIENT_AMPLITUDE_SLOW
		+ (now_ms * AMBIENT_RATE_FAST).sin() * AMBIENT_AMPLITUDE_FAST
}

/// One-degree-of-freedom spring state for the head tilt.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwayPhysics {
	/// Head tilt in radians. Negative leans left.
	pub angle: f64,
	/// Angular velocity in radians per frame.
	pub velocity: f64,
}

impl SwayPhysics {
	/// Target angle for a raw input at time `now_ms`.
	pub fn target(raw: f64, now_ms: f64) -> f64 {
		apply_deadzone(raw) * MAX_TILT + ambient_drift(now_ms)
	}

	/// Advance one frame towards `target` and return the new angle.
	pub fn step_towards(&mut self, target: f64) -> f64 {
		self.velocity += (target - self.angle) * SPRING_K;
		self.velocity *= SPRING_DAMPING;
		self.angle += self.velocity;
		self.angle
	}

	/// Advance one frame from a raw sway sample.
	pub fn update(&mut self, raw: f64, now_ms: f64) -> f64 {
		self.step_towards(Self::target(raw, now_ms))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	#[test]
	fn deadzone_snaps_small_values() {
		assert_eq!(apply_deadzone(0.049), 0.0);
		assert_eq!(apply_deadzone(-0.02), 0.0);
		assert_eq!(apply_deadzone(0.3), 0.3);
		assert_eq!(apply_deadzone(-0.3), -0.3);
	}

	#[test]
	fn constant_target_converges_with_shrinking_envelope() {
		let mut physics = SwayPhysics::default();
		let target = 0.35;
		let mut envelopes = Vec::new();
		for _ in 0..6 {
			let mut worst: f64 = 0.0;
			for _ in 0..100 {
				worst = worst.max((physics.step_towards(target) - target).abs());
			}
			envelopes.push(worst);
		}
		for pair in envelopes.windows(2) {
			assert!(pair[1] < pair[0], "envelopes {envelopes:?}");
		}
		assert!((physics.angle - target).abs() < 1e-4);
	}

	#[test]
	fn held_input_settles_on_blended_target() {
		let mut physics = SwayPhysics::default();
		let mut now = 0.0;
		for _ in 0..600 {
			now += FRAME_MS;
			physics.update(-0.6, now);
		}
		let expected = -0.6 * MAX_TILT;
		assert!((physics.angle - expected).abs() <= AMBIENT_BOUND);
	}

	#[test]
	fn idle_drift_stays_within_bound() {
		let mut physics = SwayPhysics::default();
		let mut now = 0.0;
		for _ in 0..20_000 {
			now += FRAME_MS;
			let angle = physics.update(0.0, now);
			assert!(angle.is_finite());
			assert!(angle.abs() <= AMBIENT_BOUND, "angle {angle} at {now}");
		}
	}

	#[test]
	fn jitter_inside_deadzone_matches_idle() {
		let mut jittery = SwayPhysics::default();
		let mut idle = SwayPhysics::default();
		let mut now = 0.0;
		for i in 0..300 {
			now += FRAME_MS;
			let noise = if i % 2 == 0 { 0.04 } else { -0.04 };
			jittery.update(noise, now);
			idle.update(0.0, now);
		}
		assert_eq!(jittery, idle);
	}
}
