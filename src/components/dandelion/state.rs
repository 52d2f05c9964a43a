//! Simulation context for one dandelion.
//!
//! Owns every particle pool and state machine. Created once when the
//! component mounts, then advanced by `tick` once per animation frame with
//! the latest input values. Drawing reads this state but never mutates it.

use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FlowerConfig;
use super::dispersal::{DispersalMachine, DispersalState};
use super::fluff::{self, FluffStrand};
use super::gesture::GestureDetector;
use super::particles::SparklePool;
use super::scale::{ScaleConfig, ScaledValues};
use super::seeds::SeedField;
use super::sway::SwayPhysics;
use super::types::{FlowerEvent, FrameInputs};

/// Share of the regrow dwell spent fading seeds back in.
const REGROW_FADE_SHARE: f64 = 0.6;

/// Everything that persists between frames for a single flower.
pub struct DandelionState {
	/// Flower parameters fixed at creation.
	pub config: FlowerConfig,
	/// Responsive layout rules.
	pub scale_config: ScaleConfig,
	/// Seed particles of the head.
	pub seeds: SeedField,
	/// Burst particles.
	pub sparkles: SparklePool,
	/// Receptacle strands, generated once.
	pub fluff: Vec<FluffStrand>,
	/// Head tilt spring.
	pub sway: SwayPhysics,
	/// Happy-sway tracker.
	pub gesture: GestureDetector,
	/// Life cycle and its pending timer.
	pub dispersal: DispersalMachine,
	/// Inputs seen by the most recent tick.
	pub inputs: FrameInputs,
	/// Layout computed by the most recent tick.
	pub scaled: ScaledValues,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Timestamp (ms) of the most recent tick.
	pub time_ms: f64,
	rng: SmallRng,
	events: Vec<FlowerEvent>,
}

impl DandelionState {
	/// Build the flower. `rng_seed` fixes every random choice (sizes, bursts).
	pub fn new(config: FlowerConfig, width: f64, height: f64, rng_seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(rng_seed);
		let scale_config = ScaleConfig::default();
		let seeds = SeedField::new(config.seed_count, config.head_radius, &mut rng);
		let fluff = fluff::scatter(config.fluff_count, config.core_radius, &mut rng);
		let sparkles = SparklePool::new(config.sparkle_count);
		let dispersal = DispersalMachine::new(
			config.blow_threshold,
			config.disperse_dwell_ms,
			config.regrow_dwell_ms,
		);
		let scaled = ScaledValues::new(&scale_config, &config, width, height);
		let inputs = FrameInputs {
			theme: config.theme,
			..FrameInputs::default()
		};

		info!(
			"dandelion: {} seeds, radius {}, {}x{}",
			seeds.len(),
			config.head_radius,
			width,
			height
		);

		Self {
			config,
			scale_config,
			seeds,
			sparkles,
			fluff,
			sway: SwayPhysics::default(),
			gesture: GestureDetector::new(),
			dispersal,
			inputs,
			scaled,
			width,
			height,
			time_ms: 0.0,
			rng,
			events: Vec::new(),
		}
	}

	/// Current life-cycle state.
	pub fn state(&self) -> DispersalState {
		self.dispersal.state()
	}

	/// Current head tilt in radians.
	pub fn angle(&self) -> f64 {
		self.sway.angle
	}

	/// Head center in canvas pixels.
	pub fn head_position(&self) -> (f64, f64) {
		self.scaled.head_position(self.sway.angle)
	}

	/// Combined disturbance in [0, 1] driving the head's breathing.
	pub fn activity(&self) -> f64 {
		(self.inputs.sway.abs() + self.inputs.blow_strength).min(1.0)
	}

	/// Advance the simulation by one frame.
	pub fn tick(&mut self, now_ms: f64, inputs: FrameInputs) {
		self.time_ms = now_ms;
		self.inputs = inputs;
		self.scaled = ScaledValues::new(&self.scale_config, &self.config, self.width, self.height);

		let angle = self.sway.update(inputs.sway, now_ms);
		if self.gesture.update(angle) {
			info!("dandelion: happy sway");
			self.events.push(FlowerEvent::HappySway);
		}

		let entered = self.dispersal.poll(now_ms);
		if let Some(entered) = entered {
			if entered == DispersalState::Regrowing {
				self.seeds.reattach_all();
			}
			self.events.push(FlowerEvent::StateChanged(entered));
		}

		if self.dispersal.try_blow(inputs.blow_strength, now_ms) {
			info!("dandelion: blown at strength {:.2}", inputs.blow_strength);
			self.seeds
				.detach_all(inputs.blow_strength, angle, &mut self.rng);
			let (hx, hy) = self.scaled.head_position(angle);
			self.sparkles
				.trigger(hx, hy, inputs.blow_strength, &mut self.rng);
			self.events
				.push(FlowerEvent::StateChanged(DispersalState::Dispersing));
			self.events.push(FlowerEvent::BlowSuccess);
		}

		self.sparkles.update();

		let regrow_alpha = match self.state() {
			DispersalState::Regrowing => Some(self.regrow_alpha(now_ms)),
			// Last step of the fade, however few frames the dwell got.
			DispersalState::Intact if entered == Some(DispersalState::Intact) => Some(1.0),
			_ => None,
		};
		let activity = self.activity();
		self.seeds.update(angle, activity, now_ms, regrow_alpha);
		self.seeds.sort_by_depth();
	}

	/// Seed opacity while regrowing, from time spent in the state.
	fn regrow_alpha(&self, now_ms: f64) -> f64 {
		let fade_ms = self.config.regrow_dwell_ms * REGROW_FADE_SHARE;
		if fade_ms <= 0.0 {
			return 1.0;
		}
		(self.dispersal.elapsed_ms(now_ms) / fade_ms).min(1.0)
	}

	/// Hand queued events to the host, oldest first.
	pub fn drain_events(&mut self) -> std::vec::Drain<'_, FlowerEvent> {
		self.events.drain(..)
	}

	/// Adopt a new canvas size. Layout follows on the next tick.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Invalidate pending timed transitions so nothing fires after unmount.
	pub fn teardown(&mut self) {
		self.dispersal.cancel();
		self.events.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dandelion::geometry::rotate_z;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	/// Drives a state frame by frame with a running clock.
	struct Harness {
		state: DandelionState,
		now: f64,
		events: Vec<FlowerEvent>,
	}

	impl Harness {
		fn new() -> Self {
			Self {
				state: DandelionState::new(FlowerConfig::default(), 1280.0, 900.0, 42),
				now: 0.0,
				events: Vec::new(),
			}
		}

		fn run(&mut self, frames: usize, sway: f64, blow_strength: f64) {
			self.run_at(FRAME_MS, frames, sway, blow_strength);
		}

		fn run_at(&mut self, frame_ms: f64, frames: usize, sway: f64, blow_strength: f64) {
			for _ in 0..frames {
				self.now += frame_ms;
				self.state.tick(
					self.now,
					FrameInputs {
						sway,
						blow_strength,
						..FrameInputs::default()
					},
				);
				self.events.extend(self.state.drain_events());
			}
		}

		fn count(&self, event: FlowerEvent) -> usize {
			self.events.iter().filter(|&&e| e == event).count()
		}
	}

	#[test]
	fn default_flower_starts_intact() {
		let h = Harness::new();
		assert_eq!(h.state.seeds.len(), 1500);
		assert!(h.state.seeds.all_attached());
		assert_eq!(h.state.state(), DispersalState::Intact);
		for s in &h.state.seeds.seeds {
			assert!((s.origin.length() - 160.0).abs() < 1e-9);
		}
	}

	#[test]
	fn strong_blow_detaches_everything_in_one_frame() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		assert_eq!(h.state.state(), DispersalState::Dispersing);
		assert!(h.state.seeds.seeds.iter().all(|s| !s.is_attached));
		assert!(h.state.seeds.seeds.iter().all(|s| s.velocity.length() > 0.0));
		assert_eq!(h.count(FlowerEvent::BlowSuccess), 1);
		assert_eq!(
			h.count(FlowerEvent::StateChanged(DispersalState::Dispersing)),
			1
		);
		assert_eq!(h.state.sparkles.live_count(), h.state.config.sparkle_count);
	}

	#[test]
	fn held_blow_disperses_only_once() {
		let mut h = Harness::new();
		h.run(60, 0.0, 1.0);
		assert_eq!(h.count(FlowerEvent::BlowSuccess), 1);
	}

	#[test]
	fn weak_breath_leaves_the_flower_alone() {
		let mut h = Harness::new();
		h.run(120, 0.0, 0.2);
		assert_eq!(h.state.state(), DispersalState::Intact);
		assert!(h.state.seeds.all_attached());
		assert!(h.events.is_empty());
	}

	#[test]
	fn swing_left_right_left_is_one_happy_sway() {
		let mut h = Harness::new();
		h.run(200, -0.5, 0.0);
		assert_eq!(h.count(FlowerEvent::HappySway), 0);
		h.run(200, 0.5, 0.0);
		assert_eq!(h.count(FlowerEvent::HappySway), 1);
		h.run(200, -0.5, 0.0);
		assert_eq!(h.count(FlowerEvent::HappySway), 1);
	}

	#[test]
	fn staying_on_one_side_never_celebrates() {
		let mut h = Harness::new();
		h.run(200, 0.6, 0.0);
		h.run(200, 0.0, 0.0);
		h.run(200, 0.6, 0.0);
		assert_eq!(h.count(FlowerEvent::HappySway), 0);
	}

	#[test]
	fn full_life_cycle_returns_to_intact_and_opaque() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);

		// Keep blowing: must not re-trigger while dispersing.
		let disperse_frames = (h.state.config.disperse_dwell_ms / FRAME_MS).ceil() as usize + 2;
		h.run(disperse_frames, 0.0, 0.9);
		assert_eq!(h.state.state(), DispersalState::Regrowing);
		assert_eq!(h.count(FlowerEvent::BlowSuccess), 1);
		assert!(h.state.seeds.all_attached());
		for s in &h.state.seeds.seeds {
			assert!(s.alpha <= 0.031);
		}

		let regrow_frames = (h.state.config.regrow_dwell_ms / FRAME_MS).ceil() as usize + 2;
		h.run(regrow_frames, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Intact);
		assert!(h.state.seeds.seeds.iter().all(|s| (s.alpha - 1.0).abs() < 1e-9));

		let states: Vec<_> = h
			.events
			.iter()
			.filter_map(|e| match e {
				FlowerEvent::StateChanged(s) => Some(*s),
				_ => None,
			})
			.collect();
		assert_eq!(
			states,
			vec![
				DispersalState::Dispersing,
				DispersalState::Regrowing,
				DispersalState::Intact
			]
		);
	}

	#[test]
	fn slow_displays_still_regrow_fully_opaque() {
		let mut h = Harness::new();
		h.run_at(1000.0 / 30.0, 1, 0.0, 0.9);
		h.run_at(1000.0 / 30.0, 400, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Intact);
		assert!(h.state.seeds.seeds.iter().all(|s| s.alpha == 1.0));
	}

	#[test]
	fn regrowth_skipped_by_a_hidden_tab_ends_opaque() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		h.run_at(4100.0, 1, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Regrowing);
		assert!(h.state.seeds.seeds.iter().all(|s| s.alpha == 0.0));

		// One throttled frame lands after the regrow dwell has passed.
		h.run_at(3000.0, 1, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Intact);
		assert!(h.state.seeds.seeds.iter().all(|s| s.alpha == 1.0));
	}

	#[test]
	fn regrow_fade_follows_elapsed_time() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		h.run_at(4100.0, 1, 0.0, 0.0);
		let fade_ms = h.state.config.regrow_dwell_ms * REGROW_FADE_SHARE;
		h.run_at(fade_ms / 2.0, 1, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Regrowing);
		for s in &h.state.seeds.seeds {
			assert!((s.alpha - 0.5).abs() < 1e-9);
		}
	}

	#[test]
	fn regrown_flower_can_be_blown_again() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		h.run(500, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Intact);
		h.run(1, 0.0, 0.9);
		assert_eq!(h.count(FlowerEvent::BlowSuccess), 2);
	}

	#[test]
	fn regrowth_snaps_seeds_back_to_origin() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		h.state.tick(
			h.now + h.state.config.disperse_dwell_ms,
			FrameInputs::default(),
		);
		assert_eq!(h.state.state(), DispersalState::Regrowing);
		// The regrowth frame already ran one attached update (no activity, idle tilt).
		let angle = h.state.angle();
		for s in &h.state.seeds.seeds {
			let expected = rotate_z(s.origin, angle);
			assert!(s.position.distance(expected) < 1e-9);
			assert_eq!(s.velocity, glam::DVec3::ZERO);
		}
	}

	#[test]
	fn teardown_cancels_the_pending_regrowth() {
		let mut h = Harness::new();
		h.run(1, 0.0, 0.9);
		h.state.teardown();
		h.run(600, 0.0, 0.0);
		assert_eq!(h.state.state(), DispersalState::Dispersing);
	}

	#[test]
	fn sparkles_burst_from_the_head() {
		let mut h = Harness::new();
		h.run(30, 0.0, 0.0);
		let (hx, hy) = h.state.head_position();
		h.state.tick(
			h.now + FRAME_MS,
			FrameInputs {
				blow_strength: 1.0,
				..FrameInputs::default()
			},
		);
		let (cx, cy) = h
			.state
			.sparkles
			.sparkles
			.iter()
			.fold((0.0, 0.0), |(x, y), s| (x + s.x - s.vx / 0.95, y + s.y));
		let n = h.state.sparkles.sparkles.len() as f64;
		assert!((cx / n - hx).abs() < 2.0);
		assert!((cy / n - hy).abs() < 10.0);
	}

	#[test]
	fn resize_moves_the_stem_base() {
		let mut h = Harness::new();
		h.state.resize(400.0, 700.0);
		h.run(1, 0.0, 0.0);
		assert_eq!(h.state.scaled.base_x, 200.0);
		assert_eq!(h.state.scaled.unit, 0.6);
	}
}
