//! Inputs consumed and events emitted by the dandelion simulation.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use super::dispersal::DispersalState;
use super::theme::ColorTheme;

/// The external signals read at the top of every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInputs {
	/// Horizontal motion in [-1, 1]. Negative tilts the head left.
	pub sway: f64,
	/// Breath intensity in [0, 1].
	pub blow_strength: f64,
	/// Active color theme.
	pub theme: ColorTheme,
}

/// Discrete notifications for the host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowerEvent {
	/// The dispersal state machine entered a new state.
	StateChanged(DispersalState),
	/// A blow dispersed the seeds. Fires once per INTACT -> DISPERSING.
	BlowSuccess,
	/// The head completed one full left-right (or right-left) swing.
	HappySway,
}

/// Latest-value handoff between input producers and the frame driver.
///
/// Each field has a single writer and the frame driver is the only reader.
/// Floats travel as bit patterns so a read never observes a torn value.
#[derive(Debug, Default)]
pub struct InputHandoff {
	sway: AtomicU64,
	blow_strength: AtomicU64,
	theme: AtomicU8,
}

/// Clamp to `[lo, hi]`, mapping NaN to zero.
fn sanitize(value: f64, lo: f64, hi: f64) -> f64 {
	if value.is_nan() { 0.0 } else { value.clamp(lo, hi) }
}

impl InputHandoff {
	/// Handoff reading as rest with the default theme.
	pub fn new() -> Self {
		Self::default()
	}

	/// Publish a sway sample, clamped to [-1, 1].
	pub fn publish_sway(&self, sway: f64) {
		self.sway
			.store(sanitize(sway, -1.0, 1.0).to_bits(), Ordering::Release);
	}

	/// Publish a blow sample, clamped to [0, 1].
	pub fn publish_blow_strength(&self, strength: f64) {
		self.blow_strength
			.store(sanitize(strength, 0.0, 1.0).to_bits(), Ordering::Release);
	}

	/// Publish the active theme.
	pub fn publish_theme(&self, theme: ColorTheme) {
		self.theme.store(theme.to_index(), Ordering::Release);
	}

	/// Read the most recently published value of every input.
	pub fn snapshot(&self) -> FrameInputs {
		FrameInputs {
			sway: f64::from_bits(self.sway.load(Ordering::Acquire)),
			blow_strength: f64::from_bits(self.blow_strength.load(Ordering::Acquire)),
			theme: ColorTheme::from_index(self.theme.load(Ordering::Acquire)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_handoff_reads_as_rest() {
		let handoff = InputHandoff::new();
		assert_eq!(handoff.snapshot(), FrameInputs::default());
	}

	#[test]
	fn snapshot_returns_latest_published_values() {
		let handoff = InputHandoff::new();
		handoff.publish_sway(0.2);
		handoff.publish_sway(-0.4);
		handoff.publish_blow_strength(0.7);
		handoff.publish_theme(ColorTheme::Lavender);

		let inputs = handoff.snapshot();
		assert_eq!(inputs.sway, -0.4);
		assert_eq!(inputs.blow_strength, 0.7);
		assert_eq!(inputs.theme, ColorTheme::Lavender);
	}

	#[test]
	fn out_of_domain_values_are_clamped() {
		let handoff = InputHandoff::new();
		handoff.publish_sway(3.0);
		handoff.publish_blow_strength(-1.0);
		assert_eq!(handoff.snapshot().sway, 1.0);
		assert_eq!(handoff.snapshot().blow_strength, 0.0);

		handoff.publish_sway(f64::NAN);
		assert_eq!(handoff.snapshot().sway, 0.0);
	}
}
