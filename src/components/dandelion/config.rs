//! Flower configuration.
//!
//! Loaded once at mount. Every field has a default so a partial JSON object
//! (or none at all) yields a working flower.

use serde::Deserialize;

use super::theme::ColorTheme;

/// Tunable parameters for one dandelion instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowerConfig {
	/// Number of seed particles on the head.
	pub seed_count: usize,
	/// Head radius in world units (before display scaling).
	pub head_radius: f64,
	/// Stem length in world units (before display scaling).
	pub stem_length: f64,
	/// Receptacle core radius in world units.
	pub core_radius: f64,
	/// Perspective focal length used for `focal / (focal + z)`.
	pub focal_length: f64,
	/// Blow strength above which an intact flower disperses.
	pub blow_threshold: f64,
	/// Milliseconds spent dispersing before regrowth starts.
	pub disperse_dwell_ms: f64,
	/// Milliseconds spent regrowing before the flower is intact again.
	pub regrow_dwell_ms: f64,
	/// Size of the recycled sparkle pool.
	pub sparkle_count: usize,
	/// Number of static fuzz strands on the receptacle.
	pub fluff_count: usize,
	/// Theme used until the host selects another.
	pub theme: ColorTheme,
}

impl Default for FlowerConfig {
	fn default() -> Self {
		Self {
			seed_count: 1500,
			head_radius: 160.0,
			stem_length: 320.0,
			core_radius: 26.0,
			focal_length: 600.0,
			blow_threshold: 0.35,
			disperse_dwell_ms: 4000.0,
			regrow_dwell_ms: 2500.0,
			sparkle_count: 60,
			fluff_count: 90,
			theme: ColorTheme::White,
		}
	}
}
