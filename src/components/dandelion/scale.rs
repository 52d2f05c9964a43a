//! Display scaling and per-frame layout.
//!
//! World units are pixels on a wide canvas. Narrow (phone-sized) canvases
//! shrink everything by a fixed factor so the whole flower stays visible.
//!
//! The stem pivots around its base like an inverted pendulum: the head sits
//! `stem_length` away from the base along the tilt angle.

use super::config::FlowerConfig;

/// Screen-size dependent parameters.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Canvas widths below this count as narrow.
	pub narrow_breakpoint: f64,
	/// Reduction applied on narrow canvases.
	pub narrow_factor: f64,
	/// Distance of the stem base above the bottom edge, in world units.
	pub base_margin: f64,
	/// Seeds fainter than this are not drawn.
	pub cull_alpha: f64,
	/// Seeds projected smaller than this are not drawn.
	pub cull_scale: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			narrow_breakpoint: 600.0,
			narrow_factor: 0.6,
			base_margin: 40.0,
			cull_alpha: 0.01,
			cull_scale: 0.05,
		}
	}
}

impl ScaleConfig {
	/// World-to-pixel factor for a canvas of the given width.
	pub fn unit(&self, width: f64) -> f64 {
		if width < self.narrow_breakpoint {
			self.narrow_factor
		} else {
			1.0
		}
	}
}

/// Pixel sizes for the current frame.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// World-to-pixel factor.
	pub unit: f64,
	/// Stem length in pixels.
	pub stem_length: f64,
	/// Stem width at the base.
	pub stem_width: f64,
	/// Receptacle radius in pixels.
	pub core_radius: f64,
	/// Outer radius of the receptacle glow.
	pub glow_radius: f64,
	/// Length of a seed's stalk before perspective.
	pub stalk_length: f64,
	/// Length of a pappus hair before perspective.
	pub hair_length: f64,
	/// Stem base in canvas pixels.
	pub base_x: f64,
	/// Stem base height, a margin above the bottom edge.
	pub base_y: f64,
}

impl ScaledValues {
	/// Compute the layout for a `width` by `height` canvas.
	pub fn new(config: &ScaleConfig, flower: &FlowerConfig, width: f64, height: f64) -> Self {
		let unit = config.unit(width);
		Self {
			unit,
			stem_length: flower.stem_length * unit,
			stem_width: 6.0 * unit,
			core_radius: flower.core_radius * unit,
			glow_radius: flower.core_radius * 2.2 * unit,
			stalk_length: 14.0 * unit,
			hair_length: 9.0 * unit,
			base_x: width / 2.0,
			base_y: height - config.base_margin * unit,
		}
	}

	/// Head center for a stem tilted by `angle` radians.
	pub fn head_position(&self, angle: f64) -> (f64, f64) {
		(
			self.base_x + angle.sin() * self.stem_length,
			self.base_y - angle.cos() * self.stem_length,
		)
	}

	/// Quadratic control point bending the stem towards the lean.
	pub fn stem_control(&self, angle: f64) -> (f64, f64) {
		let (hx, hy) = self.head_position(angle);
		(
			self.base_x + (hx - self.base_x) * 0.2,
			self.base_y + (hy - self.base_y) * 0.55,
		)
	}
}
