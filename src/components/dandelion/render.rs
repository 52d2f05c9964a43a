//! Canvas rendering for the dandelion.
//!
//! Drawing happens in layers, back to front:
//! 1. Stem (screen space, quadratic curve from the base to the head)
//! 2. Receptacle glow, core and fuzz (head-local frame, rotated by the tilt)
//! 3. Sparkles, blended additively
//! 4. Seeds, depth sorted, each as stalk + pappus fan + tip dot
//!
//! The renderer only reads [`DandelionState`]; the simulation has already
//! advanced and depth-sorted everything for this frame.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{project, rotate_z};
use super::state::DandelionState;
use super::theme::{Palette, STEM_GREEN};

/// Number of pappus hairs per seed.
const HAIR_COUNT: usize = 7;
/// Angular spacing between neighbouring hairs, in radians.
const HAIR_SPREAD: f64 = 0.28;

/// Renders one complete frame.
pub fn render(state: &DandelionState, ctx: &CanvasRenderingContext2d) {
	let palette = state.inputs.theme.palette();

	ctx.clear_rect(0.0, 0.0, state.width, state.height);

	draw_stem(state, ctx, &palette);
	draw_receptacle(state, ctx, &palette);
	draw_sparkles(state, ctx, &palette);
	draw_seeds(state, ctx, &palette);

	let _ = ctx.set_global_composite_operation("source-over");
	ctx.set_global_alpha(1.0);
}

fn draw_stem(state: &DandelionState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	let scaled = &state.scaled;
	let (hx, hy) = state.head_position();
	let (cx, cy) = scaled.stem_control(state.angle());

	let gradient = ctx.create_linear_gradient(scaled.base_x, scaled.base_y, hx, hy);
	let _ = gradient.add_color_stop(0.0, &STEM_GREEN.to_css());
	let _ = gradient.add_color_stop(1.0, &palette.mid.to_css());

	ctx.set_line_cap("round");
	#[allow(deprecated)]
	ctx.set_stroke_style(&gradient);
	ctx.set_line_width(scaled.stem_width);
	ctx.begin_path();
	ctx.move_to(scaled.base_x, scaled.base_y);
	ctx.quadratic_curve_to(cx, cy, hx, hy);
	ctx.stroke();

	// Faint highlight along the lit edge
	let offset = scaled.stem_width * 0.25;
	ctx.set_stroke_style_str(&STEM_GREEN.lighten(0.7).with_alpha(0.18).to_css());
	ctx.set_line_width(scaled.stem_width * 0.3);
	ctx.begin_path();
	ctx.move_to(scaled.base_x - offset, scaled.base_y);
	ctx.quadratic_curve_to(cx - offset, cy, hx - offset, hy);
	ctx.stroke();
}

fn draw_receptacle(state: &DandelionState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	let scaled = &state.scaled;
	let (hx, hy) = state.head_position();
	let r = scaled.core_radius;

	ctx.save();
	let _ = ctx.translate(hx, hy);
	let _ = ctx.rotate(state.angle());

	// Soft outer glow
	if let Ok(glow) = ctx.create_radial_gradient(0.0, 0.0, r * 0.8, 0.0, 0.0, scaled.glow_radius) {
		let _ = glow.add_color_stop(0.0, &palette.core.with_alpha(0.35).to_css());
		let _ = glow.add_color_stop(1.0, &palette.core.with_alpha(0.0).to_css());
		#[allow(deprecated)]
		ctx.set_fill_style(&glow);
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, scaled.glow_radius, 0.0, PI * 2.0);
		ctx.fill();
	}

	if let Ok(core) = ctx.create_radial_gradient(-r * 0.3, -r * 0.3, 0.0, 0.0, 0.0, r) {
		let _ = core.add_color_stop(0.0, &palette.core.lighten(0.25).to_css());
		let _ = core.add_color_stop(0.7, &palette.core.to_css());
		let _ = core.add_color_stop(1.0, &palette.mid.to_css());
		#[allow(deprecated)]
		ctx.set_fill_style(&core);
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, r, 0.0, PI * 2.0);
		ctx.fill();
	}

	let unit = scaled.unit;
	ctx.set_line_width(unit);
	for strand in &state.fluff {
		let (x, y) = (strand.x * unit, strand.y * unit);
		let len = strand.length * unit;
		ctx.set_stroke_style_str(&palette.mid.with_alpha(strand.alpha).to_css());
		ctx.begin_path();
		ctx.move_to(x, y);
		ctx.line_to(x + strand.angle.cos() * len, y + strand.angle.sin() * len);
		ctx.stroke();
	}

	ctx.restore();
}

fn draw_sparkles(state: &DandelionState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	if state.sparkles.live_count() == 0 {
		return;
	}

	let _ = ctx.set_global_composite_operation("screen");
	let color = palette.sparkle;
	let unit = state.scaled.unit;

	for s in state.sparkles.sparkles.iter().filter(|s| s.is_alive()) {
		ctx.set_fill_style_str(&color.with_alpha(s.faded_alpha()).to_css());
		ctx.begin_path();
		let _ = ctx.arc(s.x, s.y, s.size * unit, 0.0, PI * 2.0);
		ctx.fill();
	}

	let _ = ctx.set_global_composite_operation("source-over");
}

fn draw_seeds(state: &DandelionState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	if state.seeds.is_empty() {
		return;
	}
	let scaled = &state.scaled;
	let cull = &state.scale_config;
	let anchor = state.head_position();
	let angle = state.angle();
	let focal = state.config.focal_length;
	let (mid_css, tip_css) = (palette.mid.to_css(), palette.tip.to_css());

	ctx.set_line_cap("round");

	for &i in state.seeds.draw_order() {
		let seed = &state.seeds.seeds[i];
		if seed.alpha < cull.cull_alpha {
			continue;
		}
		let p = project(seed.position, anchor, focal, scaled.unit);
		if p.scale < cull.cull_scale {
			continue;
		}

		let facing = rotate_z(seed.direction(), angle);
		let flat = (facing.x * facing.x + facing.y * facing.y).sqrt();
		// Seeds pointing straight at (or away from) the viewer get a nominal upward stalk
		let (dx, dy) = if flat < 1e-3 {
			(0.0, -1.0)
		} else {
			(facing.x / flat, facing.y / flat)
		};

		let size = p.scale * seed.size;
		let stalk = scaled.stalk_length * size * flat.max(0.3);
		let depth_shade = ((p.scale - 0.7) / 0.6).clamp(0.35, 1.0);
		ctx.set_global_alpha(seed.alpha * depth_shade);

		ctx.set_stroke_style_str(&mid_css);
		ctx.set_line_width(0.6 * size);
		ctx.begin_path();
		ctx.move_to(p.x - dx * stalk, p.y - dy * stalk);
		ctx.line_to(p.x, p.y);
		ctx.stroke();

		let heading = dy.atan2(dx);
		let hair = scaled.hair_length * size;
		ctx.set_stroke_style_str(&tip_css);
		ctx.set_line_width(0.4 * size);
		ctx.begin_path();
		for k in 0..HAIR_COUNT {
			let a = heading + (k as f64 - (HAIR_COUNT / 2) as f64) * HAIR_SPREAD;
			ctx.move_to(p.x, p.y);
			ctx.line_to(p.x + a.cos() * hair, p.y + a.sin() * hair);
		}
		ctx.stroke();

		ctx.set_fill_style_str(&tip_css);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, 1.1 * size, 0.0, PI * 2.0);
		ctx.fill();
	}

	ctx.set_global_alpha(1.0);
}
