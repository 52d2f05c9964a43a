//! Leptos component wrapping the dandelion canvas.
//!
//! The component creates an HTML canvas, builds the simulation once the
//! canvas is mounted, and drives it from `requestAnimationFrame`. Input
//! signals are copied into an [`InputHandoff`] whenever they change; each
//! frame snapshots the handoff, so the loop always sees the latest values
//! rather than whatever was current when the closure was created.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::FlowerConfig;
use super::render;
use super::state::DandelionState;
use super::theme::ColorTheme;
use super::types::{FlowerEvent, InputHandoff};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type ResizeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything the frame driver registers with the browser, kept where
/// cleanup can reach it.
#[derive(Clone)]
struct DriverHandles {
	context: Rc<RefCell<Option<DandelionState>>>,
	animate: FrameCallback,
	resize: ResizeCallback,
	alive: Rc<Cell<bool>>,
	frame_handle: Rc<Cell<i32>>,
}

impl Default for DriverHandles {
	fn default() -> Self {
		Self {
			context: Rc::default(),
			animate: Rc::default(),
			resize: Rc::default(),
			alive: Rc::new(Cell::new(true)),
			frame_handle: Rc::default(),
		}
	}
}

impl DriverHandles {
	/// Stop the loop and release every browser registration.
	///
	/// Drops the animation closure, which otherwise keeps itself (and the
	/// simulation) alive through its own reschedule handle.
	fn shutdown(&self) {
		self.stop_simulation();
		let resize = self.resize.borrow_mut().take();
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(self.frame_handle.get());
			if let Some(ref cb) = resize {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		drop(resize);
		drop(self.animate.borrow_mut().take());
		debug!("dandelion: frame driver shut down");
	}

	/// Mark the loop dead and hand back the torn-down simulation, if any.
	fn stop_simulation(&self) -> Option<DandelionState> {
		self.alive.set(false);
		let mut state = self.context.borrow_mut().take()?;
		state.teardown();
		Some(state)
	}
}

/// Canvas size: the window in fullscreen mode, else explicit or parent size.
fn surface_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return window_size(window);
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Renders an interactive dandelion on a canvas element.
///
/// `sway` in [-1, 1] tilts the flower, `blow_strength` in [0, 1] blows it
/// apart once it crosses the configured threshold, and `theme` picks the
/// palette. Events (state changes, blow success, happy sway) are forwarded to
/// `on_event` after each frame.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
#[component]
pub fn DandelionCanvas(
	#[prop(into)] sway: Signal<f64>,
	#[prop(into)] blow_strength: Signal<f64>,
	#[prop(into)] theme: Signal<ColorTheme>,
	#[prop(optional)] config: Option<FlowerConfig>,
	#[prop(optional)] on_event: Option<Callback<FlowerEvent>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handoff = Arc::new(InputHandoff::new());
	let handles = StoredValue::new_local(DriverHandles::default());

	let handoff_publish = handoff.clone();
	Effect::new(move |_| {
		handoff_publish.publish_sway(sway.get());
		handoff_publish.publish_blow_strength(blow_strength.get());
		handoff_publish.publish_theme(theme.get());
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(driver) = handles.try_with_value(DriverHandles::clone) else {
			return;
		};
		if !driver.alive.get() || driver.context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("dandelion: no window, not starting");
			return;
		};

		let (w, h) = surface_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("dandelion: 2d canvas context unavailable, not starting");
			return;
		};

		let rng_seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		*driver.context.borrow_mut() = Some(DandelionState::new(
			config.clone().unwrap_or_default(),
			w,
			h,
			rng_seed,
		));

		if fullscreen {
			let (context_resize, canvas_resize) = (driver.context.clone(), canvas.clone());
			*driver.resize.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut state) = *context_resize.borrow_mut() {
					state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *driver.resize.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, handoff_anim, alive_anim, handle_anim) = (
			driver.context.clone(),
			driver.animate.clone(),
			handoff.clone(),
			driver.alive.clone(),
			driver.frame_handle.clone(),
		);
		*driver.animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if !alive_anim.get() {
				return;
			}

			let mut events = Vec::new();
			if let Some(ref mut state) = *context_anim.borrow_mut() {
				state.tick(now, handoff_anim.snapshot());
				render::render(state, &ctx);
				events.extend(state.drain_events());
			}
			if let Some(cb) = on_event {
				for event in events {
					cb.run(event);
				}
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
						handle_anim.set(id);
					}
				}
			}
		}));
		if let Some(ref cb) = *driver.animate.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				driver.frame_handle.set(id);
			}
		}
	});

	// Cleanup runs before the owner disposes its stored values.
	on_cleanup(move || {
		handles.try_with_value(DriverHandles::shutdown);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="dandelion-canvas"
			style="display: block; touch-action: none;"
		/>
	}
}
