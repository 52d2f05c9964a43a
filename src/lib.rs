//! dandelion-wish: an interactive dandelion you can sway and blow apart.
//!
//! This crate provides a WASM-based canvas component that animates a
//! dandelion head of particle seeds. Two scalar signals drive it: `sway`
//! tilts the stem and `blow_strength` disperses the seeds, which then regrow.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MouseEvent, Window};

pub mod components;

pub use components::dandelion::{
	ColorTheme, DandelionCanvas, DandelionState, DispersalState, FlowerConfig, FlowerEvent,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("dandelion-wish: logging initialized");
}

/// Load flower configuration from a script element with id="dandelion-config".
/// Expected format: JSON object with any subset of [`FlowerConfig`] fields.
fn load_flower_config() -> Option<FlowerConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("dandelion-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FlowerConfig>(&json_text) {
		Ok(config) => {
			info!(
				"dandelion-wish: loaded config ({} seeds, theme {})",
				config.seed_count, config.theme
			);
			Some(config)
		}
		Err(e) => {
			warn!("dandelion-wish: failed to parse config: {}", e);
			None
		}
	}
}

/// Map a pointer's horizontal position to a sway value in [-1, 1].
///
/// The left edge is -1, the right edge +1. A zero-width surface reads as rest.
pub fn pointer_sway(client_x: f64, surface_width: f64) -> f64 {
	if surface_width <= 0.0 {
		return 0.0;
	}
	(client_x / surface_width * 2.0 - 1.0).clamp(-1.0, 1.0)
}

/// Main application component.
///
/// Stands in for the camera and microphone: moving the pointer sways the
/// flower and holding the button down blows on it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_flower_config().unwrap_or_default();
	let (sway, set_sway) = signal(0.0_f64);
	let (blow, set_blow) = signal(0.0_f64);
	let (theme, set_theme) = signal(config.theme);
	let (phase, set_phase) = signal(DispersalState::Intact);
	let (happy_sways, set_happy_sways) = signal(0_u32);

	let on_event = Callback::new(move |event: FlowerEvent| match event {
		FlowerEvent::StateChanged(state) => set_phase.set(state),
		FlowerEvent::BlowSuccess => info!("dandelion-wish: wish made"),
		FlowerEvent::HappySway => set_happy_sways.update(|n| *n += 1),
	});

	let on_mousemove = move |ev: MouseEvent| {
		let width = web_sys::window()
			.and_then(|w| w.inner_width().ok())
			.and_then(|v| v.as_f64())
			.unwrap_or(0.0);
		set_sway.set(pointer_sway(ev.client_x() as f64, width));
	};
	let on_mouseleave = move |_: MouseEvent| {
		set_sway.set(0.0);
		set_blow.set(0.0);
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Dandelion Wish" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div
			class="fullscreen-flower"
			on:mousemove=on_mousemove
			on:mousedown=move |_: MouseEvent| set_blow.set(1.0)
			on:mouseup=move |_: MouseEvent| set_blow.set(0.0)
			on:mouseleave=on_mouseleave
		>
			<DandelionCanvas
				sway=sway
				blow_strength=blow
				theme=theme
				config=config
				on_event=on_event
				fullscreen=true
			/>
			<div class="flower-overlay">
				<h1>"Dandelion Wish"</h1>
				<p class="subtitle">"Move to sway the flower. Hold the button to blow."</p>
				<p class="status">
					{move || phase.get().to_string()}
					" · happy sways: "
					{move || happy_sways.get()}
				</p>
				<select
					class="theme-select"
					prop:value=move || theme.get().as_str()
					on:change=move |ev| {
						if let Ok(t) = event_target_value(&ev).parse::<ColorTheme>() {
							set_theme.set(t);
						}
					}
				>
					{ColorTheme::ALL
						.into_iter()
						.map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
						.collect_view()}
				</select>
			</div>
		</div>
	}
}
