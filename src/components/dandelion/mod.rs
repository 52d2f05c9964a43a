//! Interactive dandelion particle visualization component.
//!
//! Renders a dandelion head of seed particles on an HTML canvas with:
//! - A stem that sways with a damped spring from a `sway` signal
//! - A blow-apart, regrow life cycle triggered by a `blow_strength` signal
//! - Sparkle bursts, receptacle fuzz and depth-sorted 3D seeds
//! - Six selectable color themes
//!
//! # Example
//!
//! ```ignore
//! use dandelion_wish::{ColorTheme, DandelionCanvas, FlowerEvent};
//!
//! let (sway, set_sway) = signal(0.0);
//! let (blow, set_blow) = signal(0.0);
//! let on_event = Callback::new(|event: FlowerEvent| log::info!("{event:?}"));
//!
//! view! {
//!     <DandelionCanvas
//!         sway=sway
//!         blow_strength=blow
//!         theme=Signal::stored(ColorTheme::Lavender)
//!         on_event=on_event
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod config;
mod dispersal;
mod fluff;
pub mod geometry;
mod gesture;
mod particles;
mod render;
pub mod scale;
mod seeds;
mod state;
mod sway;
pub mod theme;
mod types;

pub use component::DandelionCanvas;
pub use config::FlowerConfig;
pub use dispersal::DispersalState;
pub use state::DandelionState;
pub use theme::{Color, ColorTheme, Palette};
pub use types::{FlowerEvent, FrameInputs, InputHandoff};
