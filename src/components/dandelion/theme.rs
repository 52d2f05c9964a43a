//! Color themes for the dandelion.
//!
//! Every drawn element takes its color from one of four palette slots: `tip`
//! (pappus hairs), `mid` (stalks, stem tip, fluff), `core` (receptacle) and
//! `sparkle` (burst particles). Switching themes takes effect on the next frame.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Stem base color. Shared by every theme; only the tip end of the stem is themed.
pub const STEM_GREEN: Color = Color::rgb(92, 138, 74);

/// The four colors a theme assigns to the flower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Pappus hairs and seed tips.
	pub tip: Color,
	/// Stalks, stem tip and fluff.
	pub mid: Color,
	/// Receptacle.
	pub core: Color,
	/// Burst particles.
	pub sparkle: Color,
}

/// Named color theme selectable by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorTheme {
	/// Plain white seeds on a cream core.
	#[default]
	White,
	/// Cool blues.
	DeepBlue,
	/// Soft purple.
	Lavender,
	/// Blue-violet.
	Periwinkle,
	/// Warm ivory.
	Pale,
	/// Rose.
	Pink,
}

impl ColorTheme {
	/// All themes in menu order.
	pub const ALL: [ColorTheme; 6] = [
		ColorTheme::White,
		ColorTheme::DeepBlue,
		ColorTheme::Lavender,
		ColorTheme::Periwinkle,
		ColorTheme::Pale,
		ColorTheme::Pink,
	];

	/// The colors this theme assigns.
	pub fn palette(self) -> Palette {
		match self {
			ColorTheme::White => Palette {
				tip: Color::rgb(255, 255, 255),
				mid: Color::rgb(228, 232, 238),
				core: Color::rgb(196, 186, 150),
				sparkle: Color::rgb(255, 250, 222),
			},
			ColorTheme::DeepBlue => Palette {
				tip: Color::rgb(150, 190, 255),
				mid: Color::rgb(72, 112, 204),
				core: Color::rgb(30, 52, 122),
				sparkle: Color::rgb(182, 220, 255),
			},
			ColorTheme::Lavender => Palette {
				tip: Color::rgb(232, 212, 255),
				mid: Color::rgb(182, 152, 230),
				core: Color::rgb(120, 90, 170),
				sparkle: Color::rgb(242, 224, 255),
			},
			ColorTheme::Periwinkle => Palette {
				tip: Color::rgb(204, 212, 255),
				mid: Color::rgb(150, 160, 240),
				core: Color::rgb(90, 100, 190),
				sparkle: Color::rgb(222, 228, 255),
			},
			ColorTheme::Pale => Palette {
				tip: Color::rgb(255, 250, 236),
				mid: Color::rgb(240, 230, 200),
				core: Color::rgb(210, 190, 140),
				sparkle: Color::rgb(255, 244, 210),
			},
			ColorTheme::Pink => Palette {
				tip: Color::rgb(255, 212, 230),
				mid: Color::rgb(245, 160, 200),
				core: Color::rgb(200, 100, 150),
				sparkle: Color::rgb(255, 222, 240),
			},
		}
	}

	/// Stable identifier, matching the serialized form.
	pub fn as_str(self) -> &'static str {
		match self {
			ColorTheme::White => "white",
			ColorTheme::DeepBlue => "deepBlue",
			ColorTheme::Lavender => "lavender",
			ColorTheme::Periwinkle => "periwinkle",
			ColorTheme::Pale => "pale",
			ColorTheme::Pink => "pink",
		}
	}

	/// Human-readable name for menus.
	pub fn label(self) -> &'static str {
		match self {
			ColorTheme::White => "White",
			ColorTheme::DeepBlue => "Deep blue",
			ColorTheme::Lavender => "Lavender",
			ColorTheme::Periwinkle => "Periwinkle",
			ColorTheme::Pale => "Pale",
			ColorTheme::Pink => "Pink",
		}
	}

	/// Compact form for the input handoff.
	pub(crate) fn to_index(self) -> u8 {
		match self {
			ColorTheme::White => 0,
			ColorTheme::DeepBlue => 1,
			ColorTheme::Lavender => 2,
			ColorTheme::Periwinkle => 3,
			ColorTheme::Pale => 4,
			ColorTheme::Pink => 5,
		}
	}

	/// Inverse of `to_index`; unknown indices fall back to the default theme.
	pub(crate) fn from_index(index: u8) -> Self {
		Self::ALL.get(index as usize).copied().unwrap_or_default()
	}
}

impl fmt::Display for ColorTheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a theme name does not match any [`ColorTheme`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown color theme: {}", self.0)
	}
}

impl FromStr for ColorTheme {
	type Err = UnknownTheme;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownTheme(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn theme_names_round_trip_through_from_str() {
		for theme in ColorTheme::ALL {
			assert_eq!(theme.as_str().parse::<ColorTheme>(), Ok(theme));
		}
		assert_eq!("DEEPBLUE".parse::<ColorTheme>(), Ok(ColorTheme::DeepBlue));
		assert!("mauve".parse::<ColorTheme>().is_err());
	}

	#[test]
	fn theme_deserializes_from_camel_case() {
		let theme: ColorTheme = serde_json::from_str("\"deepBlue\"").unwrap();
		assert_eq!(theme, ColorTheme::DeepBlue);
	}

	#[test]
	fn index_mapping_is_stable() {
		for theme in ColorTheme::ALL {
			assert_eq!(ColorTheme::from_index(theme.to_index()), theme);
		}
		assert_eq!(ColorTheme::from_index(200), ColorTheme::White);
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}
}
