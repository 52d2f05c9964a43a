//! Detects a completed back-and-forth swing of the head.

/// Angle magnitude at which the head counts as leaning to a side.
pub const SIDE_THRESHOLD: f64 = 0.15;
/// Angle magnitude under which the head counts as centered again.
pub const CENTER_THRESHOLD: f64 = 0.05;

/// Which side of center the head is leaning towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	/// Negative angles.
	Left,
	/// Positive angles.
	Right,
}

/// Zone the head currently occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Zone {
	/// At or past the left threshold.
	Left,
	/// At or past the right threshold.
	Right,
	/// Near rest, or between the center and side thresholds after a reset.
	#[default]
	Center,
}

/// Tracks side crossings of the smoothed sway angle.
///
/// One event requires reaching one side and then the opposite side. The
/// remembered extreme survives passing through center and is consumed by the
/// opposite crossing.
#[derive(Clone, Debug, Default)]
pub struct GestureDetector {
	zone: Zone,
	extreme: Option<Side>,
}

impl GestureDetector {
	/// Tracker at rest with no recorded extreme.
	pub fn new() -> Self {
		Self::default()
	}

	/// Zone of the most recent angle.
	pub fn zone(&self) -> Zone {
		self.zone
	}

	/// Side reached since the last return to center.
	pub fn extreme(&self) -> Option<Side> {
		self.extreme
	}

	/// Feed one frame's angle. Returns `true` when a full swing completes.
	pub fn update(&mut self, angle: f64) -> bool {
		if angle <= -SIDE_THRESHOLD && self.zone != Zone::Left {
			self.zone = Zone::Left;
			self.cross(Side::Left)
		} else if angle >= SIDE_THRESHOLD && self.zone != Zone::Right {
			self.zone = Zone::Right;
			self.cross(Side::Right)
		} else {
			if angle.abs() < CENTER_THRESHOLD {
				self.zone = Zone::Center;
			}
			false
		}
	}

	fn cross(&mut self, side: Side) -> bool {
		match self.extreme {
			Some(previous) if previous != side => {
				self.extreme = None;
				true
			}
			_ => {
				self.extreme = Some(side);
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn count(detector: &mut GestureDetector, angles: &[f64]) -> usize {
		angles.iter().filter(|&&a| detector.update(a)).count()
	}

	#[test]
	fn right_then_left_fires_once() {
		let mut d = GestureDetector::new();
		assert_eq!(count(&mut d, &[0.0, 0.1, 0.2, 0.1, 0.0, -0.1, -0.2]), 1);
		assert_eq!(d.extreme(), None);
	}

	#[test]
	fn left_then_right_fires_once() {
		let mut d = GestureDetector::new();
		assert_eq!(count(&mut d, &[-0.2, -0.3, 0.0, 0.2, 0.3]), 1);
	}

	#[test]
	fn lingering_on_one_side_fires_nothing() {
		let mut d = GestureDetector::new();
		assert_eq!(count(&mut d, &[0.2, 0.3, 0.16, 0.4, 0.2]), 0);
		assert_eq!(d.zone(), Zone::Right);
		assert_eq!(d.extreme(), Some(Side::Right));
	}

	#[test]
	fn same_side_after_center_fires_nothing() {
		let mut d = GestureDetector::new();
		assert_eq!(count(&mut d, &[0.2, 0.0, 0.2, 0.0, 0.25]), 0);
	}

	#[test]
	fn hovering_between_thresholds_keeps_zone() {
		let mut d = GestureDetector::new();
		d.update(0.2);
		d.update(0.1);
		assert_eq!(d.zone(), Zone::Right);
		// re-entering the side zone without reaching center is not a new crossing
		d.update(0.2);
		assert_eq!(d.extreme(), Some(Side::Right));
	}

	#[test]
	fn extreme_persists_through_center() {
		let mut d = GestureDetector::new();
		d.update(-0.2);
		d.update(0.0);
		assert_eq!(d.zone(), Zone::Center);
		assert_eq!(d.extreme(), Some(Side::Left));
		assert!(d.update(0.2));
	}

	#[test]
	fn full_oscillation_cycle_fires_once_per_pair() {
		let mut d = GestureDetector::new();
		let swing = [-0.2, 0.0, 0.2, 0.0, -0.2, 0.0, 0.2];
		// L (record), R (fire), L (record), R (fire)
		assert_eq!(count(&mut d, &swing), 2);
	}
}
