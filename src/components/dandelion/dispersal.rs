//! Flower life cycle: intact, dispersing, regrowing.
//!
//! Only a blow moves an intact flower forward. The two later transitions are
//! timed: each entry schedules the next transition, and the frame loop polls
//! for it. Nothing else can move the machine while a timer is pending, so a
//! blow mid-animation is ignored.

use std::fmt;

/// Global state of the flower head.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DispersalState {
	/// Seeds on the head; a strong enough blow disperses them.
	#[default]
	Intact,
	/// Seeds flying away.
	Dispersing,
	/// Seeds back on the head, fading in.
	Regrowing,
}

impl fmt::Display for DispersalState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			DispersalState::Intact => "INTACT",
			DispersalState::Dispersing => "DISPERSING",
			DispersalState::Regrowing => "REGROWING",
		})
	}
}

/// A timed transition waiting to fire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTransition {
	/// Timestamp (ms) at or after which the transition fires.
	pub due_ms: f64,
	/// State entered when the transition fires.
	pub target: DispersalState,
}

/// Dispersal state plus its single pending timer.
#[derive(Clone, Debug)]
pub struct DispersalMachine {
	state: DispersalState,
	/// Timestamp (ms) at which `state` was entered.
	entered_ms: f64,
	pending: Option<PendingTransition>,
	threshold: f64,
	disperse_dwell_ms: f64,
	regrow_dwell_ms: f64,
}

impl DispersalMachine {
	/// A fresh, intact machine. Blows must exceed `threshold` to count.
	pub fn new(threshold: f64, disperse_dwell_ms: f64, regrow_dwell_ms: f64) -> Self {
		Self {
			state: DispersalState::Intact,
			entered_ms: 0.0,
			pending: None,
			threshold,
			disperse_dwell_ms,
			regrow_dwell_ms,
		}
	}

	/// Current state.
	pub fn state(&self) -> DispersalState {
		self.state
	}

	/// Milliseconds spent in the current state as of `now_ms`.
	pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
		(now_ms - self.entered_ms).max(0.0)
	}

	/// The scheduled transition, if one is waiting.
	pub fn pending(&self) -> Option<PendingTransition> {
		self.pending
	}

	/// Start dispersing if intact and `blow_strength` exceeds the threshold.
	///
	/// Returns `true` when the transition happened; the caller applies the
	/// particle side effects.
	pub fn try_blow(&mut self, blow_strength: f64, now_ms: f64) -> bool {
		if self.state != DispersalState::Intact || blow_strength <= self.threshold {
			return false;
		}
		self.enter(DispersalState::Dispersing, now_ms);
		true
	}

	/// Fire the pending transition if it is due. Returns the state entered.
	pub fn poll(&mut self, now_ms: f64) -> Option<DispersalState> {
		let due = self.pending.filter(|p| now_ms >= p.due_ms)?;
		self.pending = None;
		self.enter(due.target, now_ms);
		Some(due.target)
	}

	/// Drop any pending transition. Used on teardown.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	fn enter(&mut self, state: DispersalState, now_ms: f64) {
		log::debug!("dandelion: {} -> {}", self.state, state);
		self.state = state;
		self.entered_ms = now_ms;
		self.pending = match state {
			DispersalState::Intact => None,
			DispersalState::Dispersing => Some(PendingTransition {
				due_ms: now_ms + self.disperse_dwell_ms,
				target: DispersalState::Regrowing,
			}),
			DispersalState::Regrowing => Some(PendingTransition {
				due_ms: now_ms + self.regrow_dwell_ms,
				target: DispersalState::Intact,
			}),
		};
	}
}
