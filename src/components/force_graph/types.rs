use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Force and camera tuning for the graph canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Target length of every mentor -> mentee edge.
	pub link_distance: f64,
	pub charge_strength: f64,
	/// Pairs further apart than this do not repel.
	pub charge_max_distance: f64,
	pub center_strength: f64,
	/// Ticks run synchronously on data load, before the first paint.
	pub warmup_ticks: u32,
	/// Ticks the simulation keeps running afterwards (and after each drag).
	pub cooldown_ticks: u32,
	pub fit_padding: f64,
	pub zoom_step: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			link_distance: 80.0,
			charge_strength: 900.0,
			charge_max_distance: 300.0,
			center_strength: 0.02,
			warmup_ticks: 80,
			cooldown_ticks: 300,
			fit_padding: 40.0,
			zoom_step: 1.25,
			min_zoom: 0.1,
			max_zoom: 10.0,
		}
	}
}

/// Camera operations the host page can issue at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphCommand {
	ZoomIn,
	ZoomOut,
	Center,
	Fit,
	Reset,
}

/// Command channel into a mounted canvas. Commands queue until the next frame.
#[derive(Clone, Default)]
pub struct GraphController {
	queue: Rc<RefCell<VecDeque<GraphCommand>>>,
}

impl GraphController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn send(&self, command: GraphCommand) {
		self.queue.borrow_mut().push_back(command);
	}

	pub(super) fn drain(&self) -> Vec<GraphCommand> {
		self.queue.borrow_mut().drain(..).collect()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	pub fn palette(self) -> Palette {
		match self {
			Self::Light => Palette {
				background: "#f8fafc",
				foreground: "#0f172a",
				mentor: "#2563eb",
				mentee: "#16a34a",
				edge: "71, 85, 105",
			},
			Self::Dark => Palette {
				background: "#1a1a2e",
				foreground: "#f8fafc",
				mentor: "#60a5fa",
				mentee: "#4ade80",
				edge: "100, 180, 255",
			},
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	pub background: &'static str,
	/// Labels, and the fill of emphasized nodes.
	pub foreground: &'static str,
	pub mentor: &'static str,
	pub mentee: &'static str,
	/// `r, g, b` for edges; alpha varies with highlighting.
	pub edge: &'static str,
}
