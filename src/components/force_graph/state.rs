use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::layout;
use super::types::{GraphCommand, LayoutParams, Palette, Theme};
use crate::graph::{NodeKey, NodeKind, ResolvedGraph};

pub const NODE_RADIUS: f64 = 5.0;
pub const MENTOR_RADIUS: f64 = 7.0;
/// Radius multiplier for hovered and selected nodes.
pub const EMPHASIS_SCALE: f64 = 1.6;
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel (screen px) below which a press on a node counts as a click.
const CLICK_SLOP: f64 = 3.0;
const REHEAT_ALPHA: f64 = 0.3;
const ALPHA_MIN: f64 = 0.001;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub key: NodeKey,
	pub label: String,
}

impl NodeInfo {
	pub fn radius(&self) -> f64 {
		match self.key.kind {
			NodeKind::Mentor => MENTOR_RADIUS,
			NodeKind::Mentee => NODE_RADIUS,
		}
	}

	pub fn color(&self, palette: &Palette) -> &'static str {
		match self.key.kind {
			NodeKind::Mentor => palette.mentor,
			NodeKind::Mentee => palette.mentee,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub palette: Palette,
	pub width: f64,
	pub height: f64,
	/// True while the cooldown budget lasts.
	pub animation_running: bool,
	pub flow_time: f64,
	params: LayoutParams,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	by_key: HashMap<NodeKey, DefaultNodeIdx>,
	order: Vec<DefaultNodeIdx>,
	slots: HashMap<DefaultNodeIdx, usize>,
	links: Vec<(usize, usize)>,
	alpha: f64,
	alpha_decay: f64,
	cooldown_remaining: u32,
	fit_pending: bool,
}

impl ForceGraphState {
	/// Build the simulation for one dataset and run the warm-up ticks.
	///
	/// `seed` jitters the initial placement so every load settles differently.
	pub fn new(
		data: &ResolvedGraph,
		width: f64,
		height: f64,
		params: LayoutParams,
		theme: Theme,
		seed: u64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 0.0,
			force_spring: 0.02,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut by_key = HashMap::new();
		let mut order = Vec::with_capacity(data.nodes().len());
		let mut slots = HashMap::with_capacity(data.nodes().len());

		for (i, node) in data.nodes().iter().enumerate() {
			// Sunflower spiral around the origin, jittered by the seed.
			let angle = i as f64 * PI * (3.0 - 5f64.sqrt()) + jitter(seed, i) * PI;
			let radius = params.link_distance * 0.5 * ((i + 1) as f64).sqrt();
			let (x, y) = ((radius * angle.cos()) as f32, (radius * angle.sin()) as f32);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					key: node.key(),
					label: node.name.clone(),
				},
			});
			by_key.entry(node.key()).or_insert(idx);
			slots.insert(idx, order.len());
			order.push(idx);
		}

		let mut edges = Vec::with_capacity(data.edges().len());
		let mut links = Vec::with_capacity(data.edges().len());
		for edge in data.edges() {
			let src = by_key.get(&NodeKey::mentor(edge.mentor.as_str()));
			let tgt = by_key.get(&NodeKey::mentee(edge.mentee.as_str()));
			if let (Some(&src), Some(&tgt)) = (src, tgt) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
				links.push((slots[&src], slots[&tgt]));
			}
		}

		let total = params.warmup_ticks + params.cooldown_ticks;
		let alpha_decay = 1.0 - ALPHA_MIN.powf(1.0 / total.max(1) as f64);
		let mut state = Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			palette: theme.palette(),
			width,
			height,
			animation_running: params.cooldown_ticks > 0,
			flow_time: 0.0,
			params,
			edges,
			by_key,
			order,
			slots,
			links,
			alpha: 1.0,
			alpha_decay,
			cooldown_remaining: params.cooldown_ticks,
			fit_pending: !data.is_empty(),
		};
		for _ in 0..params.warmup_ticks {
			state.step_physics(0.016);
		}
		if state.cooldown_remaining == 0 {
			state.finish_cooldown();
		}
		state
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn key_of(&self, idx: DefaultNodeIdx) -> Option<NodeKey> {
		let mut key = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				key = Some(node.data.user_data.key.clone());
			}
		});
		key
	}

	pub fn hovered_key(&self) -> Option<NodeKey> {
		self.hover.node.and_then(|idx| self.key_of(idx))
	}

	pub fn position_of(&self, key: &NodeKey) -> Option<(f64, f64)> {
		let idx = *self.by_key.get(key)?;
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn select(&mut self, key: Option<&NodeKey>) {
		self.selected = key.and_then(|k| self.by_key.get(k).copied());
	}

	/// Hover driven from outside the canvas, e.g. a table row.
	pub fn hover_key(&mut self, key: Option<&NodeKey>) {
		if self.drag.active {
			return;
		}
		let idx = key.and_then(|k| self.by_key.get(k).copied());
		self.set_hover(idx);
	}

	pub fn set_theme(&mut self, theme: Theme) {
		self.palette = theme.palette();
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	/// Hovered or selected: enlarged, inverted and labelled.
	pub fn is_emphasized(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.selected == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	// Pointer handling, in canvas-relative screen coordinates.

	pub fn begin_pointer(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Returns the newly hovered node (or `Some(None)` for none) when hover changed.
	pub fn move_pointer(&mut self, x: f64, y: f64) -> Option<Option<NodeKey>> {
		let before = self.hover.node;
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sdx * sdx + sdy * sdy).sqrt() < CLICK_SLOP {
				return None;
			}
			self.drag.moved = true;
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (sdx / self.transform.k, sdy / self.transform.k);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
				self.reheat();
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
		(before != self.hover.node).then(|| self.hovered_key())
	}

	/// Ends a drag or pan. A press that never moved returns the clicked node.
	pub fn end_pointer(&mut self) -> Option<NodeKey> {
		let clicked = match (&self.drag, self.drag.node_idx) {
			(drag, Some(idx)) if drag.active && !drag.moved => self.key_of(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.zoom_at(x, y, factor);
	}

	// Camera.

	pub fn apply(&mut self, command: GraphCommand) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		match command {
			GraphCommand::ZoomIn => self.zoom_at(cx, cy, self.params.zoom_step),
			GraphCommand::ZoomOut => self.zoom_at(cx, cy, 1.0 / self.params.zoom_step),
			GraphCommand::Center => {
				self.transform.x = cx;
				self.transform.y = cy;
			}
			GraphCommand::Fit => self.fit(),
			GraphCommand::Reset => {
				self.transform = ViewTransform {
					x: cx,
					y: cy,
					k: 1.0,
				};
			}
		}
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(self.params.min_zoom, self.params.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Frame every node with `fit_padding` on each side.
	pub fn fit(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			});
		});
		let Some((x0, y0, x1, y1)) = bounds else {
			return;
		};
		let pad = self.params.fit_padding;
		let (avail_w, avail_h) = (
			(self.width - 2.0 * pad).max(1.0),
			(self.height - 2.0 * pad).max(1.0),
		);
		let (span_w, span_h) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let k = (avail_w / span_w)
			.min(avail_h / span_h)
			.clamp(self.params.min_zoom, self.params.max_zoom);
		let (mid_x, mid_y) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - mid_x * k,
			y: self.height / 2.0 - mid_y * k,
			k,
		};
	}

	// Simulation.

	pub fn tick(&mut self, dt: f32) {
		if self.cooldown_remaining > 0 {
			self.step_physics(dt);
			self.cooldown_remaining -= 1;
			if self.cooldown_remaining == 0 {
				self.finish_cooldown();
			}
		}
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Give the simulation a fresh cooldown budget after user interaction.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(REHEAT_ALPHA);
		self.cooldown_remaining = self.params.cooldown_ticks;
		self.animation_running = self.cooldown_remaining > 0;
	}

	fn finish_cooldown(&mut self) {
		self.animation_running = false;
		if std::mem::take(&mut self.fit_pending) {
			self.fit();
		}
	}

	fn step_physics(&mut self, dt: f32) {
		self.graph.update(dt);

		let mut positions = vec![(0.0, 0.0); self.order.len()];
		self.graph.visit_nodes(|node| {
			if let Some(&slot) = self.slots.get(&node.index()) {
				positions[slot] = (node.x() as f64, node.y() as f64);
			}
		});
		let moves = layout::step(&positions, &self.links, &self.params, self.alpha);
		let slots = &self.slots;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&slot) = slots.get(&node.index()) {
				node.data.x += moves[slot].0 as f32;
				node.data.y += moves[slot].1 as f32;
			}
		});
		self.alpha *= 1.0 - self.alpha_decay;
	}

	/// Mentor -> mentee pairs, in edge order.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	pub fn cooldown_remaining(&self) -> u32 {
		self.cooldown_remaining
	}

	pub fn fit_pending(&self) -> bool {
		self.fit_pending
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Deterministic value in [0, 1) from a seed and node position.
fn jitter(seed: u64, i: usize) -> f64 {
	let x = (seed
		.wrapping_add(i as u64 + 1)
		.wrapping_mul(9301)
		.wrapping_add(49297))
		% 233280;
	x as f64 / 233280.0
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::resolve;
	use crate::model::{Mentee, Mentor, MentorRef, Profile};

	fn sample() -> ResolvedGraph {
		let mentors: Vec<Mentor> = (1..=2)
			.map(|i| Mentor {
				id: format!("m{i}"),
				name: format!("Mentor {i}"),
				email: format!("m{i}@example.org"),
				profile: Profile::default(),
				mentees: None,
				tags: Vec::new(),
			})
			.collect();
		let mentees: Vec<Mentee> = (1..=6)
			.map(|i| Mentee {
				id: format!("n{i}"),
				name: format!("Mentee {i}"),
				email: None,
				profile: Profile::default(),
				is_mentor: false,
				mentor: Some(MentorRef::Id(format!("m{}", i % 2 + 1))),
				tags: Vec::new(),
			})
			.collect();
		resolve(&mentors, &mentees)
	}

	fn params() -> LayoutParams {
		LayoutParams {
			warmup_ticks: 5,
			cooldown_ticks: 3,
			..LayoutParams::default()
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&sample(), 800.0, 600.0, params(), Theme::Light, 7)
	}

	fn screen_pos(state: &ForceGraphState, key: &NodeKey) -> (f64, f64) {
		let (x, y) = state.position_of(key).unwrap();
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn every_edge_becomes_a_simulation_link() {
		let state = state();
		assert_eq!(state.edges.len(), 6);
		assert_eq!(state.order.len(), 8);
	}

	#[test]
	fn cooldown_is_bounded_and_fits_once() {
		let mut state = state();
		assert!(state.animation_running);
		assert!(state.fit_pending());

		for _ in 0..3 {
			state.tick(0.016);
		}
		assert!(!state.animation_running);
		assert!(!state.fit_pending());
		let fitted = state.transform.clone();

		state.apply(GraphCommand::Reset);
		state.tick(0.016);
		assert_eq!(state.cooldown_remaining(), 0);
		assert_ne!(state.transform, fitted);
	}

	#[test]
	fn empty_graph_never_fits() {
		let state = ForceGraphState::new(
			&ResolvedGraph::default(),
			800.0,
			600.0,
			params(),
			Theme::Dark,
			1,
		);
		assert!(!state.fit_pending());
	}

	#[test]
	fn fit_keeps_nodes_inside_the_padded_viewport() {
		let mut state = state();
		state.apply(GraphCommand::Fit);
		for node in sample().nodes() {
			let (x, y) = screen_pos(&state, &node.key());
			assert!(x >= 40.0 - 1e-6 && x <= 760.0 + 1e-6, "x = {x}");
			assert!(y >= 40.0 - 1e-6 && y <= 560.0 + 1e-6, "y = {y}");
		}
	}

	#[test]
	fn zoom_commands_are_multiplicative_and_reset_restores() {
		let mut state = state();
		state.apply(GraphCommand::Reset);
		state.apply(GraphCommand::ZoomIn);
		assert!((state.transform.k - 1.25).abs() < 1e-9);
		state.apply(GraphCommand::ZoomOut);
		assert!((state.transform.k - 1.0).abs() < 1e-9);

		state.apply(GraphCommand::ZoomIn);
		state.transform.x += 50.0;
		state.apply(GraphCommand::Center);
		assert_eq!((state.transform.x, state.transform.y), (400.0, 300.0));
		assert!((state.transform.k - 1.25).abs() < 1e-9);

		state.apply(GraphCommand::Reset);
		assert_eq!(
			state.transform,
			ViewTransform {
				x: 400.0,
				y: 300.0,
				k: 1.0
			}
		);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = state();
		for _ in 0..100 {
			state.apply(GraphCommand::ZoomOut);
		}
		assert!((state.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut state = state();
		let key = NodeKey::mentee("n3");
		let (x, y) = screen_pos(&state, &key);

		state.begin_pointer(x, y);
		let clicked = state.end_pointer();

		// Nodes may overlap; the hit test returns some node under the pointer.
		assert!(clicked.is_some());
	}

	#[test]
	fn dragging_pins_the_node_and_reheats() {
		let mut state = state();
		for _ in 0..3 {
			state.tick(0.016);
		}
		assert!(!state.animation_running);

		let key = NodeKey::mentor("m1");
		let (x, y) = screen_pos(&state, &key);
		state.begin_pointer(x, y);
		state.move_pointer(x + 30.0, y + 10.0);
		assert_eq!(state.end_pointer(), None);

		assert!(state.animation_running);
		assert_eq!(state.cooldown_remaining(), 3);
		let mut pinned = 0;
		state.graph.visit_nodes(|node| {
			if node.data.is_anchor {
				pinned += 1;
			}
		});
		assert_eq!(pinned, 1);
	}

	#[test]
	fn background_drag_pans() {
		let mut state = state();
		// Park the camera far away from every node so the press lands on background.
		state.transform = ViewTransform {
			x: 10_000.0,
			y: 10_000.0,
			k: 1.0,
		};
		state.begin_pointer(5.0, 5.0);
		state.move_pointer(25.0, 15.0);
		assert_eq!(state.end_pointer(), None);
		assert_eq!((state.transform.x, state.transform.y), (10_020.0, 10_010.0));
	}

	#[test]
	fn selection_emphasizes_like_hover() {
		let mut state = state();
		let key = NodeKey::mentor("m2");
		state.select(Some(&key));
		let idx = state.by_key[&key];
		assert!(state.is_emphasized(idx));
		state.select(None);
		assert!(!state.is_emphasized(idx));
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = state();
		let idx = state.by_key[&NodeKey::mentor("m1")];
		state.set_hover(Some(idx));
		assert_eq!(state.hover.neighbors.len(), 3);
		assert_eq!(state.hovered_key(), Some(NodeKey::mentor("m1")));
	}

	#[test]
	fn pointer_moves_report_hover_changes_once() {
		let mut state = state();
		let key = NodeKey::mentee("n1");
		let (x, y) = screen_pos(&state, &key);

		let entered = state.move_pointer(x, y);
		assert!(matches!(entered, Some(Some(_))));
		assert_eq!(state.move_pointer(x, y), None);

		state.transform = ViewTransform {
			x: 10_000.0,
			y: 10_000.0,
			k: 1.0,
		};
		assert_eq!(state.move_pointer(x, y), Some(None));
	}

	#[test]
	fn hover_from_outside_matches_pointer_hover() {
		let mut state = state();
		let key = NodeKey::mentor("m1");
		state.hover_key(Some(&key));
		let idx = state.by_key[&key];
		assert!(state.is_emphasized(idx));
		assert_eq!(state.hover.neighbors.len(), 3);

		state.hover_key(Some(&NodeKey::mentor("gone")));
		assert_eq!(state.hovered_key(), None);
	}
}
