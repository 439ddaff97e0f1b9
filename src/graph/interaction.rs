//! Client-local view state: view mode, selection, hover and expanded table rows.

use std::collections::HashSet;

use super::NodeKey;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Graph,
	Table,
}

impl ViewMode {
	pub fn toggled(self) -> Self {
		match self {
			Self::Graph => Self::Table,
			Self::Table => Self::Graph,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
	pub view: ViewMode,
	selected: Option<NodeKey>,
	hovered: Option<NodeKey>,
	expanded_rows: HashSet<String>,
}

impl InteractionState {
	pub fn selected(&self) -> Option<&NodeKey> {
		self.selected.as_ref()
	}

	pub fn hovered(&self) -> Option<&NodeKey> {
		self.hovered.as_ref()
	}

	/// Clicking the selected node clears the selection; any other node replaces it.
	pub fn click(&mut self, key: NodeKey) {
		if self.selected.as_ref() == Some(&key) {
			self.selected = None;
		} else {
			self.selected = Some(key);
		}
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	pub fn hover(&mut self, key: Option<NodeKey>) {
		self.hovered = key;
	}

	/// Hovered and selected nodes get the same emphasis and show their label.
	pub fn is_emphasized(&self, key: &NodeKey) -> bool {
		self.hovered.as_ref() == Some(key) || self.selected.as_ref() == Some(key)
	}

	pub fn toggle_view(&mut self) {
		self.view = self.view.toggled();
	}

	pub fn toggle_row(&mut self, mentor_id: &str) {
		if !self.expanded_rows.remove(mentor_id) {
			self.expanded_rows.insert(mentor_id.to_owned());
		}
	}

	pub fn is_expanded(&self, mentor_id: &str) -> bool {
		self.expanded_rows.contains(mentor_id)
	}

	/// Drop selection and hover pointing at nodes that are gone after a reload.
	pub fn retain_known(&mut self, known: impl Fn(&NodeKey) -> bool) {
		if self.selected.as_ref().is_some_and(|k| !known(k)) {
			self.selected = None;
		}
		if self.hovered.as_ref().is_some_and(|k| !known(k)) {
			self.hovered = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clicking_twice_clears_selection() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentor("a"));
		state.click(NodeKey::mentor("a"));
		assert_eq!(state.selected(), None);
	}

	#[test]
	fn clicking_another_node_replaces_selection() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentor("a"));
		state.click(NodeKey::mentee("b"));
		assert_eq!(state.selected(), Some(&NodeKey::mentee("b")));
	}

	#[test]
	fn hover_never_touches_selection() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentor("a"));
		state.hover(Some(NodeKey::mentee("b")));
		state.hover(None);
		assert_eq!(state.selected(), Some(&NodeKey::mentor("a")));
		assert_eq!(state.hovered(), None);
	}

	#[test]
	fn hovered_or_selected_nodes_are_emphasized() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentor("a"));
		state.hover(Some(NodeKey::mentee("b")));
		assert!(state.is_emphasized(&NodeKey::mentor("a")));
		assert!(state.is_emphasized(&NodeKey::mentee("b")));
		assert!(!state.is_emphasized(&NodeKey::mentee("c")));
	}

	#[test]
	fn rows_expand_independently() {
		let mut state = InteractionState::default();
		state.toggle_row("m1");
		state.toggle_row("m2");
		state.toggle_row("m1");
		assert!(!state.is_expanded("m1"));
		assert!(state.is_expanded("m2"));
	}

	#[test]
	fn view_toggle_keeps_selection() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentor("a"));
		state.toggle_view();
		assert_eq!(state.view, ViewMode::Table);
		assert_eq!(state.selected(), Some(&NodeKey::mentor("a")));
	}

	#[test]
	fn stale_selection_is_dropped_after_reload() {
		let mut state = InteractionState::default();
		state.click(NodeKey::mentee("gone"));
		state.retain_known(|k| k.id != "gone");
		assert_eq!(state.selected(), None);
	}
}
