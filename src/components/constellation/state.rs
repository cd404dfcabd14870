use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::MapData;
use crate::catalog::TraitNode;

pub const NODE_RADIUS: f64 = 14.0;
pub const RADIUS_PER_SUB_TRAIT: f64 = 2.0;
pub const HIT_PADDING: f64 = 6.0;
/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;
const LAYOUT_RING: f64 = 140.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
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
}

/// Sub-trait currently selected, orbiting its primary on the map.
#[derive(Clone, Debug)]
pub struct Satellite {
	pub parent: String,
	pub color: String,
}

/// What a released pointer amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerRelease {
	NodeClick(String),
	BackgroundClick,
	Gesture,
}

pub struct ConstellationState {
	pub graph: ForceGraph<NodeInfo, f64>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub time: f64,
	selected: HashSet<String>,
	satellites: Vec<Satellite>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ConstellationState {
	pub fn new(data: &MapData, selection: &[TraitNode], width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 300.0,
			force_spring: 0.04,
			force_max: 120.0,
			node_speed: 2000.0,
			damping_factor: 0.85,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (LAYOUT_RING * angle.cos()) as f32,
				y: (LAYOUT_RING * angle.sin()) as f32,
				mass: 10.0 + node.weight as f32,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
					radius: NODE_RADIUS + RADIUS_PER_SUB_TRAIT * node.weight as f64,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: link.value,
					},
				);
				edges.push((src, tgt));
			}
		}

		let mut state = Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			time: 0.0,
			selected: HashSet::new(),
			satellites: Vec::new(),
		};
		state.set_selection(selection);
		state
	}

	/// Mirror the engine's selection: primaries get a ring, sub-traits orbit.
	pub fn set_selection(&mut self, selection: &[TraitNode]) {
		self.selected = selection.iter().map(|n| n.id.clone()).collect();
		self.satellites = selection
			.iter()
			.filter_map(|n| {
				n.parent.as_ref().map(|parent| Satellite {
					parent: parent.clone(),
					color: n.color.clone(),
				})
			})
			.collect();
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.contains(id)
	}

	pub fn satellites_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Satellite> + 'a {
		self.satellites.iter().filter(move |s| s.parent == id)
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
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn press_node(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			moved: false,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			..DragState::default()
		};
		let drag = &mut self.drag;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				drag.node_start_x = node.x();
				drag.node_start_y = node.y();
			}
		});
	}

	pub fn press_background(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			self.drag.moved |= sx.hypot(sy) > CLICK_SLOP;
			if let Some(idx) = self.drag.node_idx {
				let (nx, ny) = (
					self.drag.node_start_x + (sx / self.transform.k) as f32,
					self.drag.node_start_y + (sy / self.transform.k) as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			let (sx, sy) = (x - self.pan.start_x, y - self.pan.start_y);
			self.pan.moved |= sx.hypot(sy) > CLICK_SLOP;
			self.transform.x = self.pan.transform_start_x + sx;
			self.transform.y = self.pan.transform_start_y + sy;
		}
	}

	/// Finish a press. A node dragged into place stays anchored there.
	pub fn release(&mut self) -> PointerRelease {
		let outcome = if self.drag.active && !self.drag.moved {
			self.drag
				.node_idx
				.and_then(|idx| self.node_id(idx))
				.map_or(PointerRelease::Gesture, PointerRelease::NodeClick)
		} else if self.pan.active && !self.pan.moved {
			PointerRelease::BackgroundClick
		} else {
			PointerRelease::Gesture
		};
		self.cancel_pointer();
		outcome
	}

	pub fn cancel_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.pan.moved = false;
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.3, 4.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
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
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.time += dt as f64;

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 4.0 * dt as f64;
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::constellation::types::{MapLink, MapNode};

	fn data() -> MapData {
		let node = |id: &str| MapNode {
			id: id.into(),
			label: id.into(),
			color: "#fff".into(),
			weight: 0,
		};
		MapData {
			nodes: vec![node("a"), node("b")],
			links: vec![MapLink {
				source: "a".into(),
				target: "b".into(),
				value: 1.0,
			}],
		}
	}

	fn screen_pos(state: &ConstellationState, id: &str) -> (f64, f64) {
		let mut pos = (0.0, 0.0);
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = (
					node.x() as f64 * state.transform.k + state.transform.x,
					node.y() as f64 * state.transform.k + state.transform.y,
				);
			}
		});
		pos
	}

	#[test]
	fn press_and_release_on_a_node_is_a_click() {
		let mut state = ConstellationState::new(&data(), &[], 400.0, 300.0);
		let (x, y) = screen_pos(&state, "b");
		let idx = state.node_at_position(x, y).unwrap();
		state.press_node(idx, x, y);
		state.pointer_moved(x + 1.0, y);
		assert_eq!(state.release(), PointerRelease::NodeClick("b".into()));
	}

	#[test]
	fn dragging_a_node_is_not_a_click() {
		let mut state = ConstellationState::new(&data(), &[], 400.0, 300.0);
		let (x, y) = screen_pos(&state, "a");
		let idx = state.node_at_position(x, y).unwrap();
		state.press_node(idx, x, y);
		state.pointer_moved(x + 40.0, y + 40.0);
		assert_eq!(state.release(), PointerRelease::Gesture);
	}

	#[test]
	fn background_press_without_pan_is_a_click() {
		let mut state = ConstellationState::new(&data(), &[], 400.0, 300.0);
		state.press_background(2.0, 2.0);
		assert_eq!(state.release(), PointerRelease::BackgroundClick);
	}

	#[test]
	fn selected_sub_traits_orbit_their_parent() {
		let mut sub = TraitNode::new("s", "S", "#123");
		sub.parent = Some("a".into());
		let state = ConstellationState::new(
			&data(),
			&[TraitNode::new("b", "B", "#fff"), sub],
			400.0,
			300.0,
		);
		assert!(state.is_selected("b"));
		assert!(state.is_selected("s"));
		assert_eq!(state.satellites_of("a").count(), 1);
		assert_eq!(state.satellites_of("b").count(), 0);
	}

	#[test]
	fn hover_highlights_neighbors() {
		let mut state = ConstellationState::new(&data(), &[], 400.0, 300.0);
		let (x, y) = screen_pos(&state, "a");
		state.pointer_moved(x, y);
		let a = state.hover.node.unwrap();
		assert!(state.is_highlighted(a));
		assert_eq!(state.hover.neighbors.len(), 1);
	}
}
