//! Trait selection and character relevance.

mod relevance;

use log::debug;

use crate::catalog::{CatalogStore, TraitNode};

pub use relevance::{Connection, ScoredCharacter, connections, rank, relevance};

/// Holds one session's trait selection and the views derived from it.
///
/// Every mutation recomputes the ranked characters and the connection set
/// before returning, so the accessors always reflect the current selection.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryEngine {
	catalog: CatalogStore,
	selection: Vec<TraitNode>,
	active: Vec<ScoredCharacter>,
	connections: Vec<Connection>,
}

impl DiscoveryEngine {
	/// Start a session over `catalog` with nothing selected.
	pub fn new(catalog: CatalogStore) -> Self {
		let mut engine = Self {
			catalog,
			..Default::default()
		};
		engine.recompute();
		engine
	}

	/// Select `node`, or deselect it if a node with the same id is selected.
	///
	/// # Panics
	///
	/// Panics if `node.id` is empty.
	pub fn toggle_node(&mut self, node: &TraitNode) {
		assert!(
			!node.id.is_empty(),
			"toggle_node called with a trait node that has no id ({:?})",
			node.name
		);
		if let Some(pos) = self.selection.iter().position(|n| n.id == node.id) {
			self.selection.remove(pos);
			debug!("Deselected trait {}", node.id);
		} else {
			self.selection.push(node.as_selection());
			debug!("Selected trait {}", node.id);
		}
		self.recompute();
	}

	/// Drop every selected node; all characters return to full relevance.
	pub fn clear_selection(&mut self) {
		debug!("Cleared {} selected traits", self.selection.len());
		self.selection.clear();
		self.recompute();
	}

	/// Swap in a new catalog. The selection is kept and rescored.
	pub fn load_catalog(&mut self, catalog: CatalogStore) {
		self.catalog = catalog;
		self.recompute();
	}

	/// Characters ranked by descending relevance.
	pub fn active_characters(&self) -> &[ScoredCharacter] {
		&self.active
	}

	/// Selected nodes, in the order they were picked.
	pub fn selection(&self) -> &[TraitNode] {
		&self.selection
	}

	/// Matches between ranked characters and selected nodes.
	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	/// The catalog currently being ranked.
	pub fn catalog(&self) -> &CatalogStore {
		&self.catalog
	}

	/// Whether a node with this id is in the selection.
	pub fn is_selected(&self, node_id: &str) -> bool {
		self.selection.iter().any(|n| n.id == node_id)
	}

	/// Current relevance of a character, if it is in the catalog.
	pub fn relevance_of(&self, character_id: &str) -> Option<f64> {
		self.active
			.iter()
			.find(|s| s.character.id == character_id)
			.map(|s| s.relevance)
	}

	/// Number of characters matching a selected node.
	pub fn match_count(&self, node_id: &str) -> usize {
		self.connections
			.iter()
			.filter(|c| c.node_id == node_id)
			.count()
	}

	fn recompute(&mut self) {
		self.active = rank(self.catalog.characters(), &self.selection);
		self.connections = connections(&self.active, &self.selection);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::Character;

	fn node(id: &str) -> TraitNode {
		TraitNode::new(id, id.to_uppercase(), "#7047ff")
	}

	fn abc() -> DiscoveryEngine {
		let catalog = CatalogStore::new(
			vec![node("x"), node("y")],
			vec![
				Character::new("A", ["x", "y"]),
				Character::new("B", ["y"]),
				Character::new("C", Vec::<String>::new()),
			],
		)
		.unwrap();
		DiscoveryEngine::new(catalog)
	}

	fn order(engine: &DiscoveryEngine) -> Vec<(&str, f64)> {
		engine
			.active_characters()
			.iter()
			.map(|s| (s.character.id.as_str(), s.relevance))
			.collect()
	}

	fn links(engine: &DiscoveryEngine) -> Vec<(&str, &str, f64)> {
		engine
			.connections()
			.iter()
			.map(|c| (c.character_id.as_str(), c.node_id.as_str(), c.strength))
			.collect()
	}

	#[test]
	fn baseline_keeps_catalog_order() {
		let engine = abc();
		assert_eq!(order(&engine), [("A", 1.0), ("B", 1.0), ("C", 1.0)]);
		assert!(engine.connections().is_empty());
		assert!(engine.selection().is_empty());
	}

	#[test]
	fn walkthrough_of_selection_changes() {
		let mut engine = abc();

		engine.toggle_node(&node("x"));
		assert_eq!(order(&engine), [("A", 1.0), ("B", 0.0), ("C", 0.0)]);
		assert_eq!(links(&engine), [("A", "x", 1.0)]);

		engine.toggle_node(&node("y"));
		assert_eq!(order(&engine), [("A", 1.0), ("B", 0.5), ("C", 0.0)]);
		assert_eq!(
			links(&engine),
			[("A", "x", 1.0), ("A", "y", 1.0), ("B", "y", 0.5)]
		);

		// Only y is left, and both A and B carry it.
		engine.toggle_node(&node("x"));
		assert_eq!(order(&engine), [("A", 1.0), ("B", 1.0), ("C", 0.0)]);
		assert_eq!(links(&engine), [("A", "y", 1.0), ("B", "y", 1.0)]);

		engine.clear_selection();
		assert_eq!(order(&engine), [("A", 1.0), ("B", 1.0), ("C", 1.0)]);
		assert!(engine.connections().is_empty());
	}

	#[test]
	fn double_toggle_restores_selection() {
		let mut engine = abc();
		engine.toggle_node(&node("y"));
		engine.toggle_node(&node("x"));
		let before: Vec<_> = engine.selection().iter().map(|n| n.id.clone()).collect();

		engine.toggle_node(&node("q"));
		engine.toggle_node(&node("q"));
		let after: Vec<_> = engine.selection().iter().map(|n| n.id.clone()).collect();
		assert_eq!(before, after);
		assert_eq!(after, ["y", "x"]);
	}

	#[test]
	fn reselecting_an_earlier_node_moves_it_to_the_end() {
		let mut engine = abc();
		engine.toggle_node(&node("y"));
		engine.toggle_node(&node("x"));

		engine.toggle_node(&node("y"));
		engine.toggle_node(&node("y"));
		let ids: Vec<_> = engine.selection().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["x", "y"]);
		// Scores depend on membership only.
		assert_eq!(order(&engine), [("A", 1.0), ("B", 0.5), ("C", 0.0)]);
	}

	#[test]
	fn toggle_matches_by_id_only() {
		let mut engine = abc();
		engine.toggle_node(&node("x"));
		engine.toggle_node(&TraitNode::new("x", "Another label", "#000"));
		assert!(engine.selection().is_empty());
	}

	#[test]
	fn sub_trait_scores_like_a_primary() {
		let mut playful = node("playful");
		playful.secondary.push(node("witty"));
		let catalog = CatalogStore::new(
			vec![playful],
			vec![Character::new("kai", ["witty"]), Character::new("dorian", ["playful"])],
		)
		.unwrap();
		let mut engine = DiscoveryEngine::new(catalog);

		let witty = engine.catalog().find_node("witty").unwrap().clone();
		engine.toggle_node(&witty);
		assert_eq!(engine.selection()[0].parent.as_deref(), Some("playful"));
		assert_eq!(order(&engine), [("kai", 1.0), ("dorian", 0.0)]);
		assert_eq!(engine.match_count("witty"), 1);
	}

	#[test]
	fn unknown_node_is_not_an_error() {
		let mut engine = abc();
		engine.toggle_node(&node("nowhere"));
		assert!(engine.active_characters().iter().all(|s| s.relevance == 0.0));
		assert_eq!(order(&engine).len(), 3);
		assert!(engine.connections().is_empty());
		assert!(engine.is_selected("nowhere"));
	}

	#[test]
	fn empty_catalog_yields_empty_views() {
		let mut engine = DiscoveryEngine::new(CatalogStore::default());
		engine.toggle_node(&node("x"));
		assert!(engine.active_characters().is_empty());
		assert!(engine.connections().is_empty());
	}

	#[test]
	#[should_panic(expected = "no id")]
	fn toggling_a_node_without_id_panics() {
		let mut engine = abc();
		engine.toggle_node(&TraitNode::new("", "Nameless", "#000"));
	}

	#[test]
	fn loading_a_catalog_rescores_the_selection() {
		let mut engine = abc();
		engine.toggle_node(&node("y"));
		assert_eq!(engine.relevance_of("B"), Some(1.0));

		let replacement = CatalogStore::new(
			vec![node("y")],
			vec![Character::new("D", Vec::<String>::new()), Character::new("E", ["y"])],
		)
		.unwrap();
		engine.load_catalog(replacement);

		assert_eq!(order(&engine), [("E", 1.0), ("D", 0.0)]);
		assert_eq!(engine.relevance_of("B"), None);
		assert_eq!(links(&engine), [("E", "y", 1.0)]);
	}
}
