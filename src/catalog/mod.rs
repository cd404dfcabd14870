//! Immutable catalog of characters and the trait taxonomy.

mod error;
mod source;
mod types;

use std::collections::HashSet;
use std::sync::Arc;

use log::{info, warn};

pub use error::{CatalogError, Result};
pub use source::CatalogSource;
pub use types::{Character, TraitLink, TraitNode};

/// Read-only store of characters and trait nodes.
///
/// Built once per session and never mutated. Replacing the data means
/// building a new store and handing it to the engine.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
	characters: Vec<Arc<Character>>,
	taxonomy: Vec<TraitNode>,
	links: Vec<TraitLink>,
}

impl CatalogStore {
	/// Validate and normalize a taxonomy and a character list.
	pub fn new(taxonomy: Vec<TraitNode>, characters: Vec<Character>) -> Result<Self> {
		Self::with_links(taxonomy, Vec::new(), characters)
	}

	/// Same as [`CatalogStore::new`], with map links between primaries.
	pub fn with_links(
		mut taxonomy: Vec<TraitNode>,
		links: Vec<TraitLink>,
		characters: Vec<Character>,
	) -> Result<Self> {
		let mut trait_ids = HashSet::new();
		for primary in &mut taxonomy {
			register_node(&mut trait_ids, primary)?;
			primary.parent = None;
			for sub in &mut primary.secondary {
				register_node(&mut trait_ids, sub)?;
				// Nesting stops at one level.
				sub.secondary.clear();
				sub.parent = Some(primary.id.clone());
			}
		}

		let mut character_ids = HashSet::new();
		let mut store = Vec::with_capacity(characters.len());
		for mut character in characters {
			if character.id.is_empty() {
				return Err(CatalogError::EmptyCharacterId {
					name: character.name,
				});
			}
			if !character_ids.insert(character.id.clone()) {
				return Err(CatalogError::DuplicateCharacter(character.id));
			}
			character.dedup_traits();
			for t in character.traits.iter().filter(|t| !trait_ids.contains(*t)) {
				warn!("Character {} carries unknown trait {}", character.id, t);
			}
			store.push(Arc::new(character));
		}

		info!(
			"Catalog loaded: {} characters, {} trait nodes",
			store.len(),
			trait_ids.len()
		);

		Ok(Self {
			characters: store,
			taxonomy,
			links,
		})
	}

	/// All characters, in definition order.
	pub fn characters(&self) -> &[Arc<Character>] {
		&self.characters
	}

	/// Primary trait nodes, each with its sub-traits.
	pub fn taxonomy(&self) -> &[TraitNode] {
		&self.taxonomy
	}

	/// Links between primary nodes for the map layout.
	pub fn links(&self) -> &[TraitLink] {
		&self.links
	}

	/// Look up a primary or secondary node by id.
	pub fn find_node(&self, id: &str) -> Option<&TraitNode> {
		self.taxonomy.iter().find_map(|primary| {
			if primary.id == id {
				Some(primary)
			} else {
				primary.secondary.iter().find(|sub| sub.id == id)
			}
		})
	}

	/// Look up a character by id.
	pub fn character(&self, id: &str) -> Option<&Arc<Character>> {
		self.characters.iter().find(|c| c.id == id)
	}
}

fn register_node(seen: &mut HashSet<String>, node: &TraitNode) -> Result<()> {
	if node.id.is_empty() {
		return Err(CatalogError::EmptyTraitId {
			name: node.name.clone(),
		});
	}
	if !seen.insert(node.id.clone()) {
		return Err(CatalogError::DuplicateTrait(node.id.clone()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn primary(id: &str, subs: &[&str]) -> TraitNode {
		let mut node = TraitNode::new(id, id, "#000");
		node.secondary = subs.iter().map(|s| TraitNode::new(*s, *s, "#111")).collect();
		node
	}

	#[test]
	fn characters_keep_definition_order() {
		let store = CatalogStore::new(
			vec![primary("x", &[])],
			vec![
				Character::new("c", ["x"]),
				Character::new("a", Vec::<String>::new()),
				Character::new("b", ["x"]),
			],
		)
		.unwrap();
		let ids: Vec<_> = store.characters().iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, ["c", "a", "b"]);
	}

	#[test]
	fn secondary_nodes_learn_their_parent() {
		let store = CatalogStore::new(vec![primary("p", &["s1", "s2"])], vec![]).unwrap();
		assert_eq!(store.find_node("s2").unwrap().parent.as_deref(), Some("p"));
		assert!(store.find_node("p").unwrap().parent.is_none());
		assert!(store.find_node("nope").is_none());
	}

	#[test]
	fn sub_trait_colliding_with_primary_is_rejected() {
		let err = CatalogStore::new(vec![primary("p", &[]), primary("q", &["p"])], vec![])
			.unwrap_err();
		assert!(matches!(err, CatalogError::DuplicateTrait(id) if id == "p"));
	}

	#[test]
	fn empty_trait_id_is_rejected() {
		let err = CatalogStore::new(vec![primary("p", &[""])], vec![]).unwrap_err();
		assert!(matches!(err, CatalogError::EmptyTraitId { .. }));
	}

	#[test]
	fn duplicate_character_is_rejected() {
		let err = CatalogStore::new(
			vec![],
			vec![Character::new("a", ["x"]), Character::new("a", ["y"])],
		)
		.unwrap_err();
		assert!(matches!(err, CatalogError::DuplicateCharacter(id) if id == "a"));
	}

	#[test]
	fn traits_are_deduplicated_on_ingest() {
		let mut raw = Character::new("a", Vec::<String>::new());
		raw.traits = vec!["x".into(), "x".into(), "y".into()];
		let store = CatalogStore::new(vec![], vec![raw]).unwrap();
		assert_eq!(store.character("a").unwrap().traits, vec!["x", "y"]);
	}
}
