//! Pure scoring passes behind the discovery engine.

use std::sync::Arc;

use crate::catalog::{Character, TraitNode};

/// A character together with its current relevance.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCharacter {
	/// The catalog entry being scored.
	pub character: Arc<Character>,
	/// Fraction of the selection this character matches, in `[0, 1]`.
	pub relevance: f64,
}

/// A selected node matched by a character, drawn by the map and the legend.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	/// Id of the matching character.
	pub character_id: String,
	/// Id of the selected node it carries.
	pub node_id: String,
	/// The character's relevance at the time of the pass.
	pub strength: f64,
}

/// Fraction of `selection` found in the character's traits.
///
/// An empty selection means no filter, so everything scores 1.
pub fn relevance(character: &Character, selection: &[TraitNode]) -> f64 {
	if selection.is_empty() {
		return 1.0;
	}
	let matched = selection
		.iter()
		.filter(|node| character.has_trait(&node.id))
		.count();
	matched as f64 / selection.len() as f64
}

/// Score every character and order them by descending relevance.
///
/// Ties keep catalog order: `sort_by` is a stable merge sort.
pub fn rank(characters: &[Arc<Character>], selection: &[TraitNode]) -> Vec<ScoredCharacter> {
	let mut scored: Vec<ScoredCharacter> = characters
		.iter()
		.map(|c| ScoredCharacter {
			relevance: relevance(c, selection),
			character: Arc::clone(c),
		})
		.collect();
	if !selection.is_empty() {
		scored.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
	}
	scored
}

/// One connection per (character, selected node) match, in ranked order.
pub fn connections(ranked: &[ScoredCharacter], selection: &[TraitNode]) -> Vec<Connection> {
	let mut out = Vec::new();
	for scored in ranked {
		for node in selection {
			if scored.character.has_trait(&node.id) {
				out.push(Connection {
					character_id: scored.character.id.clone(),
					node_id: node.id.clone(),
					strength: scored.relevance,
				});
			}
		}
	}
	out
}
