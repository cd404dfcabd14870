use serde::Deserialize;

/// A tag in the trait taxonomy.
///
/// Primary and secondary nodes share this one shape. Primaries carry their
/// sub-traits in `secondary`; secondaries carry the id of their primary in
/// `parent`. Only `id` takes part in matching, the rest is display payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitNode {
	/// Identifier, unique across primaries and secondaries.
	pub id: String,
	/// Display label.
	pub name: String,
	/// CSS colour used by the map and the legend.
	pub color: String,
	/// Short blurb shown in the details panel.
	#[serde(default)]
	pub description: Option<String>,
	/// Sub-traits, empty on secondary nodes.
	#[serde(default)]
	pub secondary: Vec<TraitNode>,
	/// Owning primary id, set on secondary nodes at ingestion.
	#[serde(skip)]
	pub parent: Option<String>,
}

impl TraitNode {
	/// Build a bare node with no description or sub-traits.
	pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			color: color.into(),
			description: None,
			secondary: Vec::new(),
			parent: None,
		}
	}

	/// Whether this node sits at the top of the taxonomy.
	pub fn is_primary(&self) -> bool {
		self.parent.is_none()
	}

	/// The node as it is held in a selection: sub-traits stripped, parent kept.
	pub fn as_selection(&self) -> TraitNode {
		TraitNode {
			secondary: Vec::new(),
			..self.clone()
		}
	}
}

/// A weighted edge between two primary traits, laid out by the map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TraitLink {
	/// Primary id at one end.
	pub source: String,
	/// Primary id at the other end.
	pub target: String,
	/// Link weight; thicker lines for stronger affinity.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

/// A character in the catalog.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
	/// Unique identifier.
	pub id: String,
	/// Trait ids, in tagging order with duplicates removed.
	#[serde(default)]
	pub traits: Vec<String>,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// One-line pitch shown on the card.
	#[serde(default)]
	pub description: String,
	/// Still image for the card.
	#[serde(default)]
	pub image_src: Option<String>,
	/// Clip played while the card is hovered.
	#[serde(default)]
	pub video_src: Option<String>,
	/// Shows the "New" badge.
	#[serde(default)]
	pub is_new: bool,
	/// Lines the card cycles through.
	#[serde(default)]
	pub sample_dialogue: Vec<String>,
	/// Average rating; the ratings count is derived from it.
	#[serde(default)]
	pub popularity: Option<f64>,
}

impl Character {
	/// A character with only an id and traits, used by tests and fixtures.
	pub fn new<I, S>(id: impl Into<String>, traits: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let id = id.into();
		let mut character = Self {
			name: id.clone(),
			id,
			traits: traits.into_iter().map(Into::into).collect(),
			description: String::new(),
			image_src: None,
			video_src: None,
			is_new: false,
			sample_dialogue: Vec::new(),
			popularity: None,
		};
		character.dedup_traits();
		character
	}

	/// Whether the character is tagged with `trait_id`.
	pub fn has_trait(&self, trait_id: &str) -> bool {
		self.traits.iter().any(|t| t == trait_id)
	}

	pub(crate) fn dedup_traits(&mut self) {
		let mut seen = Vec::with_capacity(self.traits.len());
		self.traits.retain(|t| {
			if seen.contains(t) {
				false
			} else {
				seen.push(t.clone());
				true
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_traits_collapse_in_order() {
		let c = Character::new("a", ["x", "y", "x", "z", "y"]);
		assert_eq!(c.traits, vec!["x", "y", "z"]);
		assert!(c.has_trait("z"));
		assert!(!c.has_trait("w"));
	}

	#[test]
	fn selection_copy_drops_sub_traits() {
		let mut primary = TraitNode::new("playful", "Playful", "#fff");
		primary.secondary.push(TraitNode::new("witty", "Witty", "#eee"));
		let selected = primary.as_selection();
		assert!(selected.secondary.is_empty());
		assert_eq!(selected.id, "playful");
		assert!(selected.is_primary());
	}
}
