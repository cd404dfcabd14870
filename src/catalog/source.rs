use serde::Deserialize;

use super::error::Result;
use super::types::{Character, TraitLink, TraitNode};
use super::CatalogStore;

const BUNDLED: &str = include_str!("../../data/constellation.json");

/// Raw catalog document, as shipped in `data/constellation.json`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSource {
	/// Primary trait nodes with their sub-traits.
	#[serde(default)]
	pub nodes: Vec<TraitNode>,
	/// Links between primaries.
	#[serde(default)]
	pub links: Vec<TraitLink>,
	/// Characters, in display order.
	#[serde(default)]
	pub characters: Vec<Character>,
}

impl CatalogSource {
	/// Parse a document without validating it.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

impl CatalogStore {
	/// Parse and validate a catalog document.
	pub fn from_json(json: &str) -> Result<Self> {
		let source = CatalogSource::from_json(json)?;
		CatalogStore::with_links(source.nodes, source.links, source.characters)
	}

	/// The catalog compiled into the binary.
	pub fn bundled() -> Result<Self> {
		Self::from_json(BUNDLED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::CatalogError;

	#[test]
	fn bundled_catalog_loads() {
		let store = CatalogStore::bundled().unwrap();
		assert_eq!(store.taxonomy().len(), 5);
		assert_eq!(store.characters().len(), 8);
		assert!(!store.links().is_empty());

		let witty = store.find_node("witty").unwrap();
		assert_eq!(witty.parent.as_deref(), Some("playful"));
		assert!(store.find_node("playful").unwrap().is_primary());
	}

	#[test]
	fn camel_case_payload_is_read() {
		let store = CatalogStore::from_json(
			r#"{
				"nodes": [{ "id": "x", "name": "X", "color": "red" }],
				"characters": [{
					"id": "a",
					"traits": ["x", "x"],
					"isNew": true,
					"popularity": 4.6,
					"imageSrc": "/a.jpg",
					"videoSrc": "/a.mp4",
					"sampleDialogue": ["hi"]
				}]
			}"#,
		)
		.unwrap();
		let a = store.character("a").unwrap();
		assert!(a.is_new);
		assert_eq!(a.image_src.as_deref(), Some("/a.jpg"));
		assert_eq!(a.video_src.as_deref(), Some("/a.mp4"));
		assert_eq!(a.popularity, Some(4.6));
		assert_eq!(a.traits, vec!["x"]);
		assert_eq!(a.sample_dialogue, vec!["hi"]);
	}

	#[test]
	fn malformed_document_is_rejected() {
		let err = CatalogStore::from_json("{ \"nodes\": 3 }").unwrap_err();
		assert!(matches!(err, CatalogError::Parse(_)));
	}

	#[test]
	fn empty_document_is_an_empty_catalog() {
		let store = CatalogStore::from_json("{}").unwrap();
		assert!(store.characters().is_empty());
		assert!(store.taxonomy().is_empty());
	}
}
