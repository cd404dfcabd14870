use crate::catalog::CatalogStore;

#[derive(Clone, Debug)]
pub struct MapNode {
	pub id: String,
	pub label: String,
	pub color: String,
	/// Number of sub-traits, drawn as a larger disc.
	pub weight: usize,
}

#[derive(Clone, Debug)]
pub struct MapLink {
	pub source: String,
	pub target: String,
	pub value: f64,
}

/// Primary traits and their links, as laid out by the constellation.
#[derive(Clone, Debug, Default)]
pub struct MapData {
	pub nodes: Vec<MapNode>,
	pub links: Vec<MapLink>,
}

impl MapData {
	pub fn from_catalog(catalog: &CatalogStore) -> Self {
		let nodes = catalog
			.taxonomy()
			.iter()
			.map(|n| MapNode {
				id: n.id.clone(),
				label: n.name.clone(),
				color: n.color.clone(),
				weight: n.secondary.len(),
			})
			.collect();
		let links = catalog
			.links()
			.iter()
			.map(|l| MapLink {
				source: l.source.clone(),
				target: l.target.clone(),
				value: l.value,
			})
			.collect();
		Self { nodes, links }
	}
}
