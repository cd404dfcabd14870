//! Errors raised while building a catalog.

use thiserror::Error;

/// Result alias for catalog ingestion.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog ingestion errors.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The source document could not be parsed
	#[error("Malformed catalog data: {0}")]
	Parse(#[from] serde_json::Error),

	/// A trait node has an empty id
	#[error("Trait node {name:?} has an empty id")]
	EmptyTraitId {
		/// Display name of the offending node
		name: String,
	},

	/// Two taxonomy nodes share an id
	#[error("Duplicate trait id: {0}")]
	DuplicateTrait(String),

	/// A character has an empty id
	#[error("Character {name:?} has an empty id")]
	EmptyCharacterId {
		/// Display name of the offending character
		name: String,
	},

	/// Two characters share an id
	#[error("Duplicate character id: {0}")]
	DuplicateCharacter(String),
}
