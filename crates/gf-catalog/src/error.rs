//! Catalog-specific error types.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by catalog lookups.
///
/// None of these are fatal to a solve: callers degrade to an inert part
/// (unknown type) or the type's declared defaults (invalid settings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown part type: {type_id}")]
    UnknownPartType { type_id: String },

    #[error("Invalid settings for {type_id}: {what}")]
    InvalidSettings {
        type_id: String,
        what: &'static str,
    },
}
