//! Error values produced by core operations.

use thiserror::Error;

use crate::member::MemberId;

/// Errors produced by core operations.
///
/// All of these are ordinary values returned to the caller; the core never
/// panics on malformed family data. What a caller does with one of these
/// (error payload, empty result, status code) is the surface's decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FamilyError {
    /// A required member field was absent from a submitted record.
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    /// The referenced member does not exist in the family.
    #[error("member {id} not found")]
    NotFound { id: MemberId },

    /// A record without an id was offered to the graph description builder.
    #[error("record without an id cannot appear in the family graph")]
    MalformedDescription,
}
