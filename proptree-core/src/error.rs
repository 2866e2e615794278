//! Error types (part of the ambient stack): domain errors raised by
//! combinator misuse or malformed wire data, never by a failing property —
//! a failing property is reported via [`crate::report::Report`], not `Err`.

use thiserror::Error;

/// Errors this crate can raise itself, as opposed to a property simply
/// falsifying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProptreeError {
    /// A combinator that requires at least one alternative (`choice`,
    /// `frequency`, `item`, `choice_rec`'s non-recursive list) was given an
    /// empty collection.
    #[error("{combinator} requires at least one alternative, got an empty collection")]
    EmptyCombinatorInput { combinator: &'static str },

    /// `frequency` was given alternatives whose weights sum to zero.
    #[error("frequency requires at least one alternative with a non-zero weight")]
    ZeroTotalWeight,

    /// A recheck payload didn't parse as `"<size>_<value>_<gamma>"`.
    #[error("malformed recheck payload: {payload:?}")]
    MalformedRecheckPayload { payload: String },
}

pub type Result<T> = std::result::Result<T, ProptreeError>;
