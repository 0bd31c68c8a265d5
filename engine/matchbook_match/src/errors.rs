//! Construction-time errors for case chains.
//!
//! Structural mistakes in a pattern (a remainder marker in the middle of a
//! sequence, say) are rejected when the case is built, not when a subject
//! happens to exercise the broken position. Runtime failures use
//! [`matchbook_value::MatchError`] instead.

use thiserror::Error;

/// A pattern that can never be matched as written.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CaseError {
    /// `head()`, `tail()` or `rest()` appeared outside a sequence pattern.
    #[error("sequence marker `{marker}` used outside a sequence pattern")]
    MarkerOutsideSequence {
        /// The offending marker's name.
        marker: &'static str,
    },

    /// `head()` appeared anywhere but the first position of a sequence.
    #[error("`head` must be the first element of a sequence pattern (found at position {position})")]
    HeadNotFirst {
        /// Zero-based position where the marker was found.
        position: usize,
    },

    /// `tail()` or `rest()` appeared anywhere but the last position.
    #[error("`{marker}` must be the last element of a sequence pattern (found at position {position})")]
    MarkerNotLast {
        /// The offending marker's name.
        marker: &'static str,
        /// Zero-based position where the marker was found.
        position: usize,
    },

    /// More than one remainder marker in the same sequence.
    #[error("sequence pattern has more than one `{marker}` marker")]
    DuplicateMarker {
        /// The duplicated marker's name.
        marker: &'static str,
    },
}
