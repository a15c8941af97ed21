//! Menu construction errors

use thiserror::Error;

/// Errors raised when building menus
///
/// Construction is the only fallible surface; every lookup-style query in
/// this crate reports absence with `Option` or `bool` instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Inner page size outside (0, 45]
    #[error("page size must be between 1 and 45 slots, got {0}")]
    InvalidPageSize(usize),
    /// A chain was built from an empty page sequence
    #[error("page sequence must supply at least one page")]
    EmptyChain,
}
