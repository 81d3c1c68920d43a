use thiserror::Error;

/// Error returned by lookups and removals that exhaust their search path
/// without an exact key match.
///
/// This is the only error this crate produces: inserts cannot fail, and a
/// removal that returns this error has left the tree untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("key not found")]
pub struct KeyNotFound;
