//! Result type aliases for the services catalog.

use crate::HomelabError;

/// A specialized `Result` type for catalog operations.
pub type HomelabResult<T> = Result<T, HomelabError>;
