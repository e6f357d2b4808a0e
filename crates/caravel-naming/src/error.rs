//! Naming engine error types

use crate::rules::ResourceClass;
use thiserror::Error;

/// Errors raised while deriving resource names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The candidate already exceeds the class limit, so no suffix
    /// strategy can produce a conformant name.
    #[error("name '{name}' exceeds the {limit}-character limit for {class}")]
    NameTooLong {
        class: ResourceClass,
        name: String,
        limit: usize,
    },

    #[error("name '{0}' is already claimed")]
    NamingConflict(String),

    #[error("no unique name found for '{candidate}' within {attempts} attempts")]
    UnresolvableCollision { candidate: String, attempts: u32 },

    #[error("generated name set is invalid: {0}")]
    InvalidGeneratedName(String),
}

pub type Result<T> = std::result::Result<T, NamingError>;
