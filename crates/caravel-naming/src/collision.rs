//! Collision resolution for generated resource names

use crate::error::{NamingError, Result};
use crate::rules::ResourceClass;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Default bound on collision resolution attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SHORT_HASH_LEN: usize = 6;

/// Strategy for deriving an alternative when a name is already claimed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionStrategy {
    /// `base-1`, `base-2`, ...
    #[default]
    NumericSuffix,
    /// `base-{digest}` with a stable 6-character base-36 digest
    HashSuffix,
    /// Fail on the first collision, no retries
    Error,
}

/// Find a unique, rule-conformant name for `candidate`.
///
/// Fails with [`NamingError::NameTooLong`] when the candidate already
/// exceeds the class limit (a suffix cannot shrink it), with
/// [`NamingError::NamingConflict`] under [`CollisionStrategy::Error`],
/// and with [`NamingError::UnresolvableCollision`] once `max_attempts`
/// derived candidates are exhausted.
pub fn resolve_collision(
    candidate: &str,
    class: ResourceClass,
    existing: &HashSet<String>,
    strategy: CollisionStrategy,
    max_attempts: u32,
) -> Result<String> {
    let limit = class.max_length();
    if candidate.chars().count() > limit {
        return Err(NamingError::NameTooLong {
            class,
            name: candidate.to_string(),
            limit,
        });
    }

    if !existing.contains(candidate) && class.matches(candidate) {
        return Ok(candidate.to_string());
    }

    for attempt in 1..=max_attempts {
        let derived = match strategy {
            CollisionStrategy::NumericSuffix => format!("{}-{}", candidate, attempt),
            CollisionStrategy::HashSuffix => {
                let digest = short_hash(&format!("{}{}", candidate, attempt));
                format!("{}-{}", candidate, digest)
            }
            CollisionStrategy::Error => {
                return Err(NamingError::NamingConflict(candidate.to_string()));
            }
        };
        if derived.chars().count() <= limit
            && !existing.contains(&derived)
            && class.matches(&derived)
        {
            return Ok(derived);
        }
    }

    Err(NamingError::UnresolvableCollision {
        candidate: candidate.to_string(),
        attempts: max_attempts,
    })
}

/// Stable 6-character base-36 digest of `input`.
///
/// Same input always yields the same digest across runs and
/// processes, so re-resolving identical configuration produces
/// identical infrastructure names.
fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut value = digest[..8]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
    let mut out = [0u8; SHORT_HASH_LEN];
    for slot in out.iter_mut().rev() {
        *slot = BASE36_ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    out.iter().map(|&b| b as char).collect()
}
