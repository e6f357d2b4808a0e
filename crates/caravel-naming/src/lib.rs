//! Caravel Naming Engine
//!
//! This crate deterministically derives every cloud resource name a
//! deployment will use and validates the result against per-resource
//! naming and length rules before any infrastructure is provisioned.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 caravel-core                     │
//! │           (configuration resolver)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               caravel-naming                     │
//! │  ┌──────────────┐  ┌──────────────────────────┐ │
//! │  │  Convention  │  │  Rule Catalog             │ │
//! │  │  (stage tag) │  │  (patterns, max lengths)  │ │
//! │  └──────┬───────┘  └────────────┬─────────────┘ │
//! │  ┌──────▼───────┐  ┌────────────▼─────────────┐ │
//! │  │  Normalizer  │  │  Collision Resolver       │ │
//! │  │  (registry)  │  │  (numeric / hash / error) │ │
//! │  └──────┬───────┘  └────────────┬─────────────┘ │
//! │         └──────────┬────────────┘               │
//! │             ┌──────▼───────┐                    │
//! │             │  Generator   │                    │
//! │             └──────────────┘                    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Generation is a pure, synchronous computation over in-memory
//! structures. The only shared state is the caller-owned
//! [`ClaimedNames`] set threaded explicitly through each call.

pub mod collision;
pub mod convention;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod rules;

// Re-exports
pub use collision::{CollisionStrategy, DEFAULT_MAX_ATTEMPTS, resolve_collision};
pub use convention::NamingConvention;
pub use error::{NamingError, Result};
pub use generator::{BaseNames, ClaimedNames, NameGenerator, ResourceNames};
pub use normalize::normalize_for_registry;
pub use rules::{
    NamingRule, RESERVED_PREFIXES, ResourceClass, has_reserved_prefix, matches_generic,
};
