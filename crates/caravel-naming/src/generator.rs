//! Resource name generation
//!
//! Orchestrates the naming convention, registry normalization and
//! collision resolution to produce the full set of resource names for
//! one deployment stage.

use crate::collision::{self, CollisionStrategy, DEFAULT_MAX_ATTEMPTS};
use crate::convention::NamingConvention;
use crate::error::{NamingError, Result};
use crate::normalize::normalize_for_registry;
use crate::rules::ResourceClass;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Base identifiers the generator derives stage-qualified names from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseNames {
    /// Application identifier, also the base for the cluster, log
    /// group and security group names
    pub app_name: String,
    /// Container registry repository base name
    pub repository: String,
    /// Suffix joined onto the app name to form the cluster name
    pub cluster_suffix: String,
    /// ECS service base name
    pub service: String,
    /// Task definition family base name
    pub task_family: String,
    /// Load balancer base name
    pub load_balancer: String,
    /// Target group base name
    pub target_group: String,
}

/// The nine derived identifiers for one deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    pub repository: String,
    pub cluster: String,
    pub service: String,
    pub task_family: String,
    pub load_balancer: String,
    pub target_group: String,
    pub log_group: String,
    pub alb_security_group: String,
    pub service_security_group: String,
}

impl ResourceNames {
    /// The names paired with their resource classes. The two security
    /// groups share a class but are distinct entries.
    pub fn entries(&self) -> [(ResourceClass, &str); 9] {
        [
            (ResourceClass::Repository, self.repository.as_str()),
            (ResourceClass::Cluster, self.cluster.as_str()),
            (ResourceClass::Service, self.service.as_str()),
            (ResourceClass::TaskFamily, self.task_family.as_str()),
            (ResourceClass::LoadBalancer, self.load_balancer.as_str()),
            (ResourceClass::TargetGroup, self.target_group.as_str()),
            (ResourceClass::LogGroup, self.log_group.as_str()),
            (ResourceClass::SecurityGroup, self.alb_security_group.as_str()),
            (
                ResourceClass::SecurityGroup,
                self.service_security_group.as_str(),
            ),
        ]
    }
}

/// Names already claimed within a process run.
///
/// Owned by the caller and passed explicitly into each generation, so
/// resolution stays a pure function of its inputs. A caller may share
/// one set across stages to extend collision avoidance across
/// resolutions; serializing that access is the caller's
/// responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedNames(HashSet<String>);

impl ClaimedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a name. Returns false when it was already claimed.
    pub fn claim(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.0
    }
}

impl From<HashSet<String>> for ClaimedNames {
    fn from(names: HashSet<String>) -> Self {
        Self(names)
    }
}

impl FromIterator<String> for ClaimedNames {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Derives the full resource name set for a deployment stage
#[derive(Debug, Clone)]
pub struct NameGenerator {
    convention: NamingConvention,
    strategy: CollisionStrategy,
    max_attempts: u32,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self {
            convention: NamingConvention::default(),
            strategy: CollisionStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl NameGenerator {
    pub fn new(
        convention: NamingConvention,
        strategy: CollisionStrategy,
        max_attempts: u32,
    ) -> Self {
        Self {
            convention,
            strategy,
            max_attempts,
        }
    }

    /// Generate the nine resource names for `stage`.
    ///
    /// Each resolved name is claimed before the next one resolves, so
    /// members of one set never collide with each other. The set is
    /// committed into `claimed` only after it passes cross-validation;
    /// a failed generation leaves `claimed` untouched.
    pub fn generate(
        &self,
        base: &BaseNames,
        stage: &str,
        claimed: &mut ClaimedNames,
    ) -> Result<ResourceNames> {
        let mut scratch = claimed.as_set().clone();

        let repository_base =
            normalize_for_registry(&self.convention.apply(&base.repository, stage));
        let repository = self.resolve(repository_base, ResourceClass::Repository, &mut scratch)?;

        let cluster_base = self.convention.join(&base.app_name, &base.cluster_suffix);
        let cluster = self.resolve(
            self.convention.apply(&cluster_base, stage),
            ResourceClass::Cluster,
            &mut scratch,
        )?;

        let service = self.resolve(
            self.convention.apply(&base.service, stage),
            ResourceClass::Service,
            &mut scratch,
        )?;

        let task_family = self.resolve(
            self.convention.apply(&base.task_family, stage),
            ResourceClass::TaskFamily,
            &mut scratch,
        )?;

        let load_balancer = self.resolve(
            self.convention.apply(&base.load_balancer, stage),
            ResourceClass::LoadBalancer,
            &mut scratch,
        )?;

        let target_group = self.resolve(
            self.convention.apply(&base.target_group, stage),
            ResourceClass::TargetGroup,
            &mut scratch,
        )?;

        let log_group = self.resolve(
            format!("/aws/ecs/{}", self.convention.apply(&base.app_name, stage)),
            ResourceClass::LogGroup,
            &mut scratch,
        )?;

        let alb_sg_base = self.convention.join(&base.app_name, "alb-sg");
        let alb_security_group = self.resolve(
            self.convention.apply(&alb_sg_base, stage),
            ResourceClass::SecurityGroup,
            &mut scratch,
        )?;

        let service_sg_base = self.convention.join(&base.app_name, "service-sg");
        let service_security_group = self.resolve(
            self.convention.apply(&service_sg_base, stage),
            ResourceClass::SecurityGroup,
            &mut scratch,
        )?;

        let names = ResourceNames {
            repository,
            cluster,
            service,
            task_family,
            load_balancer,
            target_group,
            log_group,
            alb_security_group,
            service_security_group,
        };

        cross_validate(&names)?;

        for (_, name) in names.entries() {
            claimed.claim(name);
        }
        debug!(
            stage = %stage,
            claimed_total = claimed.len(),
            "Generated resource name set"
        );

        Ok(names)
    }

    fn resolve(
        &self,
        candidate: String,
        class: ResourceClass,
        scratch: &mut HashSet<String>,
    ) -> Result<String> {
        let resolved =
            collision::resolve_collision(&candidate, class, scratch, self.strategy, self.max_attempts)?;
        scratch.insert(resolved.clone());
        Ok(resolved)
    }
}

/// Reject duplicates, pattern violations and over-length names that
/// collision resolution did not catch.
fn cross_validate(names: &ResourceNames) -> Result<()> {
    let mut problems = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (class, name) in names.entries() {
        if !seen.insert(name) {
            problems.push(format!("duplicate name '{}'", name));
        }
        if !class.matches(name) {
            problems.push(format!("'{}' does not match the {} pattern", name, class));
        }
        if name.chars().count() > class.max_length() {
            problems.push(format!(
                "'{}' exceeds the {}-character limit for {}",
                name,
                class.max_length(),
                class
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(NamingError::InvalidGeneratedName(problems.join("; ")))
    }
}
