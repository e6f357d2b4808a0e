//! Naming rule catalog
//!
//! Static table of per-resource-class validation patterns, maximum
//! lengths and reserved name prefixes, shared by name generation and
//! configuration validation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic AWS resource name: starts and ends with an alphanumeric
/// character, interior may contain hyphens. Single-character names
/// are legal.
const GENERIC_PATTERN: &str = r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$";

/// Container registry name: lowercase alphanumeric segments separated
/// by `.`, `_`, `-` or `/`.
const REGISTRY_PATTERN: &str = r"^[a-z0-9]+(?:[._/-][a-z0-9]+)*$";

/// Log path: alphanumeric plus `.`, `_`, `/`, `-`; a leading `/` is
/// legal.
const LOG_PATH_PATTERN: &str = r"^[A-Za-z0-9._/-]+$";

/// Name prefixes reserved by AWS. A generated name starting with one
/// of these is reported as a warning, never an error.
pub const RESERVED_PREFIXES: &[&str] = &["aws", "amazon", "ecs", "ec2"];

/// Resource classes with their own naming and length rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceClass {
    /// Container image repository (ECR)
    Repository,
    /// ECS cluster
    Cluster,
    /// ECS service
    Service,
    /// Task definition family
    TaskFamily,
    /// Application load balancer
    LoadBalancer,
    /// Load balancer target group
    TargetGroup,
    /// CloudWatch log group
    LogGroup,
    /// EC2 security group
    SecurityGroup,
}

/// Validation pattern and maximum length for one resource class
#[derive(Debug, Clone, Copy)]
pub struct NamingRule {
    pub pattern: &'static str,
    pub max_length: usize,
}

impl ResourceClass {
    /// The naming rule for this class
    pub fn rule(&self) -> NamingRule {
        match self {
            Self::Repository => NamingRule {
                pattern: REGISTRY_PATTERN,
                max_length: 256,
            },
            Self::Cluster | Self::Service | Self::TaskFamily => NamingRule {
                pattern: GENERIC_PATTERN,
                max_length: 255,
            },
            Self::LoadBalancer | Self::TargetGroup => NamingRule {
                pattern: GENERIC_PATTERN,
                max_length: 32,
            },
            Self::LogGroup => NamingRule {
                pattern: LOG_PATH_PATTERN,
                max_length: 512,
            },
            Self::SecurityGroup => NamingRule {
                pattern: GENERIC_PATTERN,
                max_length: 255,
            },
        }
    }

    /// Maximum length in characters for this class
    pub fn max_length(&self) -> usize {
        self.rule().max_length
    }

    /// Whether `name` conforms to this class's pattern
    pub fn matches(&self, name: &str) -> bool {
        let re = Regex::new(self.rule().pattern).expect("catalog patterns are valid regexes");
        re.is_match(name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Cluster => "cluster",
            Self::Service => "service",
            Self::TaskFamily => "task-family",
            Self::LoadBalancer => "load-balancer",
            Self::TargetGroup => "target-group",
            Self::LogGroup => "log-group",
            Self::SecurityGroup => "security-group",
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `name` conforms to the generic AWS naming pattern.
///
/// Base identifiers are checked against this pattern before any stage
/// qualification happens.
pub fn matches_generic(name: &str) -> bool {
    let re = Regex::new(GENERIC_PATTERN).expect("catalog patterns are valid regexes");
    re.is_match(name)
}

/// Whether `name` starts with a reserved prefix, case-insensitively
pub fn has_reserved_prefix(name: &str) -> bool {
    let lowered = name.to_lowercase();
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_pattern() {
        assert!(ResourceClass::Service.matches("my-service"));
        assert!(ResourceClass::Service.matches("a"));
        assert!(ResourceClass::Service.matches("Svc01"));
        assert!(!ResourceClass::Service.matches("-leading"));
        assert!(!ResourceClass::Service.matches("trailing-"));
        assert!(!ResourceClass::Service.matches("under_score"));
        assert!(!ResourceClass::Service.matches(""));
    }

    #[test]
    fn test_registry_pattern() {
        assert!(ResourceClass::Repository.matches("my-app"));
        assert!(ResourceClass::Repository.matches("team/my-app"));
        assert!(ResourceClass::Repository.matches("a.b_c-d"));
        assert!(!ResourceClass::Repository.matches("MyApp"));
        assert!(!ResourceClass::Repository.matches("app-"));
        assert!(!ResourceClass::Repository.matches("/app"));
    }

    #[test]
    fn test_log_path_pattern() {
        assert!(ResourceClass::LogGroup.matches("/aws/ecs/my-app"));
        assert!(ResourceClass::LogGroup.matches("plain-name"));
        assert!(!ResourceClass::LogGroup.matches("has space"));
        assert!(!ResourceClass::LogGroup.matches(""));
    }

    #[test]
    fn test_max_lengths() {
        assert_eq!(ResourceClass::Repository.max_length(), 256);
        assert_eq!(ResourceClass::Cluster.max_length(), 255);
        assert_eq!(ResourceClass::Service.max_length(), 255);
        assert_eq!(ResourceClass::TaskFamily.max_length(), 255);
        assert_eq!(ResourceClass::LoadBalancer.max_length(), 32);
        assert_eq!(ResourceClass::TargetGroup.max_length(), 32);
        assert_eq!(ResourceClass::LogGroup.max_length(), 512);
        assert_eq!(ResourceClass::SecurityGroup.max_length(), 255);
    }

    #[test]
    fn test_reserved_prefix() {
        assert!(has_reserved_prefix("aws-thing"));
        assert!(has_reserved_prefix("AWS-THING"));
        assert!(has_reserved_prefix("ecs-cluster"));
        assert!(has_reserved_prefix("Amazonia"));
        assert!(!has_reserved_prefix("my-app"));
        // ログパスの先頭は '/' なので予約プレフィックスに一致しない
        assert!(!has_reserved_prefix("/aws/ecs/my-app"));
    }
}
