//! ステージ設定の解決エンジン
//!
//! ベース設定とステージオーバーライドをマージし、クラウドリソース名を
//! 決定論的に導出して、プロビジョニング前に検証します。解決は純粋な
//! 同期計算であり、リモートインフラには一切触れません。

pub mod error;
pub mod model;
pub mod resolver;
pub mod validation;

// Re-exports
pub use caravel_naming::{
    BaseNames, ClaimedNames, CollisionStrategy, NameGenerator, NamingConvention, NamingError,
    ResourceClass, ResourceNames,
};
pub use error::{ConfigError, Result};
pub use model::{
    AppConfig, AppOverride, BuildOverride, BuildSettings, ResolvedConfig, StageOverride,
};
pub use resolver::ConfigResolver;
pub use validation::{
    DetailedReport, IssueKind, ValidationIssue, ValidationOutcome, validate, validate_detailed,
    validate_names,
};
