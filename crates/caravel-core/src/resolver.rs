//! 設定リゾルバ
//!
//! ベース設定にステージオーバーライドをマージし、リソース名を導出して
//! 検証を実行する。
//!
//! 処理の流れ:
//! 1. オーバーライド検索
//! 2. マージ
//! 3. マージ結果の検証
//! 4. リソース名の生成
//! 5. 生成された名前の検証

use crate::error::{ConfigError, Result};
use crate::model::{AppConfig, ResolvedConfig, StageOverride};
use crate::validation::{self, DetailedReport, ValidationOutcome};
use caravel_naming::{
    ClaimedNames, CollisionStrategy, DEFAULT_MAX_ATTEMPTS, NameGenerator, NamingConvention,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 設定リゾルバ
///
/// 解決は入力の純粋関数であり、リゾルバ自身は共有可変状態を持たない。
/// 複数ステージを並行して解決しても安全。衝突回避セット
/// （[`ClaimedNames`]）を複数の解決で共有する場合、アクセスの直列化は
/// 呼び出し側の責任。
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base: AppConfig,
    overrides: HashMap<String, StageOverride>,
    default_convention: NamingConvention,
    strategy: CollisionStrategy,
    max_attempts: u32,
}

impl ConfigResolver {
    /// ベース設定からリゾルバを作成
    pub fn new(base: AppConfig) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
            default_convention: NamingConvention::default(),
            strategy: CollisionStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// ステージオーバーライドを登録
    pub fn with_override(mut self, stage: impl Into<String>, stage_override: StageOverride) -> Self {
        self.overrides.insert(stage.into(), stage_override);
        self
    }

    /// オーバーライドテーブルを一括登録
    pub fn with_overrides(mut self, overrides: HashMap<String, StageOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// デフォルトの命名規約を設定
    pub fn with_convention(mut self, convention: NamingConvention) -> Self {
        self.default_convention = convention;
        self
    }

    /// 衝突解決戦略を設定
    pub fn with_strategy(mut self, strategy: CollisionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// 衝突解決の最大試行回数を設定
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// ベース設定への参照
    pub fn base(&self) -> &AppConfig {
        &self.base
    }

    /// オーバーライドが登録されているステージの一覧
    pub fn stages(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    /// ステージの設定を解決する
    ///
    /// 解決ごとに新しい衝突回避セットを使用する。プロセス内の複数の
    /// 解決で衝突回避を共有する場合は [`Self::resolve_with_claimed`]
    /// を使用すること。
    pub fn resolve(&self, stage: &str) -> Result<ResolvedConfig> {
        let mut claimed = ClaimedNames::new();
        self.resolve_with_claimed(stage, &mut claimed)
    }

    /// 呼び出し側所有の衝突回避セットを使ってステージの設定を解決する
    ///
    /// 検証エラーがあれば全件をまとめて [`ConfigError::Invalid`] で
    /// 返す。未登録のステージはエラーにせず、警告を記録してベース設定
    /// をそのまま使用する。警告は解決を失敗させない。
    pub fn resolve_with_claimed(
        &self,
        stage: &str,
        claimed: &mut ClaimedNames,
    ) -> Result<ResolvedConfig> {
        let mut warnings = Vec::new();

        // 1. オーバーライド検索 + 2. マージ
        let (config, convention) = self.merge_stage(stage, &mut warnings);
        debug!(stage = %stage, "Merged stage configuration");

        // 3. マージ結果の検証
        let outcome = validation::validate(&config, None);
        warnings.extend(outcome.warnings);
        if !outcome.is_valid {
            return Err(ConfigError::Invalid {
                errors: outcome.errors,
            });
        }

        // 4. リソース名の生成
        let generator = NameGenerator::new(convention, self.strategy, self.max_attempts);
        let resource_names = generator.generate(&config.base_names(), stage, claimed)?;

        // 5. 生成された名前の検証
        let outcome = validation::validate_names(&resource_names);
        warnings.extend(outcome.warnings);
        if !outcome.is_valid {
            return Err(ConfigError::Invalid {
                errors: outcome.errors,
            });
        }

        for warning in &warnings {
            warn!(stage = %stage, warning = %warning, "Resolution warning");
        }
        info!(
            stage = %stage,
            service = %resource_names.service,
            cluster = %resource_names.cluster,
            "Configuration resolved"
        );

        Ok(ResolvedConfig {
            stage: stage.to_string(),
            app: config,
            resource_names,
            warnings,
        })
    }

    /// ステージ設定を検証のみ実行する（サマリーモード）
    ///
    /// 解決と異なりエラーでも失敗せず、全結果を報告として返す。
    /// 名前生成が失敗した場合はそのエラーも報告に畳み込まれる。
    pub fn validate_stage(&self, stage: &str) -> ValidationOutcome {
        let report = self.validate_stage_detailed(stage);
        ValidationOutcome {
            is_valid: report.is_valid,
            errors: report
                .errors
                .into_iter()
                .map(|issue| issue.message)
                .collect(),
            warnings: report.warnings,
        }
    }

    /// ステージ設定を検証のみ実行する（詳細モード、修正ヒント付き）
    pub fn validate_stage_detailed(&self, stage: &str) -> DetailedReport {
        let mut warnings = Vec::new();
        let (config, convention) = self.merge_stage(stage, &mut warnings);

        let (mut issues, config_warnings) = validation::collect_config_issues(&config);
        warnings.extend(config_warnings);

        // 設定が妥当なときだけ名前を生成して検査する
        if issues.is_empty() {
            let generator = NameGenerator::new(convention, self.strategy, self.max_attempts);
            let mut claimed = ClaimedNames::new();
            match generator.generate(&config.base_names(), stage, &mut claimed) {
                Ok(names) => {
                    let (name_issues, name_warnings) = validation::collect_name_issues(&names);
                    issues.extend(name_issues);
                    warnings.extend(name_warnings);
                }
                Err(error) => issues.push(validation::issue_from_naming_error(&error)),
            }
        }

        validation::report_from(issues, warnings)
    }

    fn merge_stage(&self, stage: &str, warnings: &mut Vec<String>) -> (AppConfig, NamingConvention) {
        let mut config = self.base.clone();
        match self.overrides.get(stage) {
            Some(stage_override) => {
                let convention = stage_override
                    .naming
                    .clone()
                    .unwrap_or_else(|| self.default_convention.clone());
                config.merge(stage_override.clone());
                (config, convention)
            }
            None => {
                warn!(
                    stage = %stage,
                    "No override registered for stage, falling back to base configuration"
                );
                warnings.push(format!(
                    "ステージ '{}' のオーバーライドが未登録のため、ベース設定をそのまま使用します",
                    stage
                ));
                (config, self.default_convention.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppOverride;

    fn base_config() -> AppConfig {
        let mut config = AppConfig::new("svc");
        config.build.commands = vec!["npm run build".to_string()];
        config
    }

    #[test]
    fn test_unknown_stage_falls_back_to_base() {
        let resolver = ConfigResolver::new(base_config());

        let resolved = resolver.resolve("gamma").unwrap();

        // ベース設定のまま、ステージ修飾だけが適用される
        assert_eq!(resolved.app.container_port, 3000);
        assert_eq!(resolved.resource_names.service, "svc-service-gamma");
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("gamma"));
    }

    #[test]
    fn test_override_is_applied() {
        let resolver = ConfigResolver::new(base_config()).with_override(
            "prod",
            StageOverride {
                app: Some(AppOverride {
                    container_port: Some(8080),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let resolved = resolver.resolve("prod").unwrap();

        assert_eq!(resolved.app.container_port, 8080);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_stage_convention_overrides_default() {
        let resolver = ConfigResolver::new(base_config()).with_override(
            "beta",
            StageOverride {
                naming: Some(NamingConvention {
                    use_stage_prefix: true,
                    use_stage_suffix: false,
                    separator: "-".to_string(),
                }),
                ..Default::default()
            },
        );

        let resolved = resolver.resolve("beta").unwrap();

        assert_eq!(resolved.resource_names.service, "beta-svc-service");
    }

    #[test]
    fn test_invalid_merged_config_aggregates_errors() {
        let resolver = ConfigResolver::new(base_config()).with_override(
            "bad",
            StageOverride {
                app: Some(AppOverride {
                    container_port: Some(0),
                    health_check_path: Some("status".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let error = resolver.resolve("bad").unwrap_err();
        match error {
            ConfigError::Invalid { errors } => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_shared_claimed_names_across_stages() {
        let resolver = ConfigResolver::new(base_config());
        let mut claimed = ClaimedNames::new();

        let beta = resolver.resolve_with_claimed("beta", &mut claimed).unwrap();
        let prod = resolver.resolve_with_claimed("prod", &mut claimed).unwrap();

        // ステージが異なれば名前も異なり、両方の分が確保される
        assert_ne!(beta.resource_names.service, prod.resource_names.service);
        assert_eq!(claimed.len(), 18);
    }

    #[test]
    fn test_validate_stage_reports_instead_of_failing() {
        let resolver = ConfigResolver::new(base_config()).with_override(
            "bad",
            StageOverride {
                app: Some(AppOverride {
                    container_port: Some(-1),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let outcome = resolver.validate_stage("bad");

        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].contains("-1"));
    }

    #[test]
    fn test_validate_stage_detailed_folds_naming_errors() {
        let resolver = ConfigResolver::new(base_config()).with_override(
            "long",
            StageOverride {
                app: Some(AppOverride {
                    load_balancer_name: Some("a".repeat(50)),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let report = resolver.validate_stage_detailed("long");

        assert!(!report.is_valid);
        assert_eq!(
            report.errors[0].kind,
            crate::validation::IssueKind::NameTooLong
        );
    }

    #[test]
    fn test_stages_lists_registered_overrides() {
        let resolver = ConfigResolver::new(base_config())
            .with_override("beta", StageOverride::default())
            .with_override("prod", StageOverride::default());

        let mut stages: Vec<_> = resolver.stages().collect();
        stages.sort_unstable();
        assert_eq!(stages, vec!["beta", "prod"]);
    }
}
