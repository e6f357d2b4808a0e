//! 設定検証
//!
//! マージ済み設定と生成されたリソース名を検証する。違反はすべて
//! 収集してから返す（最初のエラーで打ち切らない）。エラーは解決を
//! 失敗させるが、警告は失敗させない。

use crate::model::AppConfig;
use caravel_naming::{NamingError, ResourceNames, has_reserved_prefix, matches_generic};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Component;

/// 検証エラーの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// 必須フィールドが未設定
    MissingRequiredField,
    /// ポート番号が範囲外
    InvalidPort,
    /// パスの形式が不正
    InvalidPath,
    /// AWS命名規則違反
    AwsNamingViolation,
    /// 名前が最大長を超過
    NameTooLong,
    /// ビルド引数の値が不正
    InvalidBuildArg,
    /// 名前が既に使用されている
    NamingConflict,
    /// 衝突解決の試行回数を使い切った
    UnresolvableCollision,
    /// 生成された名前一式が不正
    InvalidGeneratedName,
}

/// 型付き検証エラー（詳細モード）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// エラー種別
    pub kind: IssueKind,
    /// 対象フィールド
    pub field: String,
    /// エラーメッセージ
    pub message: String,
    /// 実際の値
    pub value: Option<String>,
    /// 修正のヒント
    pub suggestion: Option<String>,
}

/// フラットな検証結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// 詳細な検証結果（修正ヒント付き）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
    /// 1行サマリー
    pub summary: String,
}

/// 設定（と生成済みの名前があればそれも）を検証してフラットな
/// 結果を返す
pub fn validate(config: &AppConfig, names: Option<&ResourceNames>) -> ValidationOutcome {
    let (issues, warnings) = collect_all(config, names);
    ValidationOutcome {
        is_valid: issues.is_empty(),
        errors: issues.into_iter().map(|issue| issue.message).collect(),
        warnings,
    }
}

/// 設定を検証して型付きの詳細結果を返す
pub fn validate_detailed(config: &AppConfig, names: Option<&ResourceNames>) -> DetailedReport {
    let (issues, warnings) = collect_all(config, names);
    report_from(issues, warnings)
}

/// 生成されたリソース名のみを検証する
pub fn validate_names(names: &ResourceNames) -> ValidationOutcome {
    let (issues, warnings) = collect_name_issues(names);
    ValidationOutcome {
        is_valid: issues.is_empty(),
        errors: issues.into_iter().map(|issue| issue.message).collect(),
        warnings,
    }
}

/// 名前生成のエラーを型付きエラーに変換する（報告専用モード用）
pub fn issue_from_naming_error(error: &NamingError) -> ValidationIssue {
    match error {
        NamingError::NameTooLong { class, name, limit } => ValidationIssue {
            kind: IssueKind::NameTooLong,
            field: class.as_str().to_string(),
            message: format!(
                "名前 '{}' が {} の最大長 {} を超えています",
                name, class, limit
            ),
            value: Some(name.clone()),
            suggestion: Some("ベース識別子を短くしてください".to_string()),
        },
        NamingError::NamingConflict(name) => ValidationIssue {
            kind: IssueKind::NamingConflict,
            field: "resource_names".to_string(),
            message: format!("名前 '{}' は既に使用されています", name),
            value: Some(name.clone()),
            suggestion: Some(
                "衝突解決戦略を numeric-suffix または hash-suffix に変更してください".to_string(),
            ),
        },
        NamingError::UnresolvableCollision {
            candidate,
            attempts,
        } => ValidationIssue {
            kind: IssueKind::UnresolvableCollision,
            field: "resource_names".to_string(),
            message: format!(
                "'{}' の一意な名前が {} 回の試行で見つかりませんでした",
                candidate, attempts
            ),
            value: Some(candidate.clone()),
            suggestion: Some("最大試行回数を増やすかベース識別子を変更してください".to_string()),
        },
        NamingError::InvalidGeneratedName(detail) => ValidationIssue {
            kind: IssueKind::InvalidGeneratedName,
            field: "resource_names".to_string(),
            message: format!("生成された名前一式が不正です: {}", detail),
            value: None,
            suggestion: Some("ベース識別子と命名規約を見直してください".to_string()),
        },
    }
}

pub(crate) fn report_from(issues: Vec<ValidationIssue>, warnings: Vec<String>) -> DetailedReport {
    let summary = if issues.is_empty() {
        format!("検証OK（警告{}件）", warnings.len())
    } else {
        format!("エラー{}件、警告{}件", issues.len(), warnings.len())
    };
    DetailedReport {
        is_valid: issues.is_empty(),
        errors: issues,
        warnings,
        summary,
    }
}

fn collect_all(
    config: &AppConfig,
    names: Option<&ResourceNames>,
) -> (Vec<ValidationIssue>, Vec<String>) {
    let (mut issues, mut warnings) = collect_config_issues(config);
    if let Some(names) = names {
        let (name_issues, name_warnings) = collect_name_issues(names);
        issues.extend(name_issues);
        warnings.extend(name_warnings);
    }
    (issues, warnings)
}

pub(crate) fn collect_config_issues(config: &AppConfig) -> (Vec<ValidationIssue>, Vec<String>) {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    // 必須フィールド
    let required: [(&str, &str); 6] = [
        ("name", config.name.as_str()),
        ("repository_name", config.repository_name.as_str()),
        ("service_name", config.service_name.as_str()),
        ("task_family", config.task_family.as_str()),
        ("load_balancer_name", config.load_balancer_name.as_str()),
        ("target_group_name", config.target_group_name.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            issues.push(ValidationIssue {
                kind: IssueKind::MissingRequiredField,
                field: field.to_string(),
                message: format!("必須フィールド '{}' が設定されていません", field),
                value: None,
                suggestion: Some(format!("'{}' に空でない値を設定してください", field)),
            });
        }
    }
    if config.source_dir.as_os_str().is_empty() {
        issues.push(ValidationIssue {
            kind: IssueKind::MissingRequiredField,
            field: "source_dir".to_string(),
            message: "必須フィールド 'source_dir' が設定されていません".to_string(),
            value: None,
            suggestion: Some("ソースディレクトリのパスを設定してください".to_string()),
        });
    }

    // ポート範囲
    if !(1..=65535).contains(&config.container_port) {
        issues.push(ValidationIssue {
            kind: IssueKind::InvalidPort,
            field: "container_port".to_string(),
            message: format!(
                "コンテナポート {} が範囲外です（1〜65535）",
                config.container_port
            ),
            value: Some(config.container_port.to_string()),
            suggestion: Some("1〜65535の範囲のポート番号を指定してください".to_string()),
        });
    }

    // ヘルスチェックパス
    if !config.health_check_path.starts_with('/') {
        issues.push(ValidationIssue {
            kind: IssueKind::InvalidPath,
            field: "health_check_path".to_string(),
            message: format!(
                "ヘルスチェックパス '{}' が '/' で始まっていません",
                config.health_check_path
            ),
            value: Some(config.health_check_path.clone()),
            suggestion: Some(format!(
                "'/{}' のように先頭に '/' を付けてください",
                config.health_check_path
            )),
        });
    }

    // ベース識別子のAWS命名規則（ステージ修飾前にチェックする）
    let base_named: [(&str, &str); 5] = [
        ("repository_name", config.repository_name.as_str()),
        ("service_name", config.service_name.as_str()),
        ("task_family", config.task_family.as_str()),
        ("load_balancer_name", config.load_balancer_name.as_str()),
        ("target_group_name", config.target_group_name.as_str()),
    ];
    for (field, value) in base_named {
        // 未設定は必須フィールド側で報告済み
        if !value.trim().is_empty() && !matches_generic(value) {
            issues.push(ValidationIssue {
                kind: IssueKind::AwsNamingViolation,
                field: field.to_string(),
                message: format!("'{}' の値 '{}' がAWS命名規則に違反しています", field, value),
                value: Some(value.to_string()),
                suggestion: Some(
                    "英数字で始まり英数字で終わる名前にしてください（区切りにはハイフンを使用）"
                        .to_string(),
                ),
            });
        }
    }

    // ビルド引数の値（キー順で報告を安定させる）
    let mut args: Vec<_> = config.build.docker_build_args.iter().collect();
    args.sort_by_key(|(key, _)| key.as_str());
    for (key, value) in args {
        if !value.is_string() {
            issues.push(ValidationIssue {
                kind: IssueKind::InvalidBuildArg,
                field: format!("build.docker_build_args.{}", key),
                message: format!(
                    "ビルド引数 '{}' の値が文字列ではありません: {}",
                    key, value
                ),
                value: Some(value.to_string()),
                suggestion: Some("ビルド引数の値は文字列で指定してください".to_string()),
            });
        }
    }

    // ビルドコマンド（警告）
    if config.build.commands.is_empty() {
        warnings.push(
            "ビルドコマンドが設定されていません（デプロイは可能ですが後続のビルドが失敗する可能性があります）"
                .to_string(),
        );
    }

    // Dockerfileパス（警告）
    if let Some(dockerfile) = &config.build.dockerfile {
        if dockerfile
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            warnings.push(format!(
                "Dockerfileパス '{}' に '..' が含まれています（パス逸脱の可能性）",
                dockerfile.display()
            ));
        }
    }

    (issues, warnings)
}

pub(crate) fn collect_name_issues(names: &ResourceNames) -> (Vec<ValidationIssue>, Vec<String>) {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for (class, name) in names.entries() {
        // 最大長
        if name.chars().count() > class.max_length() {
            issues.push(ValidationIssue {
                kind: IssueKind::NameTooLong,
                field: class.as_str().to_string(),
                message: format!(
                    "生成された名前 '{}' が {} の最大長 {} を超えています",
                    name,
                    class,
                    class.max_length()
                ),
                value: Some(name.to_string()),
                suggestion: Some("ベース識別子を短くしてください".to_string()),
            });
        }

        // 予約プレフィックス（警告）
        if has_reserved_prefix(name) {
            warnings.push(format!(
                "生成された名前 '{}' が予約プレフィックスで始まっています",
                name
            ));
        }
    }

    // 重複（警告: ログパス系の識別子では無害な場合がある）
    let mut seen: HashSet<&str> = HashSet::new();
    for (_, name) in names.entries() {
        if !seen.insert(name) {
            warnings.push(format!("リソース名 '{}' が重複しています", name));
        }
    }

    (issues, warnings)
}
