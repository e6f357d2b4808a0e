//! アプリケーション設定

use caravel_naming::BaseNames;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// アプリケーションのベース設定
///
/// ステージごとのオーバーライドはこの設定にマージされる。
/// 各リソース名のベース識別子もここで定義される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// アプリケーション識別名
    pub name: String,
    /// 表示名
    pub display_name: String,
    /// ソース・ビルドディレクトリ
    pub source_dir: PathBuf,
    /// コンテナポート（1〜65535）
    pub container_port: i32,
    /// ヘルスチェックパス（`/` 始まり）
    pub health_check_path: String,
    /// コンテナレジストリのベース名
    pub repository_name: String,
    /// クラスタ名のサフィックス（アプリ名に結合される）
    pub cluster_suffix: String,
    /// ECSサービスのベース名
    pub service_name: String,
    /// タスク定義ファミリーのベース名
    pub task_family: String,
    /// ロードバランサーのベース名
    pub load_balancer_name: String,
    /// ターゲットグループのベース名
    pub target_group_name: String,
    /// ビルド設定
    #[serde(default)]
    pub build: BuildSettings,
}

/// ビルド設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSettings {
    /// ビルドコマンドのリスト
    #[serde(default)]
    pub commands: Vec<String>,
    /// Dockerビルド引数（値は文字列であること）
    #[serde(default)]
    pub docker_build_args: HashMap<String, serde_json::Value>,
    /// Dockerfileのパス（プロジェクトルートからの相対パス）
    #[serde(default)]
    pub dockerfile: Option<PathBuf>,
}

impl AppConfig {
    /// 規約に沿ったデフォルト値でベース設定を作成
    ///
    /// リソース識別子は `{name}-service` / `{name}-alb` / `{name}-tg`
    /// の形式で導出される。
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            source_dir: PathBuf::from("."),
            container_port: 3000,
            health_check_path: "/".to_string(),
            repository_name: name.clone(),
            cluster_suffix: "cluster".to_string(),
            service_name: format!("{}-service", name),
            task_family: name.clone(),
            load_balancer_name: format!("{}-alb", name),
            target_group_name: format!("{}-tg", name),
            build: BuildSettings::default(),
            name,
        }
    }

    /// 名前生成に使用するベース識別子を取り出す
    pub fn base_names(&self) -> BaseNames {
        BaseNames {
            app_name: self.name.clone(),
            repository: self.repository_name.clone(),
            cluster_suffix: self.cluster_suffix.clone(),
            service: self.service_name.clone(),
            task_family: self.task_family.clone(),
            load_balancer: self.load_balancer_name.clone(),
            target_group: self.target_group_name.clone(),
        }
    }
}

impl BuildSettings {
    /// 文字列値のみのビルド引数マップを返す
    ///
    /// 文字列以外の値は検証で弾かれるため、ここでは含めない。
    pub fn string_args(&self) -> HashMap<String, String> {
        self.docker_build_args
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
            .collect()
    }
}
