//! ステージオーバーライド定義

use super::app::{AppConfig, BuildSettings};
use caravel_naming::NamingConvention;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// ステージ別オーバーライド
///
/// ステージ識別子（例: "beta", "prod"）をキーとしてリゾルバに
/// 登録される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageOverride {
    /// アプリケーション設定の部分オーバーライド
    #[serde(default)]
    pub app: Option<AppOverride>,
    /// ビルド設定のオーバーライド
    #[serde(default)]
    pub build: Option<BuildOverride>,
    /// このステージの命名規約（未指定ならリゾルバのデフォルト）
    #[serde(default)]
    pub naming: Option<NamingConvention>,
}

/// アプリケーション設定の部分オーバーライド
///
/// Someのフィールドだけが対応するベースフィールドを丸ごと置き換える。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppOverride {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub container_port: Option<i32>,
    #[serde(default)]
    pub health_check_path: Option<String>,
    #[serde(default)]
    pub repository_name: Option<String>,
    #[serde(default)]
    pub cluster_suffix: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub task_family: Option<String>,
    #[serde(default)]
    pub load_balancer_name: Option<String>,
    #[serde(default)]
    pub target_group_name: Option<String>,
}

/// ビルド設定のオーバーライド
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOverride {
    /// ビルドコマンドのリスト（指定時は丸ごと置換）
    #[serde(default)]
    pub commands: Option<Vec<String>>,
    /// Dockerビルド引数（キー単位でマージ、オーバーライド側が優先）
    #[serde(default)]
    pub docker_build_args: HashMap<String, serde_json::Value>,
    /// Dockerfileのパス
    #[serde(default)]
    pub dockerfile: Option<PathBuf>,
}

impl AppConfig {
    /// ステージオーバーライドをマージする
    ///
    /// オーバーライドで定義されたフィールドが優先される。
    /// - アプリフィールド: Someなら丸ごと置換、Noneなら元の値を維持
    /// - ビルドコマンド: Someなら丸ごと置換
    /// - Dockerビルド引数: キー単位でマージ（オーバーライドが優先、
    ///   触れられていないベースのキーは残る）
    pub fn merge(&mut self, other: StageOverride) {
        if let Some(app) = other.app {
            if let Some(name) = app.name {
                self.name = name;
            }
            if let Some(display_name) = app.display_name {
                self.display_name = display_name;
            }
            if let Some(source_dir) = app.source_dir {
                self.source_dir = source_dir;
            }
            if let Some(container_port) = app.container_port {
                self.container_port = container_port;
            }
            if let Some(health_check_path) = app.health_check_path {
                self.health_check_path = health_check_path;
            }
            if let Some(repository_name) = app.repository_name {
                self.repository_name = repository_name;
            }
            if let Some(cluster_suffix) = app.cluster_suffix {
                self.cluster_suffix = cluster_suffix;
            }
            if let Some(service_name) = app.service_name {
                self.service_name = service_name;
            }
            if let Some(task_family) = app.task_family {
                self.task_family = task_family;
            }
            if let Some(load_balancer_name) = app.load_balancer_name {
                self.load_balancer_name = load_balancer_name;
            }
            if let Some(target_group_name) = app.target_group_name {
                self.target_group_name = target_group_name;
            }
        }

        if let Some(build) = other.build {
            self.build.merge(build);
        }
    }
}

impl BuildSettings {
    /// ビルドオーバーライドをマージする
    pub fn merge(&mut self, other: BuildOverride) {
        if let Some(commands) = other.commands {
            self.commands = commands;
        }
        if other.dockerfile.is_some() {
            self.dockerfile = other.dockerfile;
        }
        // HashMapフィールド: マージ（オーバーライドの値が優先）
        for (key, value) in other.docker_build_args {
            self.docker_build_args.insert(key, value);
        }
    }
}
