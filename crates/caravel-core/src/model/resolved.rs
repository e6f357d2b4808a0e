//! 解決済み設定

use super::app::AppConfig;
use caravel_naming::ResourceNames;
use serde::{Deserialize, Serialize};

/// ステージ解決済みの設定
///
/// 解決呼び出しごとに一度だけ構築され、以後は不変。スタック構築側は
/// ここのリソース名をそのまま使用し、独自に名前を導出してはならない
/// （命名の単一情報源）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// 解決したステージ識別子
    pub stage: String,
    /// マージ済みアプリケーション設定
    pub app: AppConfig,
    /// 導出されたリソース名一式
    pub resource_names: ResourceNames,
    /// 解決中に発生した警告
    pub warnings: Vec<String>,
}

impl ResolvedConfig {
    /// ログ・CLI表示用のサマリー行を生成
    pub fn summary(&self) -> String {
        format!(
            "{} @ {}: service={} cluster={} 警告{}件",
            self.app.name,
            self.stage,
            self.resource_names.service,
            self.resource_names.cluster,
            self.warnings.len()
        )
    }
}
