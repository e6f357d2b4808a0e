use caravel_naming::NamingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "設定の検証に失敗しました（{}件のエラー）:\n{}",
        .errors.len(),
        .errors.join("\n")
    )]
    Invalid { errors: Vec<String> },

    #[error("リソース名の生成に失敗しました: {0}")]
    Naming(#[from] NamingError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
