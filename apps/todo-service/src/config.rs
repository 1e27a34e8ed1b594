//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。
//!
//! | 変数 | 必須 | デフォルト |
//! |------|------|-----------|
//! | `DATABASE_URL` | ○ | - |
//! | `TODOLIST_HOST` | | `0.0.0.0` |
//! | `TODOLIST_PORT` | | `8080` |

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("TODOLIST_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl TodoServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("TODOLIST_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("TODOLIST_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            database_url,
        })
    }
}
