//! # Rider Service 設定
//!
//! 環境変数から Rider Service サーバーの設定を読み込む。
//! すべての項目にデフォルト値があり、ローカルではそのまま起動できる。

use std::env;

/// Rider Service サーバーの設定
#[derive(Debug, Clone)]
pub struct RiderConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl RiderConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | デフォルト |
    /// |--------|-----------|
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `3001` |
    /// | `DATABASE_URL` | `postgres://localhost:5432/ridehailing_riders` |
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/ridehailing_riders".to_string()),
        }
    }
}
