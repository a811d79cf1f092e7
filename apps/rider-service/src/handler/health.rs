//! # ヘルスチェックハンドラ
//!
//! Rider Service の稼働状態を確認するためのエンドポイント。
//! データベースには触れず、プロセスが生きていれば常に 200 を返す。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "OK",
//!   "service": "Rider Service",
//!   "timestamp": "2025-08-01T09:00:00+00:00",
//!   "version": "0.1.0"
//! }
//! ```

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
   /// 稼働状態（常に `"OK"`）
   pub status:    String,
   /// サービス名
   pub service:   String,
   /// 応答時点のサーバー時刻（RFC 3339）
   pub timestamp: String,
   /// アプリケーションバージョン（Cargo.toml から取得）
   pub version:   String,
}

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse {
      status:    "OK".to_string(),
      service:   "Rider Service".to_string(),
      timestamp: Utc::now().to_rfc3339(),
      version:   env!("CARGO_PKG_VERSION").to_string(),
   })
}
