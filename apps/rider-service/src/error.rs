//! # Rider Service エラー定義
//!
//! サービスで発生するエラーと、HTTP レスポンスへの変換（エラーディスパッチ）を
//! 定義する。ハンドラから返されたすべてのエラーはここで一律に
//! `{ "success": false, "message": "..." }` 形式の JSON に変換される。
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | 種別 | ステータス | 既定メッセージ |
//! |------|-----------|---------------|
//! | `BadRequest` | 400 | "Bad Request" |
//! | `NotFound` | 404 | "Resource not found" |
//! | `Conflict` | 409 | "Resource conflict" |
//! | `Database`（一意制約違反） | 409 | "`<field>` already exists" |
//! | `Database`（その他）/ `Internal` | 500 | "Internal Server Error" |
//!
//! ## 開発モード
//!
//! `APP_ENV=development` のときのみ、レスポンスに `stack`
//! （エラー生成時にキャプチャした [`SpanTrace`]）を含める。
//! それ以外の環境では決して含めない。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use rider_domain::DomainError;
use rider_infra::InfraError;
use rider_shared::ErrorResponse;
use thiserror::Error;
use tracing_error::SpanTrace;

/// Rider Service で発生するエラー
///
/// エラー種別（[`ServiceErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// インフラ層の [`InfraError`] と同じ struct + enum パターン。
#[derive(derive_more::Display)]
#[display("{kind}")]
pub struct ServiceError {
   kind:       ServiceErrorKind,
   span_trace: SpanTrace,
}

/// サービスエラーの種別
#[derive(Debug, Error)]
pub enum ServiceErrorKind {
   /// 不正なリクエスト（バリデーション失敗、不正な ID 形式）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 競合（email / phone の重複）
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[source] InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl ServiceError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &ServiceErrorKind {
      &self.kind
   }

   // ===== Convenience constructors =====

   /// 400 Bad Request エラーを生成する
   pub fn bad_request(msg: impl Into<String>) -> Self {
      Self::from_kind(ServiceErrorKind::BadRequest(msg.into()))
   }

   /// 404 Not Found エラーを生成する
   pub fn not_found(msg: impl Into<String>) -> Self {
      Self::from_kind(ServiceErrorKind::NotFound(msg.into()))
   }

   /// 409 Conflict エラーを生成する
   pub fn conflict(msg: impl Into<String>) -> Self {
      Self::from_kind(ServiceErrorKind::Conflict(msg.into()))
   }

   /// 500 Internal エラーを生成する
   pub fn internal(msg: impl Into<String>) -> Self {
      Self::from_kind(ServiceErrorKind::Internal(msg.into()))
   }

   fn from_kind(kind: ServiceErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   /// HTTP ステータスとレスポンスボディに変換する
   ///
   /// `include_stack` が true の場合のみ `stack` フィールドを付与する。
   /// [`IntoResponse`] から呼ばれるほか、テストから直接検証できる。
   pub fn to_error_response(&self, include_stack: bool) -> (StatusCode, ErrorResponse) {
      let (status, message) = match &self.kind {
         ServiceErrorKind::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
         ServiceErrorKind::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
         ServiceErrorKind::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
         ServiceErrorKind::Database(e) => match e.as_unique_violation() {
            // 事前チェックをすり抜けた同時書き込みの競合。
            // 違反したユニークインデックスのフィールド名をそのまま返す。
            Some(field) => (StatusCode::CONFLICT, format!("{field} already exists")),
            None => {
               tracing::error!("データベースエラー: {}", e);
               (
                  StatusCode::INTERNAL_SERVER_ERROR,
                  "Internal Server Error".to_string(),
               )
            }
         },
         ServiceErrorKind::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               "Internal Server Error".to_string(),
            )
         }
      };

      let body = ErrorResponse::new(message);
      let body = if include_stack {
         body.with_stack(self.trace_string())
      } else {
         body
      };

      (status, body)
   }

   /// stack 用のトレース文字列を返す
   ///
   /// データベースエラーはインフラ層でキャプチャされたトレース
   /// （発生箇所により近い）を優先する。
   fn trace_string(&self) -> String {
      match &self.kind {
         ServiceErrorKind::Database(e) => format!("{}", e.span_trace()),
         _ => format!("{}", self.span_trace),
      }
   }
}

/// 開発モードで動作しているかを判定する
///
/// 元となる環境変数はリクエストごとに読む。プロセス起動後に変更される
/// ことは想定していないが、設定の持ち回しを避けるための簡便な判定。
fn is_development() -> bool {
   std::env::var("APP_ENV").is_ok_and(|v| v == "development")
}

impl IntoResponse for ServiceError {
   fn into_response(self) -> Response {
      let (status, body) = self.to_error_response(is_development());
      (status, Json(body)).into_response()
   }
}

// ===== トレイト実装 =====

impl std::fmt::Debug for ServiceError {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_struct("ServiceError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for ServiceError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

// ===== From 実装 =====

impl From<InfraError> for ServiceError {
   fn from(source: InfraError) -> Self {
      Self::from_kind(ServiceErrorKind::Database(source))
   }
}

impl From<DomainError> for ServiceError {
   fn from(source: DomainError) -> Self {
      // バリデーションメッセージはそのまま 400 のレスポンスに載せる
      Self::bad_request(source.to_string())
   }
}
