//! # 未定義ルートハンドラ
//!
//! どのルートにも一致しなかったリクエストを受け、
//! エラーレスポンスと同じ形式の 404 JSON を返す。

use axum::{Json, http::StatusCode, http::Uri, response::IntoResponse};
use rider_shared::ErrorResponse;

/// 未定義ルートのフォールバックハンドラ
///
/// リクエストされたパスをメッセージに含めて 404 を返す。
pub async fn route_not_found(uri: Uri) -> impl IntoResponse {
   let body = ErrorResponse::new(format!("Route {} not found", uri.path()));
   (StatusCode::NOT_FOUND, Json(body))
}
