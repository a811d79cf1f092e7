//! # Rider Service 共有ユーティリティ
//!
//! API レスポンスの統一エンベロープを提供する。
//!
//! ## 設計方針
//!
//! - 純粋なデータ構造（`Serialize` / `Deserialize`）のみを配置
//! - axum の `IntoResponse` 変換はサービス側の責務（このクレートに
//!   axum 依存を入れない）
//! - クライアントは `success` フィールドだけで成否を分岐できる

pub mod api_response;
pub mod error_response;

pub use api_response::{ApiResponse, DeleteResponse, ListResponse};
pub use error_response::ErrorResponse;
