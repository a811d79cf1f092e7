//! # エラーレスポンス
//!
//! 全エンドポイント共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - ボディは常に `{ "success": false, "message": "..." }`
//! - `stack` は開発モードでのみ付与される（本番では常に省略）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエラーで統一された形式。クライアントは `success` と
/// HTTP ステータスコードだけで分岐でき、`message` の解析を必要としない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub success: bool,
   pub message: String,
   /// エラー発生箇所のトレース（開発モードのみ）
   #[serde(skip_serializing_if = "Option::is_none")]
   pub stack:   Option<String>,
}

impl ErrorResponse {
   /// エラーレスポンスを作成する（`success` は常に false）
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         success: false,
         message: message.into(),
         stack:   None,
      }
   }

   /// トレース情報を付与する（開発モード用）
   pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
      self.stack = Some(stack.into());
      self
   }
}
