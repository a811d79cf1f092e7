//! # ドメイン層エラー定義
//!
//! バリデーション違反を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **メッセージをそのまま公開**: バリデーションメッセージは API
//!   レスポンスにそのまま載るため、プレフィックスを付けない
//!
//! ## HTTP ステータスへのマッピング
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 400 Bad Request |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成時に発生する例外状態を表現する。
/// API 層でこのエラーを受け取り、400 Bad Request に変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値が制約に違反している場合に使用する。
    /// メッセージはエラーレスポンスにそのまま表示される。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("{0}")]
    Validation(String),
}
