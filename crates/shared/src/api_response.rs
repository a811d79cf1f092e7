//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式を提供する。
//!
//! すべての成功レスポンスは `success: true` を含み、操作ごとに形が決まる:
//!
//! - 単一リソース: `{ "success": true, "data": T }`
//! - 一覧: `{ "success": true, "count": N, "data": [T] }`
//! - 削除: `{ "success": true, "message": "...", "data": T }`

use serde::{Deserialize, Serialize};

/// 単一リソースの統一レスポンス型
///
/// 取得・作成・更新エンドポイントが `{ "success": true, "data": T }`
/// 形式でレスポンスを返すために使用する。
///
/// ## 使用例
///
/// ```
/// use rider_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert!(response.success);
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 一覧レスポンス型
///
/// `count` は `data` の要素数。クライアントがページングなしで
/// 件数を知るために含める。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// 新しい `ListResponse` を作成する（`count` は自動計算）
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// 削除レスポンス型
///
/// 削除されたリソースのスナップショットを `data` として返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DeleteResponse<T> {
    /// 新しい `DeleteResponse` を作成する
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
