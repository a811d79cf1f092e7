//! # ライダー
//!
//! ライダーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 制約 |
//! |---|------------|------|
//! | [`Rider`] | ライダー（登録済みの乗客） | email / phone はサービス全体で一意 |
//! | [`RiderName`] | 表示名 | 必須、前後空白除去、最大 100 文字 |
//! | [`Email`] | メールアドレス | 必須、小文字に正規化、`local@domain` 形式 |
//! | [`PhoneNumber`] | 電話番号 | 必須、数字ちょうど 10 桁 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: RiderId は UUID をラップし、型安全性を確保
//! - **正規化は生成時に一度だけ**: Email の小文字化・trim は `new()` で行い、
//!   以降は正規化済みの値だけが存在する
//! - **不変性**: エンティティの変更は `with_*` メソッドで新インスタンスを返す
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rider_domain::rider::{Email, PhoneNumber, Rider, RiderId, RiderName};
//!
//! let rider = Rider::new(
//!     RiderId::new(),
//!     RiderName::new("Ana Lee")?,
//!     Email::new("Ana@Example.com")?,
//!     PhoneNumber::new("5551234567")?,
//!     chrono::Utc::now(),
//! );
//!
//! // Email は小文字に正規化される
//! assert_eq!(rider.email().as_str(), "ana@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// ライダー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
/// Newtype パターンで型安全性を確保。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct RiderId(Uuid);

impl RiderId {
    /// 新しいライダー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からライダー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RiderId {
    fn default() -> Self {
        Self::new()
    }
}

/// ライダー表示名（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderName(String);

impl RiderName {
    /// 表示名を作成する
    ///
    /// # バリデーション
    ///
    /// - 前後の空白を除去した上で空文字列ではない
    /// - 最大 100 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }

        if value.chars().count() > 100 {
            return Err(DomainError::Validation(
                "Name cannot exceed 100 characters".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RiderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時に trim と小文字化を行い、正規化済みの値のみを保持する。
/// 一意性の比較は常にこの正規化後の値で行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式（両側とも非空、空白を含まない）
    /// - ドメイン部に `.` を含む
    /// - 最大 255 文字
    ///
    /// # 正規化
    ///
    /// 前後の空白を除去し、全体を小文字に変換する。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::Validation("Email is required".to_string()));
        }

        let invalid = || DomainError::Validation("Please provide a valid email".to_string());

        let Some((local, domain)) = value.split_once('@') else {
            return Err(invalid());
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(invalid());
        }

        if value.contains(char::is_whitespace) || value.len() > 255 {
            return Err(invalid());
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 電話番号（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// 電話番号を作成する
    ///
    /// # バリデーション
    ///
    /// - 前後の空白を除去した上で空文字列ではない
    /// - ASCII 数字ちょうど 10 桁
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }

        if value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "Phone number must be 10 digits".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ライダーエンティティ
///
/// 配車サービスに登録された乗客を表現する。
///
/// # 不変条件
///
/// - `email` はサービス全体で一意（正規化後の値で比較）
/// - `phone` はサービス全体で一意
/// - `id` は作成後に変更されない
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    id: RiderId,
    name: RiderName,
    email: Email,
    phone: PhoneNumber,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Rider {
    /// 新しいライダーを作成する
    ///
    /// # 引数
    ///
    /// - `id`: ライダー ID
    /// - `name`: 表示名
    /// - `email`: メールアドレス（正規化済み）
    /// - `phone`: 電話番号
    /// - `now`: 現在日時（呼び出し元から注入）
    ///
    /// # 不変条件
    ///
    /// 作成時は `created_at == updated_at`。
    pub fn new(
        id: RiderId,
        name: RiderName,
        email: Email,
        phone: PhoneNumber,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータからライダーを復元する（データベースから取得時）
    pub fn from_db(
        id: RiderId,
        name: RiderName,
        email: Email,
        phone: PhoneNumber,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &RiderId {
        &self.id
    }

    pub fn name(&self) -> &RiderName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 更新メソッド（部分更新で指定されたフィールドのみ差し替える）

    /// 表示名を変更した新しいインスタンスを返す
    pub fn with_name(self, name: RiderName, now: DateTime<Utc>) -> Self {
        Self {
            name,
            updated_at: now,
            ..self
        }
    }

    /// メールアドレスを変更した新しいインスタンスを返す
    pub fn with_email(self, email: Email, now: DateTime<Utc>) -> Self {
        Self {
            email,
            updated_at: now,
            ..self
        }
    }

    /// 電話番号を変更した新しいインスタンスを返す
    pub fn with_phone(self, phone: PhoneNumber, now: DateTime<Utc>) -> Self {
        Self {
            phone,
            updated_at: now,
            ..self
        }
    }
}
