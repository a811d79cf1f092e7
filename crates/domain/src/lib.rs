//! # Rider Service ドメイン層
//!
//! ライダー（配車サービスの乗客）を表すドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`rider::Rider`]）
//! - **値オブジェクト**: 生成時にバリデーションを実行し、不正な値の存在を
//!   型レベルで排除する（[`rider::Email`], [`rider::PhoneNumber`] など）
//! - **ドメインエラー**: バリデーション違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`rider`] - ライダーエンティティと値オブジェクト
//! - [`clock`] - テスト可能な時刻プロバイダ

pub mod clock;
pub mod error;
pub mod rider;

pub use error::DomainError;
