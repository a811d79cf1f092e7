//! # リポジトリ
//!
//! ライダーの永続化操作を定義するトレイトと、その PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod rider_repository;

pub use rider_repository::{PostgresRiderRepository, RiderRepository};
