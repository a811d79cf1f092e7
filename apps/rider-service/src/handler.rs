//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod health;
pub mod not_found;
pub mod rider;

pub use health::health_check;
pub use not_found::route_not_found;
pub use rider::{RiderState, create_rider, delete_rider, get_rider, list_riders, update_rider};
