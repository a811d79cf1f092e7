//! # ユースケース層
//!
//! ハンドラから呼び出されるアプリケーションロジックを提供する。
//! リポジトリトレイトと [`Clock`](rider_domain::clock::Clock) を注入して
//! 動作するため、インメモリモックでテストできる。

pub mod rider;

pub use rider::{CreateRiderInput, RiderUseCaseImpl, UpdateRiderInput};
