//! # 時刻プロバイダ
//!
//! ライダーの `created_at` / `updated_at` はすべてこの trait 経由で採時する。
//! `Utc::now()` を直接呼ばないことで、更新系のテストに固定時刻を注入し、
//! タイムスタンプの遷移（`updated_at >= created_at`）を決定的に検証できる。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::{DateTime, Duration};
//! use rider_domain::{
//!     clock::{Clock, FixedClock},
//!     rider::{Email, PhoneNumber, Rider, RiderId, RiderName},
//! };
//!
//! let clock = FixedClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
//! let rider = Rider::new(
//!     RiderId::new(),
//!     RiderName::new("Ana Lee")?,
//!     Email::new("ana@example.com")?,
//!     PhoneNumber::new("5551234567")?,
//!     clock.now(),
//! );
//!
//! // 5 分後に電話番号を変更
//! let later = clock.advanced(Duration::minutes(5));
//! let rider = rider.with_phone(PhoneNumber::new("5559876543")?, later.now());
//!
//! assert!(rider.updated_at() > rider.created_at());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Duration, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }

   /// 指定した時間だけ進めた新しい Clock を返す
   ///
   /// ライダーの作成から更新までの経過時間をテストで再現するために使う。
   pub fn advanced(&self, duration: Duration) -> Self {
      Self {
         now: self.now + duration,
      }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
