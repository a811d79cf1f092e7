//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! rider-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! Postgres 実装と同じく email / phone の一意制約を挿入・更新時に強制する。
//! これにより、事前チェックをすり抜けた競合（`UniqueViolation`）の経路も
//! テストで再現できる。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rider_domain::rider::{Email, PhoneNumber, Rider, RiderId};

use crate::{error::InfraError, repository::RiderRepository};

/// インメモリ実装の RiderRepository
#[derive(Clone, Default)]
pub struct MockRiderRepository {
   riders: Arc<Mutex<Vec<Rider>>>,
}

impl MockRiderRepository {
   pub fn new() -> Self {
      Self {
         riders: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// 事前チェックを経由せずにライダーを登録する（テストデータ投入用）
   pub fn add_rider(&self, rider: Rider) {
      self.riders.lock().unwrap().push(rider);
   }

   /// 登録済みライダー数を返す
   pub fn len(&self) -> usize {
      self.riders.lock().unwrap().len()
   }

   pub fn is_empty(&self) -> bool {
      self.riders.lock().unwrap().is_empty()
   }
}

#[async_trait]
impl RiderRepository for MockRiderRepository {
   async fn find_all(&self) -> Result<Vec<Rider>, InfraError> {
      let mut riders = self.riders.lock().unwrap().clone();
      riders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
      Ok(riders)
   }

   async fn find_by_id(&self, id: &RiderId) -> Result<Option<Rider>, InfraError> {
      Ok(self
         .riders
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.id() == id)
         .cloned())
   }

   async fn find_by_email(
      &self,
      email: &Email,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError> {
      Ok(self
         .riders
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.email() == email && Some(r.id()) != exclude)
         .cloned())
   }

   async fn find_by_phone(
      &self,
      phone: &PhoneNumber,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError> {
      Ok(self
         .riders
         .lock()
         .unwrap()
         .iter()
         .find(|r| r.phone() == phone && Some(r.id()) != exclude)
         .cloned())
   }

   async fn insert(&self, rider: &Rider) -> Result<(), InfraError> {
      let mut riders = self.riders.lock().unwrap();
      // UNIQUE 制約のシミュレーション（email が先に検査されるのは
      // インデックスの定義順に合わせている）
      if riders.iter().any(|r| r.email() == rider.email()) {
         return Err(InfraError::unique_violation("email"));
      }
      if riders.iter().any(|r| r.phone() == rider.phone()) {
         return Err(InfraError::unique_violation("phone"));
      }
      riders.push(rider.clone());
      Ok(())
   }

   async fn update(&self, rider: &Rider) -> Result<bool, InfraError> {
      let mut riders = self.riders.lock().unwrap();
      if riders
         .iter()
         .any(|r| r.id() != rider.id() && r.email() == rider.email())
      {
         return Err(InfraError::unique_violation("email"));
      }
      if riders
         .iter()
         .any(|r| r.id() != rider.id() && r.phone() == rider.phone())
      {
         return Err(InfraError::unique_violation("phone"));
      }
      match riders.iter().position(|r| r.id() == rider.id()) {
         Some(pos) => {
            riders[pos] = rider.clone();
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: &RiderId) -> Result<bool, InfraError> {
      let mut riders = self.riders.lock().unwrap();
      match riders.iter().position(|r| r.id() == id) {
         Some(pos) => {
            riders.remove(pos);
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete_all(&self) -> Result<u64, InfraError> {
      let mut riders = self.riders.lock().unwrap();
      let count = riders.len() as u64;
      riders.clear();
      Ok(count)
   }
}
