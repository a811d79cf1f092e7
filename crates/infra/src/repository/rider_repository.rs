//! # RiderRepository
//!
//! ライダー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性は DB が正**: email / phone の UNIQUE 制約違反は
//!   [`InfraError`] の `UniqueViolation` として呼び出し元に伝える。
//!   アプリ側の事前チェックとの間の競合ウィンドウはこの翻訳で閉じる。
//! - **一覧は作成日時の降順**: `created_at DESC` で返す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rider_domain::rider::{Email, PhoneNumber, Rider, RiderId, RiderName};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::InfraError;

/// ライダーリポジトリトレイト
///
/// ライダー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait RiderRepository: Send + Sync {
   /// 全ライダーを作成日時の降順で取得する
   async fn find_all(&self) -> Result<Vec<Rider>, InfraError>;

   /// ID でライダーを検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(rider))`: ライダーが見つかった場合
   /// - `Ok(None)`: ライダーが見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_id(&self, id: &RiderId) -> Result<Option<Rider>, InfraError>;

   /// メールアドレスでライダーを検索する（一意性チェック用）
   ///
   /// `exclude` を指定すると、その ID のレコードを検索対象から除外する。
   /// 更新時に自分自身との衝突を誤検知しないために使用する。
   async fn find_by_email(
      &self,
      email: &Email,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError>;

   /// 電話番号でライダーを検索する（一意性チェック用）
   async fn find_by_phone(
      &self,
      phone: &PhoneNumber,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError>;

   /// ライダーを挿入する
   ///
   /// UNIQUE 制約違反は `InfraErrorKind::UniqueViolation` として返る。
   async fn insert(&self, rider: &Rider) -> Result<(), InfraError>;

   /// ライダーを更新する
   ///
   /// # 戻り値
   ///
   /// 対象行が存在しなかった場合（取得と更新の間に削除された場合）は
   /// `Ok(false)` を返す。UNIQUE 制約違反は `UniqueViolation` として返る。
   async fn update(&self, rider: &Rider) -> Result<bool, InfraError>;

   /// ライダーを削除する
   ///
   /// 対象行が存在しなかった場合は `Ok(false)` を返す。
   async fn delete(&self, id: &RiderId) -> Result<bool, InfraError>;

   /// 全ライダーを削除する（シードローダー用）
   ///
   /// 削除した行数を返す。
   async fn delete_all(&self) -> Result<u64, InfraError>;
}

/// riders テーブルの行
#[derive(Debug, FromRow)]
struct RiderRow {
   id:         Uuid,
   name:       String,
   email:      String,
   phone:      String,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl RiderRow {
   /// 行をドメインオブジェクトに復元する
   ///
   /// DB の値は挿入時にバリデーション済みのため、ここでの失敗は
   /// データ破損を意味し `Unexpected` として扱う。
   fn into_domain(self) -> Result<Rider, InfraError> {
      Ok(Rider::from_db(
         RiderId::from_uuid(self.id),
         RiderName::new(self.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
         Email::new(self.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
         PhoneNumber::new(self.phone).map_err(|e| InfraError::unexpected(e.to_string()))?,
         self.created_at,
         self.updated_at,
      ))
   }
}

/// UNIQUE 制約違反を専用エラーに翻訳する
///
/// 制約名はマイグレーションで明示的に宣言したものと一致させる。
fn translate_constraint_violation(e: sqlx::Error) -> InfraError {
   if let sqlx::Error::Database(ref db_err) = e {
      match db_err.constraint() {
         Some("riders_email_key") => return InfraError::unique_violation("email"),
         Some("riders_phone_key") => return InfraError::unique_violation("phone"),
         _ => {}
      }
   }
   InfraError::from(e)
}

const SELECT_RIDER: &str = "SELECT id, name, email, phone, created_at, updated_at FROM riders";

/// PostgreSQL 実装の RiderRepository
#[derive(Debug, Clone)]
pub struct PostgresRiderRepository {
   pool: PgPool,
}

impl PostgresRiderRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl RiderRepository for PostgresRiderRepository {
   async fn find_all(&self) -> Result<Vec<Rider>, InfraError> {
      let rows: Vec<RiderRow> =
         sqlx::query_as(&format!("{SELECT_RIDER} ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

      rows.into_iter().map(RiderRow::into_domain).collect()
   }

   async fn find_by_id(&self, id: &RiderId) -> Result<Option<Rider>, InfraError> {
      let row: Option<RiderRow> = sqlx::query_as(&format!("{SELECT_RIDER} WHERE id = $1"))
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      row.map(RiderRow::into_domain).transpose()
   }

   async fn find_by_email(
      &self,
      email: &Email,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError> {
      let row: Option<RiderRow> = sqlx::query_as(&format!(
         "{SELECT_RIDER} WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)"
      ))
      .bind(email.as_str())
      .bind(exclude.map(|id| *id.as_uuid()))
      .fetch_optional(&self.pool)
      .await?;

      row.map(RiderRow::into_domain).transpose()
   }

   async fn find_by_phone(
      &self,
      phone: &PhoneNumber,
      exclude: Option<&RiderId>,
   ) -> Result<Option<Rider>, InfraError> {
      let row: Option<RiderRow> = sqlx::query_as(&format!(
         "{SELECT_RIDER} WHERE phone = $1 AND ($2::uuid IS NULL OR id <> $2)"
      ))
      .bind(phone.as_str())
      .bind(exclude.map(|id| *id.as_uuid()))
      .fetch_optional(&self.pool)
      .await?;

      row.map(RiderRow::into_domain).transpose()
   }

   async fn insert(&self, rider: &Rider) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO riders (id, name, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
      )
      .bind(rider.id().as_uuid())
      .bind(rider.name().as_str())
      .bind(rider.email().as_str())
      .bind(rider.phone().as_str())
      .bind(rider.created_at())
      .bind(rider.updated_at())
      .execute(&self.pool)
      .await
      .map_err(translate_constraint_violation)?;

      Ok(())
   }

   async fn update(&self, rider: &Rider) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
            UPDATE riders
            SET name = $2, email = $3, phone = $4, updated_at = $5
            WHERE id = $1
            "#,
      )
      .bind(rider.id().as_uuid())
      .bind(rider.name().as_str())
      .bind(rider.email().as_str())
      .bind(rider.phone().as_str())
      .bind(rider.updated_at())
      .execute(&self.pool)
      .await
      .map_err(translate_constraint_violation)?;

      Ok(result.rows_affected() > 0)
   }

   async fn delete(&self, id: &RiderId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM riders WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }

   async fn delete_all(&self) -> Result<u64, InfraError> {
      let result = sqlx::query("DELETE FROM riders").execute(&self.pool).await?;

      Ok(result.rows_affected())
   }
}
