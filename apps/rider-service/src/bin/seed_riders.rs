//! # ライダーシードローダー
//!
//! CSV ファイルからライダーのテストデータを投入する。
//! 既存のライダーをすべて削除してから挿入する（冪等）。
//!
//! ## 使用方法
//!
//! ```bash
//! cargo run -p rider-service --bin seed_riders
//!
//! # CSV ファイルを指定する場合
//! SEED_FILE=path/to/riders.csv cargo run -p rider-service --bin seed_riders
//! ```
//!
//! ## CSV 形式
//!
//! 1 行目はヘッダー。列の順序は任意で、ヘッダー名で対応付ける。
//!
//! ```csv
//! name,email,phone
//! Ana Lee,ana.lee@example.com,5550100001
//! ```
//!
//! バリデーションに通らない行と一意制約に違反する行は警告を出して
//! スキップし、残りの行の投入を続行する。

use std::{fs, sync::Arc};

use rider_domain::rider::{Email, PhoneNumber, Rider, RiderId, RiderName};
use rider_infra::{
   db,
   repository::{PostgresRiderRepository, RiderRepository},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CSV の 1 レコード（ヘッダー名で対応付けた生の値）
#[derive(Debug, PartialEq, Eq)]
struct SeedRecord {
   name:  String,
   email: String,
   phone: String,
}

/// CSV 文字列をレコードに変換する
///
/// 1 行目をヘッダーとして扱い、`name` / `email` / `phone` 列を
/// 位置ではなく名前で対応付ける。値は前後の空白を除去する。
fn parse_csv(data: &str) -> anyhow::Result<Vec<SeedRecord>> {
   let mut lines = data.trim().lines();

   let header_line = lines
      .next()
      .ok_or_else(|| anyhow::anyhow!("CSV が空です"))?;
   let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

   let column = |name: &str| {
      headers
         .iter()
         .position(|h| *h == name)
         .ok_or_else(|| anyhow::anyhow!("CSV に {name} 列がありません"))
   };
   let name_idx = column("name")?;
   let email_idx = column("email")?;
   let phone_idx = column("phone")?;

   lines
      .map(|line| {
         let values: Vec<&str> = line.split(',').map(str::trim).collect();
         let field = |idx: usize| {
            values
               .get(idx)
               .map(|v| v.to_string())
               .ok_or_else(|| anyhow::anyhow!("列数が不足しています: {line}"))
         };
         Ok(SeedRecord {
            name:  field(name_idx)?,
            email: field(email_idx)?,
            phone: field(phone_idx)?,
         })
      })
      .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   dotenvy::dotenv().ok();

   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   let database_url = std::env::var("DATABASE_URL")
      .unwrap_or_else(|_| "postgres://localhost:5432/ridehailing_riders".to_string());
   let seed_file =
      std::env::var("SEED_FILE").unwrap_or_else(|_| "scripts/riders.csv".to_string());

   let pool = db::create_pool(&database_url).await?;
   db::run_migrations(&pool).await?;
   tracing::info!("データベースに接続しました");

   let repository = Arc::new(PostgresRiderRepository::new(pool));

   // 既存データをクリア
   let cleared = repository.delete_all().await?;
   tracing::info!("既存のライダーを削除しました: {} 件", cleared);

   let data = fs::read_to_string(&seed_file)?;
   let records = parse_csv(&data)?;

   let mut inserted = 0u64;
   let mut skipped = 0u64;

   for record in records {
      let rider = match build_rider(&record) {
         Ok(rider) => rider,
         Err(e) => {
            tracing::warn!("不正な行をスキップします ({}): {}", record.email, e);
            skipped += 1;
            continue;
         }
      };

      match repository.insert(&rider).await {
         Ok(()) => inserted += 1,
         Err(e) if e.as_unique_violation().is_some() => {
            tracing::warn!("重複する行をスキップします: {}", record.email);
            skipped += 1;
         }
         Err(e) => return Err(e.into()),
      }
   }

   tracing::info!(
      "シード投入が完了しました: {} 件投入, {} 件スキップ",
      inserted,
      skipped
   );

   Ok(())
}

/// レコードをバリデーション済みのライダーに変換する
fn build_rider(record: &SeedRecord) -> Result<Rider, rider_domain::DomainError> {
   Ok(Rider::new(
      RiderId::new(),
      RiderName::new(record.name.clone())?,
      Email::new(record.email.clone())?,
      PhoneNumber::new(record.phone.clone())?,
      chrono::Utc::now(),
   ))
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_csvはヘッダー名で列を対応付ける() {
      let data = "email,phone,name\nana@example.com,5551234567,Ana Lee\n";

      let records = parse_csv(data).unwrap();

      assert_eq!(records, vec![SeedRecord {
         name:  "Ana Lee".to_string(),
         email: "ana@example.com".to_string(),
         phone: "5551234567".to_string(),
      }]);
   }

   #[test]
   fn test_csvは値の前後の空白を除去する() {
      let data = "name,email,phone\n Ana Lee , ana@example.com , 5551234567 \n";

      let records = parse_csv(data).unwrap();

      assert_eq!(records[0].name, "Ana Lee");
      assert_eq!(records[0].phone, "5551234567");
   }

   #[test]
   fn test_必須列がないcsvはエラーになる() {
      let data = "name,email\nAna,ana@example.com\n";

      assert!(parse_csv(data).is_err());
   }

   #[test]
   fn test_空のcsvはエラーになる() {
      assert!(parse_csv("").is_err());
   }

   #[test]
   fn test_不正なレコードはライダーに変換できない() {
      let record = SeedRecord {
         name:  "Ana".to_string(),
         email: "ana@example.com".to_string(),
         phone: "555".to_string(),
      };

      assert!(build_rider(&record).is_err());
   }
}
