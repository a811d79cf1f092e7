//! ライダー管理ユースケース
//!
//! ## 一意性の扱い
//!
//! email / phone の重複は二段構えで検出する。
//!
//! 1. **事前チェック**: `find_by_email` / `find_by_phone` で照会し、
//!    ヒットすれば具体的なメッセージの 409 を返す（作成時は email が先）
//! 2. **DB 制約**: 事前チェックと書き込みの間に別リクエストが割り込んだ
//!    場合は UNIQUE 制約違反が `UniqueViolation` として返り、
//!    エラーディスパッチで 409 に変換される

use std::sync::Arc;

use rider_domain::{
   clock::Clock,
   rider::{Email, PhoneNumber, Rider, RiderId, RiderName},
};
use rider_infra::repository::RiderRepository;

use crate::error::ServiceError;

/// ライダー作成の入力
pub struct CreateRiderInput {
   pub name:  String,
   pub email: String,
   pub phone: String,
}

/// ライダー更新の入力
///
/// `None` のフィールドは変更しない（部分更新）。
pub struct UpdateRiderInput {
   pub rider_id: RiderId,
   pub name:     Option<String>,
   pub email:    Option<String>,
   pub phone:    Option<String>,
}

/// ライダー管理ユースケース
pub struct RiderUseCaseImpl {
   rider_repository: Arc<dyn RiderRepository>,
   clock:            Arc<dyn Clock>,
}

impl RiderUseCaseImpl {
   pub fn new(rider_repository: Arc<dyn RiderRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         rider_repository,
         clock,
      }
   }

   /// 全ライダーを作成日時の降順で取得する
   pub async fn list_riders(&self) -> Result<Vec<Rider>, ServiceError> {
      Ok(self.rider_repository.find_all().await?)
   }

   /// ライダーを 1 件取得する
   pub async fn get_rider(&self, rider_id: &RiderId) -> Result<Rider, ServiceError> {
      self
         .rider_repository
         .find_by_id(rider_id)
         .await?
         .ok_or_else(|| ServiceError::not_found("Rider not found"))
   }

   /// ライダーを新規作成する
   ///
   /// 1. 値オブジェクトへの変換でバリデーション（失敗は 400）
   /// 2. email の重複チェック（phone より先）
   /// 3. phone の重複チェック
   /// 4. DB に挿入（割り込みによる制約違反は 409 へ翻訳される）
   pub async fn create_rider(&self, input: CreateRiderInput) -> Result<Rider, ServiceError> {
      let name = RiderName::new(input.name)?;
      let email = Email::new(input.email)?;
      let phone = PhoneNumber::new(input.phone)?;

      if self
         .rider_repository
         .find_by_email(&email, None)
         .await?
         .is_some()
      {
         return Err(ServiceError::conflict("Email already registered"));
      }

      if self
         .rider_repository
         .find_by_phone(&phone, None)
         .await?
         .is_some()
      {
         return Err(ServiceError::conflict("Phone number already registered"));
      }

      let rider = Rider::new(RiderId::new(), name, email, phone, self.clock.now());

      self.rider_repository.insert(&rider).await?;

      Ok(rider)
   }

   /// ライダーを部分更新する
   ///
   /// 指定されたフィールドのみを検証・差し替えする。email / phone の
   /// 重複チェックは自分自身を除外して行うため、現在の値をそのまま
   /// 送り直しても成功する。
   pub async fn update_rider(&self, input: UpdateRiderInput) -> Result<Rider, ServiceError> {
      let rider = self
         .rider_repository
         .find_by_id(&input.rider_id)
         .await?
         .ok_or_else(|| ServiceError::not_found("Rider not found"))?;

      let now = self.clock.now();

      let rider = if let Some(name) = input.name {
         rider.with_name(RiderName::new(name)?, now)
      } else {
         rider
      };

      let rider = if let Some(email) = input.email {
         let email = Email::new(email)?;
         if self
            .rider_repository
            .find_by_email(&email, Some(&input.rider_id))
            .await?
            .is_some()
         {
            return Err(ServiceError::conflict(
               "Email already registered to another rider",
            ));
         }
         rider.with_email(email, now)
      } else {
         rider
      };

      let rider = if let Some(phone) = input.phone {
         let phone = PhoneNumber::new(phone)?;
         if self
            .rider_repository
            .find_by_phone(&phone, Some(&input.rider_id))
            .await?
            .is_some()
         {
            return Err(ServiceError::conflict(
               "Phone number already registered to another rider",
            ));
         }
         rider.with_phone(phone, now)
      } else {
         rider
      };

      // 取得後に別リクエストが削除した場合は 0 行更新になる
      if !self.rider_repository.update(&rider).await? {
         return Err(ServiceError::not_found("Rider not found"));
      }

      Ok(rider)
   }

   /// ライダーを削除し、削除したレコードのスナップショットを返す
   pub async fn delete_rider(&self, rider_id: &RiderId) -> Result<Rider, ServiceError> {
      let rider = self
         .rider_repository
         .find_by_id(rider_id)
         .await?
         .ok_or_else(|| ServiceError::not_found("Rider not found"))?;

      if !self.rider_repository.delete(rider_id).await? {
         return Err(ServiceError::not_found("Rider not found"));
      }

      Ok(rider)
   }
}

#[cfg(test)]
mod tests {
   use async_trait::async_trait;
   use axum::http::StatusCode;
   use chrono::{DateTime, Utc};
   use pretty_assertions::assert_eq;
   use rider_domain::clock::FixedClock;
   use rider_infra::{InfraError, mock::MockRiderRepository};
   use rstest::{fixture, rstest};

   use super::*;

   #[fixture]
   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   #[fixture]
   fn usecase(now: DateTime<Utc>) -> (RiderUseCaseImpl, Arc<MockRiderRepository>) {
      let repo = Arc::new(MockRiderRepository::new());
      let sut = RiderUseCaseImpl::new(repo.clone(), Arc::new(FixedClock::new(now)));
      (sut, repo)
   }

   fn create_input(name: &str, email: &str, phone: &str) -> CreateRiderInput {
      CreateRiderInput {
         name:  name.to_string(),
         email: email.to_string(),
         phone: phone.to_string(),
      }
   }

   #[rstest]
   #[tokio::test]
   async fn test_作成時はemailが小文字に正規化されて保存される(
      now: DateTime<Utc>,
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, repo) = usecase;

      let rider = sut
         .create_rider(create_input("Ana Lee", "Ana@Example.COM", "5551234567"))
         .await
         .unwrap();

      assert_eq!(rider.email().as_str(), "ana@example.com");
      assert_eq!(rider.created_at(), now);
      assert_eq!(rider.updated_at(), now);
      assert_eq!(repo.len(), 1);
   }

   #[rstest]
   #[tokio::test]
   async fn test_重複emailの作成は409で失敗する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      sut.create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let err = sut
         .create_rider(create_input("Bo", "ANA@EXAMPLE.COM", "5559999999"))
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(body.message, "Email already registered");
   }

   #[rstest]
   #[tokio::test]
   async fn test_emailとphoneが両方重複する場合はemailのエラーが優先される(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      sut.create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let err = sut
         .create_rider(create_input("Bo", "ana@example.com", "5551234567"))
         .await
         .unwrap_err();

      let (_, body) = err.to_error_response(false);
      assert_eq!(body.message, "Email already registered");
   }

   #[rstest]
   #[tokio::test]
   async fn test_重複phoneの作成は409で失敗する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      sut.create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let err = sut
         .create_rider(create_input("Bo", "bo@example.com", "5551234567"))
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(body.message, "Phone number already registered");
   }

   #[rstest]
   #[tokio::test]
   async fn test_不正なバリデーションは400で失敗する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, repo) = usecase;

      let err = sut
         .create_rider(create_input("Ana", "ana@example.com", "555-123"))
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body.message, "Phone number must be 10 digits");
      assert!(repo.is_empty());
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないライダーの取得は404(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;

      let err = sut.get_rider(&RiderId::new()).await.unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(body.message, "Rider not found");
   }

   #[rstest]
   #[tokio::test]
   async fn test_一覧は作成日時の降順で返る(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, repo) = usecase;
      repo.add_rider(Rider::new(
         RiderId::new(),
         RiderName::new("Old").unwrap(),
         Email::new("old@example.com").unwrap(),
         PhoneNumber::new("5550000001").unwrap(),
         DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
      ));
      repo.add_rider(Rider::new(
         RiderId::new(),
         RiderName::new("New").unwrap(),
         Email::new("new@example.com").unwrap(),
         PhoneNumber::new("5550000002").unwrap(),
         DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
      ));

      let riders = sut.list_riders().await.unwrap();

      assert_eq!(riders.len(), 2);
      assert_eq!(riders[0].email().as_str(), "new@example.com");
   }

   #[rstest]
   #[tokio::test]
   async fn test_部分更新はnameのみ変更しemailとphoneを保持する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      let created = sut
         .create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let updated = sut
         .update_rider(UpdateRiderInput {
            rider_id: *created.id(),
            name:     Some("Ana Lee".to_string()),
            email:    None,
            phone:    None,
         })
         .await
         .unwrap();

      assert_eq!(updated.name().as_str(), "Ana Lee");
      assert_eq!(updated.email(), created.email());
      assert_eq!(updated.phone(), created.phone());
      assert_eq!(updated.created_at(), created.created_at());
   }

   #[rstest]
   #[tokio::test]
   async fn test_自分の現在のemailへの更新は成功する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      let created = sut
         .create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let updated = sut
         .update_rider(UpdateRiderInput {
            rider_id: *created.id(),
            name:     None,
            email:    Some("ana@example.com".to_string()),
            phone:    None,
         })
         .await
         .unwrap();

      assert_eq!(updated.email().as_str(), "ana@example.com");
   }

   #[rstest]
   #[tokio::test]
   async fn test_他のライダーのemailへの更新は409で失敗する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      sut.create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();
      let bo = sut
         .create_rider(create_input("Bo", "bo@example.com", "5559999999"))
         .await
         .unwrap();

      let err = sut
         .update_rider(UpdateRiderInput {
            rider_id: *bo.id(),
            name:     None,
            email:    Some("ana@example.com".to_string()),
            phone:    None,
         })
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(body.message, "Email already registered to another rider");
   }

   #[rstest]
   #[tokio::test]
   async fn test_他のライダーのphoneへの更新は409で失敗する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;
      sut.create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();
      let bo = sut
         .create_rider(create_input("Bo", "bo@example.com", "5559999999"))
         .await
         .unwrap();

      let err = sut
         .update_rider(UpdateRiderInput {
            rider_id: *bo.id(),
            name:     None,
            email:    None,
            phone:    Some("5551234567".to_string()),
         })
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(body.message, "Phone number already registered to another rider");
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないライダーの更新は404(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;

      let err = sut
         .update_rider(UpdateRiderInput {
            rider_id: RiderId::new(),
            name:     Some("Ghost".to_string()),
            email:    None,
            phone:    None,
         })
         .await
         .unwrap_err();

      let (status, _) = err.to_error_response(false);
      assert_eq!(status, StatusCode::NOT_FOUND);
   }

   #[rstest]
   #[tokio::test]
   async fn test_削除は削除前のスナップショットを返す(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, repo) = usecase;
      let created = sut
         .create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap();

      let deleted = sut.delete_rider(created.id()).await.unwrap();

      assert_eq!(deleted, created);
      assert!(repo.is_empty());
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないライダーの削除は404(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, _) = usecase;

      let err = sut.delete_rider(&RiderId::new()).await.unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(body.message, "Rider not found");
   }

   // ===== 事前チェックすり抜け（競合ウィンドウ）のテスト =====

   /// 事前チェックでは空に見えるが、挿入時に制約違反を返すリポジトリ。
   /// 照会と書き込みの間に別リクエストが割り込んだ状況を再現する。
   struct RacingRiderRepository;

   #[async_trait]
   impl RiderRepository for RacingRiderRepository {
      async fn find_all(&self) -> Result<Vec<Rider>, InfraError> {
         Ok(Vec::new())
      }

      async fn find_by_id(&self, _id: &RiderId) -> Result<Option<Rider>, InfraError> {
         Ok(None)
      }

      async fn find_by_email(
         &self,
         _email: &Email,
         _exclude: Option<&RiderId>,
      ) -> Result<Option<Rider>, InfraError> {
         Ok(None)
      }

      async fn find_by_phone(
         &self,
         _phone: &PhoneNumber,
         _exclude: Option<&RiderId>,
      ) -> Result<Option<Rider>, InfraError> {
         Ok(None)
      }

      async fn insert(&self, _rider: &Rider) -> Result<(), InfraError> {
         Err(InfraError::unique_violation("email"))
      }

      async fn update(&self, _rider: &Rider) -> Result<bool, InfraError> {
         Err(InfraError::unique_violation("email"))
      }

      async fn delete(&self, _id: &RiderId) -> Result<bool, InfraError> {
         Ok(false)
      }

      async fn delete_all(&self) -> Result<u64, InfraError> {
         Ok(0)
      }
   }

   #[rstest]
   #[tokio::test]
   async fn test_事前チェックをすり抜けた制約違反は409になる(now: DateTime<Utc>) {
      let sut = RiderUseCaseImpl::new(
         Arc::new(RacingRiderRepository),
         Arc::new(FixedClock::new(now)),
      );

      let err = sut
         .create_rider(create_input("Ana", "ana@example.com", "5551234567"))
         .await
         .unwrap_err();

      let (status, body) = err.to_error_response(false);
      assert_eq!(status, StatusCode::CONFLICT);
      assert_eq!(body.message, "email already exists");
   }

   #[rstest]
   #[tokio::test]
   async fn test_同一emailの同時作成は片方だけ成功する(
      usecase: (RiderUseCaseImpl, Arc<MockRiderRepository>),
   ) {
      let (sut, repo) = usecase;

      let (a, b) = tokio::join!(
         sut.create_rider(create_input("Ana", "ana@example.com", "5551234567")),
         sut.create_rider(create_input("Ana2", "ana@example.com", "5559999999")),
      );

      // どちらが勝っても、成功はちょうど 1 件
      assert_eq!(
         [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
         1
      );
      assert_eq!(repo.len(), 1);
   }
}
