//! # ライダーハンドラ
//!
//! ライダー CRUD の公開 API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /v1/riders` - ライダー一覧（作成日時の降順）
//! - `GET /v1/riders/{id}` - ライダー詳細
//! - `POST /v1/riders` - ライダー作成
//! - `PUT /v1/riders/{id}` - ライダー部分更新
//! - `DELETE /v1/riders/{id}` - ライダー削除

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::IntoResponse,
};
use rider_domain::rider::{Rider, RiderId};
use rider_shared::{ApiResponse, DeleteResponse, ListResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
   error::ServiceError,
   usecase::{CreateRiderInput, RiderUseCaseImpl, UpdateRiderInput},
};

/// ライダー API の共有状態
pub struct RiderState {
   pub usecase: RiderUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ライダー DTO
#[derive(Debug, Serialize)]
pub struct RiderDto {
   pub id:    Uuid,
   pub name:  String,
   pub email: String,
   pub phone: String,
   #[serde(rename = "createdAt")]
   pub created_at: String,
   #[serde(rename = "updatedAt")]
   pub updated_at: String,
}

impl From<&Rider> for RiderDto {
   fn from(rider: &Rider) -> Self {
      Self {
         id:         *rider.id().as_uuid(),
         name:       rider.name().to_string(),
         email:      rider.email().to_string(),
         phone:      rider.phone().to_string(),
         created_at: rider.created_at().to_rfc3339(),
         updated_at: rider.updated_at().to_rfc3339(),
      }
   }
}

/// ライダー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateRiderRequest {
   pub name:  String,
   pub email: String,
   pub phone: String,
}

/// ライダー更新リクエスト（省略したフィールドは変更しない）
#[derive(Debug, Deserialize)]
pub struct UpdateRiderRequest {
   pub name:  Option<String>,
   pub email: Option<String>,
   pub phone: Option<String>,
}

/// パスパラメータの ID をパースする
///
/// UUID として不正な文字列は 400 で拒否する。
fn parse_rider_id(id: &str) -> Result<RiderId, ServiceError> {
   Uuid::parse_str(id)
      .map(RiderId::from_uuid)
      .map_err(|_| ServiceError::bad_request("Invalid ID format"))
}

// --- ハンドラ ---

/// GET /v1/riders
///
/// 全ライダーを作成日時の降順で取得する。
pub async fn list_riders(
   State(state): State<Arc<RiderState>>,
) -> Result<impl IntoResponse, ServiceError> {
   let riders = state.usecase.list_riders().await?;

   let items: Vec<RiderDto> = riders.iter().map(RiderDto::from).collect();

   Ok((StatusCode::OK, Json(ListResponse::new(items))))
}

/// GET /v1/riders/{id}
///
/// ## レスポンス
///
/// - `200 OK`: ライダー詳細
/// - `400 Bad Request`: 不正な ID 形式
/// - `404 Not Found`: ライダーが見つからない
pub async fn get_rider(
   State(state): State<Arc<RiderState>>,
   Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
   let rider_id = parse_rider_id(&id)?;

   let rider = state.usecase.get_rider(&rider_id).await?;

   Ok((StatusCode::OK, Json(ApiResponse::new(RiderDto::from(&rider)))))
}

/// POST /v1/riders
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたライダー
/// - `400 Bad Request`: バリデーション失敗
/// - `409 Conflict`: email / phone の重複
pub async fn create_rider(
   State(state): State<Arc<RiderState>>,
   Json(req): Json<CreateRiderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
   let input = CreateRiderInput {
      name:  req.name,
      email: req.email,
      phone: req.phone,
   };

   let rider = state.usecase.create_rider(input).await?;

   Ok((
      StatusCode::CREATED,
      Json(ApiResponse::new(RiderDto::from(&rider))),
   ))
}

/// PUT /v1/riders/{id}
///
/// 指定されたフィールドのみを更新する（部分更新）。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のライダー
/// - `400 Bad Request`: 不正な ID 形式、バリデーション失敗
/// - `404 Not Found`: ライダーが見つからない
/// - `409 Conflict`: 他のライダーと email / phone が重複
pub async fn update_rider(
   State(state): State<Arc<RiderState>>,
   Path(id): Path<String>,
   Json(req): Json<UpdateRiderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
   let input = UpdateRiderInput {
      rider_id: parse_rider_id(&id)?,
      name:     req.name,
      email:    req.email,
      phone:    req.phone,
   };

   let rider = state.usecase.update_rider(input).await?;

   Ok((StatusCode::OK, Json(ApiResponse::new(RiderDto::from(&rider)))))
}

/// DELETE /v1/riders/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 削除されたライダーのスナップショット
/// - `400 Bad Request`: 不正な ID 形式
/// - `404 Not Found`: ライダーが見つからない
pub async fn delete_rider(
   State(state): State<Arc<RiderState>>,
   Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
   let rider_id = parse_rider_id(&id)?;

   let rider = state.usecase.delete_rider(&rider_id).await?;

   Ok((
      StatusCode::OK,
      Json(DeleteResponse::new(
         "Rider deleted successfully",
         RiderDto::from(&rider),
      )),
   ))
}
