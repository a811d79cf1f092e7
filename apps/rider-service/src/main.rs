//! # Rider Service サーバー
//!
//! 配車プラットフォームのライダー（乗客）管理サービス。
//!
//! ## 役割
//!
//! - **ライダー CRUD**: 登録・取得・部分更新・削除の公開 API
//! - **一意性の保証**: email / phone のサービス全体での一意性
//! - **データ永続化**: PostgreSQL へのレコード保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `DATABASE_URL` | No | PostgreSQL 接続 URL |
//! | `APP_ENV` | No | `development` でエラーレスポンスに stack を含める |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! APP_ENV=development cargo run -p rider-service
//!
//! # 本番環境
//! PORT=3001 DATABASE_URL=postgres://... cargo run -p rider-service --release
//! ```
//!
//! ## 起動シーケンス
//!
//! データベース接続とマイグレーションが完了するまでリスナーをバインド
//! しない。接続に失敗した場合はプロセスを即終了する。

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use config::RiderConfig;
use handler::{
   RiderState,
   create_rider,
   delete_rider,
   get_rider,
   health_check,
   list_riders,
   route_not_found,
   update_rider,
};
use rider_domain::clock::SystemClock;
use rider_infra::{db, repository::PostgresRiderRepository};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usecase::RiderUseCaseImpl;

/// Rider Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,rider_service=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = RiderConfig::from_env();

   tracing::info!(
      "Rider Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database_url)
      .await
      .expect("データベース接続に失敗しました");
   tracing::info!("データベースに接続しました");

   // マイグレーション適用
   db::run_migrations(&pool)
      .await
      .expect("マイグレーションの適用に失敗しました");

   // 依存コンポーネントを初期化
   let rider_repository = Arc::new(PostgresRiderRepository::new(pool));
   let usecase = RiderUseCaseImpl::new(rider_repository, Arc::new(SystemClock));
   let rider_state = Arc::new(RiderState { usecase });

   // ルーター構築
   let app = Router::new()
      .route("/health", get(health_check))
      .route("/v1/riders", get(list_riders).post(create_rider))
      .route(
         "/v1/riders/{id}",
         get(get_rider).put(update_rider).delete(delete_rider),
      )
      .with_state(rider_state)
      .fallback(route_not_found)
      .layer(TraceLayer::new_for_http());

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Rider Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
