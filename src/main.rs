// region:    --- Imports
use crate::database::DatabaseManager;
use crate::sweeper::AuctionSweeper;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auth;
mod bidding;
mod database;
mod error;
mod handlers;
mod query;
mod sweeper;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 수명주기 스위퍼 시작. 목록 조회 직전의 인라인 정산과 같은 전환 로직을 공유한다.
    let sweep_interval_secs = std::env::var("SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1);
    let auction_sweeper = AuctionSweeper::new(db_manager.get_pool());
    auction_sweeper
        .start(Duration::from_secs(sweep_interval_secs))
        .await;

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route(
            "/auctions",
            post(handlers::handle_create_auction).get(handlers::handle_list_auctions),
        )
        .route("/auctions/:id", get(handlers::handle_get_auction))
        .route(
            "/auctions/:id/bids",
            post(handlers::handle_place_bid).get(handlers::handle_get_bid_history),
        )
        .layer(cors)
        .with_state(db_manager);

    // 리스너 생성
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
