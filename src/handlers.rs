// region:    --- Imports
use crate::auth::VerifiedUser;
use crate::bidding::commands::{
    handle_create_auction as command_create_auction, handle_place_bid as command_place_bid,
    CreateAuctionCommand, PlaceBidCommand,
};
use crate::database::DatabaseManager;
use crate::error::AuctionError;
use crate::query;
use crate::query::handlers::ListingParams;
use crate::sweeper;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Command Handlers

/// 입찰 요청 바디. 입찰자 식별 정보는 바디가 아니라 검증된 헤더에서 온다.
#[derive(Debug, Deserialize)]
pub struct PlaceBidRequest {
    pub amount: i64,
}

/// 경매 등록 요청 처리
pub async fn handle_create_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    seller: VerifiedUser,
    Json(cmd): Json<CreateAuctionCommand>,
) -> Result<impl IntoResponse, AuctionError> {
    info!("{:<12} --> 경매 등록 요청: {:?}", "Command", cmd);
    let auction_id = command_create_auction(cmd, &seller, &db_manager).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "경매가 성공적으로 등록되었습니다.",
            "auction_id": auction_id
        })),
    ))
}

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    bidder: VerifiedUser,
    Path(auction_id): Path<i64>,
    Json(req): Json<PlaceBidRequest>,
) -> Result<impl IntoResponse, AuctionError> {
    info!(
        "{:<12} --> 입찰 요청: 경매 {} 금액 {}",
        "Command", auction_id, req.amount
    );
    let cmd = PlaceBidCommand {
        auction_id,
        bidder_id: bidder.user_id,
        bidder_name: bidder.display_name,
        amount: req.amount,
    };
    let accepted = command_place_bid(cmd, &db_manager).await?;
    Ok(Json(serde_json::json!({
        "message": "입찰이 성공적으로 처리되었습니다.",
        "current_highest_bid": accepted.current_highest_bid,
        "highest_bidder": accepted.highest_bidder,
        "bid_count": accepted.bid_count
    })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 경매 목록 조회
pub async fn handle_list_auctions(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<ListingParams>,
) -> Result<impl IntoResponse, AuctionError> {
    info!("{:<12} --> 경매 목록 조회", "HandlerQuery");
    // 만료되었지만 아직 정산 전인 경매가 ACTIVE로 노출되지 않도록 먼저 정산한다.
    sweeper::sweep_expired(db_manager.pool(), Utc::now()).await;
    let page = query::handlers::list_auctions(&db_manager, params).await?;
    Ok(Json(page))
}

/// 경매 단건 조회(전체 입찰 이력 포함)
pub async fn handle_get_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<impl IntoResponse, AuctionError> {
    info!("{:<12} --> 경매 단건 조회 id: {}", "HandlerQuery", auction_id);
    let detail = query::handlers::get_auction_detail(&db_manager, auction_id).await?;
    Ok(Json(detail))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<impl IntoResponse, AuctionError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "HandlerQuery", auction_id);
    let bids = query::handlers::get_bid_history(&db_manager, auction_id).await?;
    Ok(Json(bids))
}

// endregion: --- Query Handlers
