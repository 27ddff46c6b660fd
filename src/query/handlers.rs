// region:    --- Imports
use super::queries;
use crate::bidding::model::{
    Auction, AuctionDetail, AuctionSummary, Bid, STATUS_ACTIVE, STATUS_CANCELLED,
    STATUS_ENDED_NO_BIDS, STATUS_ENDED_SOLD,
};
use crate::database::DatabaseManager;
use crate::error::AuctionError;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Listing Types

// 페이지 크기 기본값과 상한
const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;
const DEFAULT_SORT: &str = "newest";

/// 목록 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    /// 상품명/설명 부분 일치 검색어
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub seller_id: Option<i64>,
    /// newest | price_low | price_high | ending_soon
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 실제로 적용된 필터. 클라이언트 확인용으로 응답에 포함된다.
#[derive(Debug, Serialize)]
pub struct AppliedFilters {
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub seller_id: Option<i64>,
    pub sort: String,
    pub limit: i64,
    pub offset: i64,
}

/// 목록 조회 응답 페이지
#[derive(Serialize)]
pub struct ListingPage {
    pub auctions: Vec<AuctionSummary>,
    pub total: i64,
    pub filters: AppliedFilters,
}

// endregion: --- Listing Types

// region:    --- Query Handlers

/// 경매 단건 조회
pub async fn get_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Auction, AuctionError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(auction)
            })
        })
        .await
}

/// 경매 단건 상세 조회(전체 입찰 이력 포함)
pub async fn get_auction_detail(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<AuctionDetail, AuctionError> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;
                let bid_history = sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(AuctionDetail {
                    auction,
                    bid_history,
                })
            })
        })
        .await
}

/// 입찰 이력 조회. 경매가 없으면 404
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Vec<Bid>, AuctionError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 존재 확인. 없는 경매의 이력은 빈 목록이 아니라 404다.
                sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;
                let bids = sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(bids)
            })
        })
        .await
}

/// 경매 목록 조회
/// 필터와 정렬 키를 검증한 뒤 요약 페이지와 전체 건수를 반환한다.
pub async fn list_auctions(
    db_manager: &DatabaseManager,
    params: ListingParams,
) -> Result<ListingPage, AuctionError> {
    info!("{:<12} --> 경매 목록 조회: {:?}", "Query", params);

    let sort = params
        .sort
        .unwrap_or_else(|| DEFAULT_SORT.to_string());
    let list_query = match sort.as_str() {
        "newest" => queries::LIST_AUCTIONS_NEWEST,
        "price_low" => queries::LIST_AUCTIONS_PRICE_LOW,
        "price_high" => queries::LIST_AUCTIONS_PRICE_HIGH,
        "ending_soon" => queries::LIST_AUCTIONS_ENDING_SOON,
        other => {
            return Err(AuctionError::Validation(format!(
                "지원하지 않는 정렬 키입니다: {}",
                other
            )))
        }
    };

    if let Some(status) = params.status.as_deref() {
        match status {
            s if s == STATUS_ACTIVE
                || s == STATUS_ENDED_SOLD
                || s == STATUS_ENDED_NO_BIDS
                || s == STATUS_CANCELLED => {}
            other => {
                return Err(AuctionError::Validation(format!(
                    "지원하지 않는 상태 필터입니다: {}",
                    other
                )))
            }
        }
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let q = params.q.filter(|s| !s.trim().is_empty());
    let category = params.category;
    let status = params.status;
    let seller_id = params.seller_id;

    let (auctions, total) = {
        let q = q.clone();
        let category = category.clone();
        let status = status.clone();
        db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let auctions = sqlx::query_as::<_, AuctionSummary>(list_query)
                        .bind(q.as_deref())
                        .bind(category.as_deref())
                        .bind(status.as_deref())
                        .bind(seller_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(&mut **tx)
                        .await?;
                    let total: i64 = sqlx::query_scalar(queries::COUNT_AUCTIONS)
                        .bind(q.as_deref())
                        .bind(category.as_deref())
                        .bind(status.as_deref())
                        .bind(seller_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    Ok::<_, AuctionError>((auctions, total))
                })
            })
            .await?
    };

    Ok(ListingPage {
        auctions,
        total,
        filters: AppliedFilters {
            q,
            category,
            status,
            seller_id,
            sort,
            limit,
            offset,
        },
    })
}

// endregion: --- Query Handlers
