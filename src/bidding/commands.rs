/// 입찰 관련 커맨드 처리
/// 1. 입찰(경매별 낙관적 중재)
/// 2. 경매 등록
// region:    --- Imports
use crate::auth::VerifiedUser;
use crate::bidding::validator;
use crate::database::DatabaseManager;
use crate::error::AuctionError;
use crate::query::{handlers, queries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: i64,
    pub bidder_id: i64,
    pub bidder_name: String,
    pub amount: i64,
}

/// 입찰 수락 결과
#[derive(Debug, Serialize)]
pub struct BidAccepted {
    pub current_highest_bid: i64,
    pub highest_bidder: String,
    pub bid_count: i64,
}

/// 경매 등록 명령. 판매자 식별 정보는 검증된 사용자에게서 가져온다.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAuctionCommand {
    pub name: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub location: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub image_url: Option<String>,
    pub base_price: i64,
    pub end_time: DateTime<Utc>,
}

// 최대 재시도 횟수
const MAX_RETRIES: u32 = 100;
// 충돌 백오프 상한(ms)
const MAX_BACKOFF_MS: u64 = 64;

// 조건부 최고가 갱신. 읽어 둔 최고가가 그대로인 ACTIVE 레코드만 갱신된다.
const COMMIT_BID: &str = "UPDATE auctions SET current_highest_bid = $1, highest_bidder_id = $2, highest_bidder_name = $3, updated_at = $4 WHERE id = $5 AND status = 'ACTIVE' AND current_highest_bid = $6 RETURNING id";

// 입찰 기록 추가. 최고가 갱신과 같은 트랜잭션에서만 실행된다.
const INSERT_BID: &str = "INSERT INTO bids (auction_id, bidder_id, bidder_name, amount, bid_time) VALUES ($1, $2, $3, $4, $5)";

// 경매 등록. 현재 최고가는 시작 가격으로 초기화된다.
const CREATE_AUCTION: &str = "INSERT INTO auctions (seller_id, seller_name, name, description, category, condition, location, brand, model, image_url, base_price, current_highest_bid, start_time, end_time, status, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11, $12, $13, 'ACTIVE', $12, $12) RETURNING id";

/// 1. 입찰
/// 경매별 직렬화 보장: 읽기-검증-쓰기 구간을 조건부 UPDATE로 중재한다.
/// 같은 최고가 슬롯에는 정확히 하나의 입찰만 커밋되고, 실패 시 부분 기록 없이
/// 새 스냅샷으로 재검증한다. 서로 다른 경매끼리는 경합하지 않는다.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<BidAccepted, AuctionError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);
    let mut retries = 0;

    while retries < MAX_RETRIES {
        // 최신 스냅샷 조회
        let auction = handlers::get_auction(db_manager, cmd.auction_id).await?;
        let now = Utc::now();

        // 스냅샷 기준 사전 검증. 재시도마다 새 상태로 다시 검사한다.
        validator::validate_bid(&auction, cmd.bidder_id, cmd.amount, now)?;

        match try_commit_bid(db_manager, &cmd, auction.current_highest_bid, now).await? {
            Some(bid_count) => {
                info!(
                    "{:<12} --> 입찰 수락: 경매 {} 최고가 {}",
                    "Command", cmd.auction_id, cmd.amount
                );
                return Ok(BidAccepted {
                    current_highest_bid: cmd.amount,
                    highest_bidder: cmd.bidder_name.clone(),
                    bid_count,
                });
            }
            None => {
                // 다른 입찰이 먼저 커밋됨. 백오프 후 재시도
                warn!(
                    "{:<12} --> 낙관적 업데이트 충돌: 재시도 {}",
                    "Command",
                    retries + 1
                );
                retries += 1;
                let backoff = (1u64 << retries.min(6)).min(MAX_BACKOFF_MS);
                sleep(Duration::from_millis(backoff)).await;
            }
        }
    }

    Err(AuctionError::MaxRetriesExceeded)
}

/// 조건부 쓰기 한 사이클
/// 성공 시 갱신된 입찰 수, 경합 패배 시 None. 패배한 트랜잭션은 아무것도 남기지 않는다.
async fn try_commit_bid(
    db_manager: &DatabaseManager,
    cmd: &PlaceBidCommand,
    observed_highest: i64,
    now: DateTime<Utc>,
) -> Result<Option<i64>, AuctionError> {
    let auction_id = cmd.auction_id;
    let bidder_id = cmd.bidder_id;
    let bidder_name = cmd.bidder_name.clone();
    let amount = cmd.amount;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let updated = sqlx::query(COMMIT_BID)
                    .bind(amount)
                    .bind(bidder_id)
                    .bind(&bidder_name)
                    .bind(now)
                    .bind(auction_id)
                    .bind(observed_highest)
                    .fetch_optional(&mut **tx)
                    .await?;

                if updated.is_none() {
                    return Ok(None);
                }

                sqlx::query(INSERT_BID)
                    .bind(auction_id)
                    .bind(bidder_id)
                    .bind(&bidder_name)
                    .bind(amount)
                    .bind(now)
                    .execute(&mut **tx)
                    .await?;

                let bid_count: i64 = sqlx::query_scalar(queries::COUNT_BIDS)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(Some(bid_count))
            })
        })
        .await
}

/// 2. 경매 등록
pub async fn handle_create_auction(
    cmd: CreateAuctionCommand,
    seller: &VerifiedUser,
    db_manager: &DatabaseManager,
) -> Result<i64, AuctionError> {
    info!("{:<12} --> 경매 등록 처리 시작: {:?}", "Command", cmd);
    let now = Utc::now();

    if cmd.name.trim().is_empty() {
        return Err(AuctionError::Validation(
            "상품명은 비어 있을 수 없습니다.".to_string(),
        ));
    }
    if cmd.description.trim().is_empty() {
        return Err(AuctionError::Validation(
            "상품 설명은 비어 있을 수 없습니다.".to_string(),
        ));
    }
    if cmd.category.trim().is_empty() {
        return Err(AuctionError::Validation("카테고리는 필수입니다.".to_string()));
    }
    if cmd.condition.trim().is_empty() {
        return Err(AuctionError::Validation(
            "상품 상태는 필수입니다.".to_string(),
        ));
    }
    if cmd.base_price < 0 {
        return Err(AuctionError::Validation(
            "시작 가격은 0 이상이어야 합니다.".to_string(),
        ));
    }
    if cmd.end_time <= now {
        return Err(AuctionError::Validation(
            "경매 종료 시간은 미래여야 합니다.".to_string(),
        ));
    }

    let seller_id = seller.user_id;
    let seller_name = seller.display_name.clone();
    let name = cmd.name.trim().to_string();
    let description = cmd.description.trim().to_string();
    let category = cmd.category.trim().to_string();
    let condition = cmd.condition.trim().to_string();
    // 빈 문자열 선택 필드는 미입력으로 취급
    let location = cmd.location.filter(|s| !s.trim().is_empty());
    let brand = cmd.brand.filter(|s| !s.trim().is_empty());
    let model = cmd.model.filter(|s| !s.trim().is_empty());
    let image_url = cmd.image_url.filter(|s| !s.trim().is_empty());
    let base_price = cmd.base_price;
    let end_time = cmd.end_time;

    let auction_id: i64 = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let id: i64 = sqlx::query_scalar(CREATE_AUCTION)
                    .bind(seller_id)
                    .bind(&seller_name)
                    .bind(&name)
                    .bind(&description)
                    .bind(&category)
                    .bind(&condition)
                    .bind(location.as_deref())
                    .bind(brand.as_deref())
                    .bind(model.as_deref())
                    .bind(image_url.as_deref())
                    .bind(base_price)
                    .bind(now)
                    .bind(end_time)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<_, AuctionError>(id)
            })
        })
        .await?;

    info!("{:<12} --> 경매 등록 완료 id: {}", "Command", auction_id);
    Ok(auction_id)
}

// endregion: --- Commands
