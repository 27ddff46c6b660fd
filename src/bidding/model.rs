use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 경매 상태 값. 종료 상태(ENDED_SOLD / ENDED_NO_BIDS / CANCELLED)는 재진입하지 않는다.
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_ENDED_SOLD: &str = "ENDED_SOLD";
pub const STATUS_ENDED_NO_BIDS: &str = "ENDED_NO_BIDS";
pub const STATUS_CANCELLED: &str = "CANCELLED";

// 경매 모델
// seller_name / highest_bidder_name은 기록 시점의 표시명 스냅샷이다.
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub seller_id: i64,
    pub seller_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub location: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub image_url: Option<String>,
    pub base_price: i64,
    pub current_highest_bid: i64,
    pub highest_bidder_id: Option<i64>,
    pub highest_bidder_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 목록 조회용 요약 모델(입찰 이력 제외)
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct AuctionSummary {
    pub id: i64,
    pub seller_id: i64,
    pub seller_name: String,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub base_price: i64,
    pub current_highest_bid: i64,
    pub highest_bidder_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// 입찰 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub bidder_id: i64,
    pub bidder_name: String,
    pub amount: i64,
    pub bid_time: DateTime<Utc>,
}

// 단건 조회 응답(수락 순서의 전체 입찰 이력 포함)
#[derive(Serialize)]
pub struct AuctionDetail {
    #[serde(flatten)]
    pub auction: Auction,
    pub bid_history: Vec<Bid>,
}
