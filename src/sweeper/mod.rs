/// 경매 수명주기 스위퍼
/// 종료 시간이 지난 ACTIVE 경매를 입찰 존재 여부에 따라 종결 상태로 전환한다.
/// 전환은 status = 'ACTIVE' 조건부 UPDATE라 동시에 두 번 실행돼도
/// 두 번째 실행은 대상 0건으로 끝난다.
// region:    --- Imports
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- Sweep

// 입찰이 있었던 만료 경매 -> 낙찰 종료
// 최고 입찰자 존재 여부가 곧 입찰 이력 존재 여부다.
const SWEEP_ENDED_SOLD: &str = "UPDATE auctions SET status = 'ENDED_SOLD', updated_at = $1 WHERE status = 'ACTIVE' AND end_time <= $1 AND highest_bidder_id IS NOT NULL";

// 입찰이 없었던 만료 경매 -> 유찰 종료
const SWEEP_ENDED_NO_BIDS: &str = "UPDATE auctions SET status = 'ENDED_NO_BIDS', updated_at = $1 WHERE status = 'ACTIVE' AND end_time <= $1 AND highest_bidder_id IS NULL";

/// 만료된 경매 일괄 정산. 전환된 레코드 수를 반환한다.
/// 한 문장이 실패해도 기록만 남기고 나머지는 계속 진행한다.
/// 실패한 전환 조건은 그대로 남아 다음 패스에서 다시 잡힌다.
pub async fn sweep_expired(pool: &PgPool, now: DateTime<Utc>) -> u64 {
    let mut settled = 0;

    match sqlx::query(SWEEP_ENDED_SOLD).bind(now).execute(pool).await {
        Ok(result) => settled += result.rows_affected(),
        Err(e) => error!("{:<12} --> 낙찰 종료 전환 실패: {:?}", "Sweeper", e),
    }

    match sqlx::query(SWEEP_ENDED_NO_BIDS)
        .bind(now)
        .execute(pool)
        .await
    {
        Ok(result) => settled += result.rows_affected(),
        Err(e) => error!("{:<12} --> 유찰 종료 전환 실패: {:?}", "Sweeper", e),
    }

    settled
}

// endregion: --- Sweep

// region:    --- Auction Sweeper

/// 주기 실행 스위퍼. 목록 조회 직전의 인라인 정산을 보완한다.
pub struct AuctionSweeper {
    pool: Arc<PgPool>,
}

impl AuctionSweeper {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// 스위퍼 시작
    pub async fn start(&self, period: Duration) {
        let pool = Arc::clone(&self.pool);
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                let settled = sweep_expired(&pool, Utc::now()).await;
                if settled > 0 {
                    debug!("{:<12} --> 만료 경매 {}건 정산", "Sweeper", settled);
                }
            }
        });
    }
}

// endregion: --- Auction Sweeper
