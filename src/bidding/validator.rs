// region:    --- Imports
use crate::bidding::model::{Auction, STATUS_ACTIVE};
use crate::error::AuctionError;
use chrono::{DateTime, Utc};
// endregion: --- Imports

// region:    --- Validator

/// 입찰 사전 검증
/// 경매 스냅샷만 읽는 순수 함수라 잠금 없이 호출해도 안전하다.
/// 실제 수락 여부는 조건부 쓰기가 최종 결정한다.
pub fn validate_bid(
    auction: &Auction,
    bidder_id: i64,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<(), AuctionError> {
    // 경매 시작 전
    if now < auction.start_time {
        return Err(AuctionError::NotStarted);
    }

    // 열린 경매 판정: 상태가 ACTIVE이고 종료 시간이 지나지 않아야 한다.
    // 만료되었지만 아직 정산되지 않은 ACTIVE 레코드도 거부한다.
    if auction.status != STATUS_ACTIVE || auction.end_time <= now {
        return Err(AuctionError::AlreadyEnded);
    }

    // 판매자 본인 입찰 금지
    if bidder_id == auction.seller_id {
        return Err(AuctionError::SelfBid);
    }

    // 금액 범위 검증. 숫자가 아닌 입력은 직렬화 경계에서 이미 걸러진다.
    if amount < 0 {
        return Err(AuctionError::InvalidAmount);
    }

    // 현재 최고가보다 엄격히 높아야 한다. 동일 금액은 경매를 진행시키지 않는다.
    if amount <= auction.current_highest_bid {
        return Err(AuctionError::LowBid {
            current_highest_bid: auction.current_highest_bid,
        });
    }

    Ok(())
}

// endregion: --- Validator

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::{STATUS_CANCELLED, STATUS_ENDED_SOLD};
    use chrono::Duration;

    const SELLER_ID: i64 = 10;
    const BIDDER_ID: i64 = 20;

    /// 시작 가격 100, 1시간 뒤 종료되는 진행 중 경매
    fn open_auction(now: DateTime<Utc>) -> Auction {
        Auction {
            id: 1,
            seller_id: SELLER_ID,
            seller_name: "판매자".to_string(),
            name: "검증 테스트 상품".to_string(),
            description: "입찰 검증용 상품입니다.".to_string(),
            category: "전자기기".to_string(),
            condition: "중고".to_string(),
            location: None,
            brand: None,
            model: None,
            image_url: None,
            base_price: 100,
            current_highest_bid: 100,
            highest_bidder_id: None,
            highest_bidder_name: None,
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            status: STATUS_ACTIVE.to_string(),
            created_at: now - Duration::hours(1),
            updated_at: now - Duration::hours(1),
        }
    }

    #[test]
    fn accepts_strictly_higher_bid() {
        let now = Utc::now();
        let auction = open_auction(now);
        assert!(validate_bid(&auction, BIDDER_ID, 150, now).is_ok());
    }

    #[test]
    fn rejects_equal_amount() {
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.current_highest_bid = 150;
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 150, now),
            Err(AuctionError::LowBid {
                current_highest_bid: 150
            })
        ));
    }

    #[test]
    fn rejects_lower_amount() {
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.current_highest_bid = 200;
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 120, now),
            Err(AuctionError::LowBid { .. })
        ));
    }

    #[test]
    fn rejects_seller_self_bid_regardless_of_amount() {
        let now = Utc::now();
        let auction = open_auction(now);
        assert!(matches!(
            validate_bid(&auction, SELLER_ID, 1_000_000, now),
            Err(AuctionError::SelfBid)
        ));
    }

    #[test]
    fn rejects_negative_amount_as_invalid_not_low() {
        let now = Utc::now();
        let auction = open_auction(now);
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, -1, now),
            Err(AuctionError::InvalidAmount)
        ));
    }

    #[test]
    fn rejects_expired_but_unswept_active_record() {
        // 정산 지연 중 들어온 늦은 입찰 차단
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.end_time = now - Duration::seconds(1);
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 150, now),
            Err(AuctionError::AlreadyEnded)
        ));
    }

    #[test]
    fn rejects_terminal_status_regardless_of_amount() {
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.status = STATUS_ENDED_SOLD.to_string();
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 1_000_000, now),
            Err(AuctionError::AlreadyEnded)
        ));
    }

    #[test]
    fn rejects_cancelled_auction() {
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.status = STATUS_CANCELLED.to_string();
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 150, now),
            Err(AuctionError::AlreadyEnded)
        ));
    }

    #[test]
    fn rejects_bid_before_start_time() {
        let now = Utc::now();
        let mut auction = open_auction(now);
        auction.start_time = now + Duration::minutes(5);
        assert!(matches!(
            validate_bid(&auction, BIDDER_ID, 150, now),
            Err(AuctionError::NotStarted)
        ));
    }
}

// endregion: --- Tests
