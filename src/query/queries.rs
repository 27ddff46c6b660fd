/// 경매 단건 조회
pub const GET_AUCTION: &str = "SELECT id, seller_id, seller_name, name, description, category, condition, location, brand, model, image_url, base_price, current_highest_bid, highest_bidder_id, highest_bidder_name, start_time, end_time, status, created_at, updated_at FROM auctions WHERE id = $1";

/// 입찰 이력 조회. 커밋(수락) 순서 그대로 반환한다.
pub const GET_BID_HISTORY: &str = r#"
    SELECT id, auction_id, bidder_id, bidder_name, amount, bid_time
    FROM bids
    WHERE auction_id = $1
    ORDER BY id
"#;

/// 경매 입찰 수 조회
pub const COUNT_BIDS: &str = "SELECT COUNT(*) FROM bids WHERE auction_id = $1";

// 목록 조회. 필터는 모두 선택적이며 NULL 바인딩 시 통과한다.
// 정렬 키는 바인딩할 수 없으므로 정렬별 상수를 둔다. 동순위는 id로 깨서
// 페이지네이션을 결정적으로 만든다.

/// 최신 등록 순 목록 조회
pub const LIST_AUCTIONS_NEWEST: &str = r#"
    SELECT id, seller_id, seller_name, name, category, condition, location, image_url, base_price, current_highest_bid, highest_bidder_name, start_time, end_time, status, created_at
    FROM auctions
    WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR status = $3)
      AND ($4::bigint IS NULL OR seller_id = $4)
    ORDER BY created_at DESC, id DESC
    LIMIT $5 OFFSET $6
"#;

/// 현재 최고가 낮은 순 목록 조회
pub const LIST_AUCTIONS_PRICE_LOW: &str = r#"
    SELECT id, seller_id, seller_name, name, category, condition, location, image_url, base_price, current_highest_bid, highest_bidder_name, start_time, end_time, status, created_at
    FROM auctions
    WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR status = $3)
      AND ($4::bigint IS NULL OR seller_id = $4)
    ORDER BY current_highest_bid ASC, id ASC
    LIMIT $5 OFFSET $6
"#;

/// 현재 최고가 높은 순 목록 조회
pub const LIST_AUCTIONS_PRICE_HIGH: &str = r#"
    SELECT id, seller_id, seller_name, name, category, condition, location, image_url, base_price, current_highest_bid, highest_bidder_name, start_time, end_time, status, created_at
    FROM auctions
    WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR status = $3)
      AND ($4::bigint IS NULL OR seller_id = $4)
    ORDER BY current_highest_bid DESC, id ASC
    LIMIT $5 OFFSET $6
"#;

/// 종료 임박 순 목록 조회
pub const LIST_AUCTIONS_ENDING_SOON: &str = r#"
    SELECT id, seller_id, seller_name, name, category, condition, location, image_url, base_price, current_highest_bid, highest_bidder_name, start_time, end_time, status, created_at
    FROM auctions
    WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR status = $3)
      AND ($4::bigint IS NULL OR seller_id = $4)
    ORDER BY end_time ASC, id ASC
    LIMIT $5 OFFSET $6
"#;

/// 동일 필터 전체 건수 조회
pub const COUNT_AUCTIONS: &str = r#"
    SELECT COUNT(*)
    FROM auctions
    WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR status = $3)
      AND ($4::bigint IS NULL OR seller_id = $4)
"#;
