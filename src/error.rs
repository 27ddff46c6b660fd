// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

// region:    --- Error

/// 경매 도메인 오류
/// 핸들러가 그대로 반환하면 상태 코드와 {error, code} JSON 바디로 매핑된다.
#[derive(Debug, Error)]
pub enum AuctionError {
    /// 입력 값 검증 실패
    #[error("{0}")]
    Validation(String),

    /// 경매 또는 대상 리소스 없음
    #[error("경매를 찾을 수 없습니다.")]
    NotFound,

    /// 경매 시작 전
    #[error("경매가 아직 시작되지 않았습니다.")]
    NotStarted,

    /// 경매 종료(만료 후 아직 정산되지 않은 경우 포함)
    #[error("경매가 이미 종료되었습니다.")]
    AlreadyEnded,

    /// 판매자 본인 입찰
    #[error("판매자는 자신의 경매에 입찰할 수 없습니다.")]
    SelfBid,

    /// 입찰 금액 형식 오류
    #[error("입찰 금액이 올바르지 않습니다.")]
    InvalidAmount,

    /// 입찰 금액이 현재 최고가 이하
    #[error("입찰 금액은 현재 최고 입찰가보다 높아야 합니다.")]
    LowBid { current_highest_bid: i64 },

    /// 낙관적 업데이트 재시도 한도 초과. 재시도 가능
    #[error("최대 재시도 횟수 초과")]
    MaxRetriesExceeded,

    /// 검증된 사용자 정보 누락
    #[error("인증 정보가 없거나 올바르지 않습니다.")]
    Unauthorized,

    /// 저장소 오류
    #[error("저장소 오류가 발생했습니다.")]
    Storage(#[source] sqlx::Error),
}

impl AuctionError {
    /// 클라이언트 분기용 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::Validation(_) => "VALIDATION",
            AuctionError::NotFound => "NOT_FOUND",
            AuctionError::NotStarted => "NOT_STARTED",
            AuctionError::AlreadyEnded => "ALREADY_ENDED",
            AuctionError::SelfBid => "SELF_BID",
            AuctionError::InvalidAmount => "INVALID_AMOUNT",
            AuctionError::LowBid { .. } => "LOW_BID",
            AuctionError::MaxRetriesExceeded => "MAX_RETRIES_EXCEEDED",
            AuctionError::Unauthorized => "UNAUTHORIZED",
            AuctionError::Storage(_) => "STORAGE",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AuctionError::Validation(_)
            | AuctionError::NotStarted
            | AuctionError::AlreadyEnded
            | AuctionError::SelfBid
            | AuctionError::InvalidAmount
            | AuctionError::LowBid { .. } => StatusCode::BAD_REQUEST,
            AuctionError::NotFound => StatusCode::NOT_FOUND,
            AuctionError::MaxRetriesExceeded => StatusCode::CONFLICT,
            AuctionError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuctionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// RowNotFound는 404로, 나머지 sqlx 오류는 저장소 오류로 매핑
impl From<sqlx::Error> for AuctionError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AuctionError::NotFound,
            e => AuctionError::Storage(e),
        }
    }
}

impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        if let AuctionError::Storage(ref e) = self {
            error!("{:<12} --> 저장소 오류: {:?}", "Error", e);
        }

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        // LOW_BID 응답에는 갱신된 최고가를 함께 내려준다.
        if let AuctionError::LowBid {
            current_highest_bid,
        } = self
        {
            body["current_highest_bid"] = current_highest_bid.into();
        }

        (self.status_code(), Json(body)).into_response()
    }
}

// endregion: --- Error
