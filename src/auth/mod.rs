/// 외부 인증 협력자 경계
/// 토큰 발급과 검증은 업스트림 게이트웨이 소관이다. 본 서비스는 게이트웨이가
/// 검증을 마친 뒤 주입하는 사용자 헤더만 신뢰하고, 없으면 401로 거절한다.
// region:    --- Imports
use crate::error::AuctionError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;
// endregion: --- Imports

// region:    --- Verified User

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// 게이트웨이가 검증한 사용자 식별 정보
/// display_name은 기록 시점 스냅샷으로 경매/입찰에 저장된다.
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: i64,
    pub display_name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedUser
where
    S: Send + Sync,
{
    type Rejection = AuctionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());

        let display_name = parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (user_id, display_name) {
            (Some(user_id), Some(display_name)) => Ok(VerifiedUser {
                user_id,
                display_name,
            }),
            _ => {
                warn!("{:<12} --> 검증된 사용자 헤더 누락", "Auth");
                Err(AuctionError::Unauthorized)
            }
        }
    }
}

// endregion: --- Verified User
