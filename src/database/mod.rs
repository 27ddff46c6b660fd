/// 경매 레코드 저장소 커넥션 관리
/// 최고가 갱신과 정산은 모두 조건부 UPDATE라 저장소 차원의 원자성에 의존한다.
/// 커넥션 획득에는 상한 시간을 둔다. 풀이 고갈되어도 입찰 요청이 매달리지 않고
/// 저장소 오류로 정리되어 돌아온다.
// region:    --- Imports
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
// endregion: --- Imports

// region:    --- Database Manager

// 스키마 부트스트랩 스크립트. 나열된 순서대로 실행된다.
const SCHEMA_SCRIPTS: &[&str] = &[
    include_str!("../sql/00-recreate-db.sql"),
    include_str!("../sql/01-create-schema.sql"),
];

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT_SECS: u64 = 5;

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect(&database_url)
            .await
            .expect("Failed to create pool");
        Self {
            pool: Arc::new(pool),
        }
    }

    /// 데이터베이스 풀 가져오기
    pub fn get_pool(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// 트랜잭션 실행
    /// 클로저가 Ok를 반환하면 커밋, Err를 반환하면 롤백한다. 경합에서 진
    /// 입찰 트랜잭션은 이 롤백 경로로 끝나 부분 기록을 남기지 않는다.
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Postgres>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// 스키마 초기화(기존 테이블 제거 후 재생성)
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        for script in SCHEMA_SCRIPTS {
            self.execute_multi_query(script).await?;
        }
        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// endregion: --- Database Manager
