use std::time::Duration;

use sqlx::SqlitePool;

use crate::services::cache::TtlCache;

pub mod middleware;
pub mod policy;
pub mod routes;

/// Janela padrao de 15 minutos para leituras de dashboard.
pub const CACHE_TTL_PADRAO_SECS: u64 = 900;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub cache: TtlCache,
}

impl AppState {
    pub fn new(pool: SqlitePool, ttl_secs: u64) -> Self {
        AppState {
            pool,
            cache: TtlCache::new(Duration::from_secs(ttl_secs)),
        }
    }
}
