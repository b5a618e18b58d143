use crate::common::caches::{NameCache, PasswordCache};
use crate::common::redis_pool::PoolResult;
use async_trait::async_trait;
use sqlx::{MySql, Pool};

/// Capability handle passed into every repository call.
#[async_trait]
pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<MySql>;
    async fn redis(&self) -> PoolResult;
    fn name_cache(&self) -> &NameCache;
    fn password_cache(&self) -> &PasswordCache;
}
