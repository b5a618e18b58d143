use crate::common::caches::{NameCache, PasswordCache};
use crate::common::redis_pool::RedisPool;
use sqlx::{MySql, Pool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub name_cache: Arc<NameCache>,
    pub password_cache: Arc<PasswordCache>,
}
