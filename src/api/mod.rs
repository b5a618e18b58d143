use crate::common::context::Context;
use crate::common::init;
use crate::common::caches::{NameCache, PasswordCache};
use crate::common::redis_pool::{PoolResult, RedisPool};
use crate::common::state::AppState;
use crate::models::leaderboards::LegacyResponse;
use crate::settings::AppSettings;
use async_trait::async_trait;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::get;
use sqlx::{MySql, Pool};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod osu;

pub struct RequestContext {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub name_cache: Arc<NameCache>,
    pub password_cache: Arc<PasswordCache>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(osu::index)).route(
        "/web/osu-osz2-getscores.php",
        get(osu::leaderboards::get_scores).post(osu::leaderboards::get_scores),
    )
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router().with_state(state);

    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving leaderboards on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = LegacyResponse;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            redis: state.redis.clone(),
            name_cache: state.name_cache.clone(),
            password_cache: state.password_cache.clone(),
        })
    }
}

#[async_trait]
impl Context for RequestContext {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    async fn redis(&self) -> PoolResult {
        self.redis.get().await
    }

    fn name_cache(&self) -> &NameCache {
        &self.name_cache
    }

    fn password_cache(&self) -> &PasswordCache {
        &self.password_cache
    }
}
