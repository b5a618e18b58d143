use crate::common::context::Context;
use crate::common::redis_json::Json;
use crate::entities::beatmaps::Beatmap;
use crate::settings::AppSettings;
use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;

const READ_FIELDS: &str = "beatmap_id, beatmapset_id, beatmap_md5, song_name, ranked, rating";

fn make_cache_key(beatmap_md5: &str) -> String {
    format!("ussr:beatmaps:{beatmap_md5}")
}

pub async fn fetch_by_md5<C: Context>(ctx: &C, beatmap_md5: &str) -> sqlx::Result<Option<Beatmap>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM beatmaps WHERE beatmap_md5 = ?",
    );
    sqlx::query_as(QUERY)
        .bind(beatmap_md5)
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_cached<C: Context>(
    ctx: &C,
    beatmap_md5: &str,
) -> anyhow::Result<Option<Beatmap>> {
    let mut redis = ctx.redis().await?;
    let cached: Option<Json<Beatmap>> = redis.get(make_cache_key(beatmap_md5)).await?;
    Ok(cached.map(Json::into_inner))
}

pub async fn cache<C: Context>(ctx: &C, beatmap: &Beatmap) -> anyhow::Result<()> {
    let ttl = AppSettings::get().beatmap_cache_ttl;
    let mut redis = ctx.redis().await?;
    let _: () = redis
        .set_ex(
            make_cache_key(&beatmap.beatmap_md5),
            Json(beatmap),
            ttl.as_secs(),
        )
        .await?;
    Ok(())
}

/// Looks up beatmap metadata by checksum.
#[async_trait]
pub trait BeatmapStore: Sync + Send {
    async fn fetch_by_md5(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>>;
}

/// The two places beatmaps are read from: the redis cache and the database.
#[async_trait]
pub trait BeatmapSources: Sync + Send {
    async fn fetch_cached(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>>;
    async fn cache(&self, beatmap: &Beatmap) -> anyhow::Result<()>;
    async fn fetch_stored(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>>;
}

#[async_trait]
impl<C: Context> BeatmapSources for C {
    async fn fetch_cached(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>> {
        fetch_cached(self, beatmap_md5).await
    }

    async fn cache(&self, beatmap: &Beatmap) -> anyhow::Result<()> {
        cache(self, beatmap).await
    }

    async fn fetch_stored(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>> {
        Ok(fetch_by_md5(self, beatmap_md5).await?)
    }
}

#[async_trait]
impl<S: BeatmapSources> BeatmapStore for S {
    async fn fetch_by_md5(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>> {
        // redis is only a cache, losing it must not fail the lookup
        match self.fetch_cached(beatmap_md5).await {
            Ok(Some(beatmap)) => return Ok(Some(beatmap)),
            Ok(None) => {}
            Err(e) => warn!(beatmap_md5, "Failed to read cached beatmap: {e}"),
        }

        let beatmap = self.fetch_stored(beatmap_md5).await?;
        if let Some(beatmap) = &beatmap {
            if let Err(e) = self.cache(beatmap).await {
                warn!(beatmap_md5, "Failed to cache beatmap: {e}");
            }
        }
        Ok(beatmap)
    }
}
