use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::beatmaps::Beatmap;
use crate::repositories::beatmaps::BeatmapStore;

const MD5_LENGTH: usize = 32;

/// Beatmap checksums are 32 lowercase hex characters.
pub fn is_valid_md5(beatmap_md5: &str) -> bool {
    beatmap_md5.len() == MD5_LENGTH
        && beatmap_md5
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

pub async fn fetch_by_md5<C: BeatmapStore>(ctx: &C, beatmap_md5: &str) -> ServiceResult<Beatmap> {
    match ctx.fetch_by_md5(beatmap_md5).await {
        Ok(Some(beatmap)) => Ok(Beatmap::from(beatmap)),
        // TODO: fetch unknown or outdated maps from the osu! api once a beatmap service is available
        Ok(None) => Err(AppError::BeatmapsNotFound),
        Err(e) => unexpected(e),
    }
}
