use crate::api::RequestContext;
use crate::models::leaderboards::{LeaderboardArgs, LegacyResponse};
use crate::repositories::beatmaps::BeatmapStore;
use crate::repositories::scores::ScoreStore;
use crate::repositories::users::UserStore;
use crate::usecases::leaderboards;
use tracing::debug;

/// Controller for `osu-osz2-getscores.php`, the in-game beatmap leaderboard.
pub async fn get_scores(ctx: RequestContext, args: LeaderboardArgs) -> LegacyResponse {
    respond(&ctx, args).await
}

async fn respond<C>(ctx: &C, args: LeaderboardArgs) -> LegacyResponse
where
    C: UserStore + BeatmapStore + ScoreStore,
{
    match leaderboards::fetch(ctx, args).await {
        Ok(body) => LegacyResponse::ok(body),
        Err(e) => {
            debug!(error = e.code(), "Leaderboard request failed");
            LegacyResponse::error(e)
        }
    }
}
