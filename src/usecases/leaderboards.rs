use crate::common::error::{AppError, ServiceResult, store_unavailable};
use crate::entities::gamemodes::{CustomGamemode, Mode};
use crate::models::leaderboards::{Leaderboard, LeaderboardArgs};
use crate::models::scores::LeaderboardScore;
use crate::repositories::beatmaps::BeatmapStore;
use crate::repositories::scores::{LeaderboardFilter, ScoreStore};
use crate::repositories::users::UserStore;
use crate::usecases::{beatmaps, users};
use tracing::{debug, info};

pub const SCORE_LIMIT: usize = 100;
pub const SUPPORTED_CLIENT_VERSION: i32 = 4;

/// Fetches the top scores of a beatmap together with the total amount of
/// scores on it. The total is only counted separately when the page is full.
pub async fn fetch_global<C: ScoreStore>(
    ctx: &C,
    beatmap_md5: &str,
    mode: Mode,
    custom_gamemode: CustomGamemode,
) -> ServiceResult<(Vec<LeaderboardScore>, u64)> {
    let filter = LeaderboardFilter {
        beatmap_md5: beatmap_md5.to_owned(),
        mode,
        custom_gamemode,
    };

    let scores = match ctx.fetch_leaderboard(&filter, SCORE_LIMIT).await {
        Ok(scores) => scores,
        Err(e) => return store_unavailable(e),
    };

    let score_count = if scores.len() == SCORE_LIMIT {
        match ctx.fetch_leaderboard_count(&filter).await {
            Ok(count) => u64::try_from(count).unwrap_or_default().max(SCORE_LIMIT as u64),
            Err(e) => return store_unavailable(e),
        }
    } else {
        scores.len() as u64
    };

    let scoring = custom_gamemode.scoring();
    let scores = scores
        .into_iter()
        .map(|score| LeaderboardScore::from_entity(score, scoring))
        .collect();
    Ok((scores, score_count))
}

/// Serves a leaderboard request, returning the body sent to the client.
pub async fn fetch<C>(ctx: &C, args: LeaderboardArgs) -> ServiceResult<String>
where
    C: UserStore + BeatmapStore + ScoreStore,
{
    let user_id = users::authenticate(ctx, &args.username, &args.password_md5).await?;
    let query = args.decode()?;

    if !beatmaps::is_valid_md5(&args.beatmap_md5) {
        debug!(user_id, "Rejected malformed beatmap checksum");
        return Err(AppError::BeatmapsInvalidChecksum);
    }
    if query.client_version != SUPPORTED_CLIENT_VERSION {
        debug!(
            user_id,
            client_version = query.client_version,
            "Rejected unsupported leaderboard version"
        );
        return Err(AppError::UnsupportedClientVersion);
    }
    let mode = Mode::try_from(query.mode).map_err(|_| AppError::DecodingRequestFailed)?;
    let custom_gamemode = CustomGamemode::from_mods(query.mods);

    let beatmap = beatmaps::fetch_by_md5(ctx, &args.beatmap_md5).await?;
    if !beatmap.has_leaderboard() {
        return Ok(beatmap.leaderboard_header(0));
    }

    let (scores, score_count) =
        fetch_global(ctx, &args.beatmap_md5, mode, custom_gamemode).await?;
    info!(
        user_id,
        beatmap_md5 = %args.beatmap_md5,
        ?mode,
        ?custom_gamemode,
        score_count,
        "Serving leaderboard"
    );

    let leaderboard = Leaderboard {
        beatmap,
        score_count,
        scores,
    };
    Ok(leaderboard.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mods::Mods;
    use crate::repositories::fakes::{BEATMAP_MD5, FakeStore, PASSWORD_MD5, beatmap_entity};
    use std::sync::atomic::Ordering;

    fn args() -> LeaderboardArgs {
        LeaderboardArgs {
            username: "Some Player".to_owned(),
            password_md5: PASSWORD_MD5.to_owned(),
            beatmap_md5: BEATMAP_MD5.to_owned(),
            mods: "0".to_owned(),
            mode: "0".to_owned(),
            client_version: SUPPORTED_CLIENT_VERSION.to_string(),
            filter: "1".to_owned(),
            beatmapset_id: "141".to_owned(),
        }
    }

    #[tokio::test]
    async fn short_leaderboards_are_not_counted() {
        let ctx = FakeStore::new().with_scores(37, 9999);
        let (scores, score_count) =
            fetch_global(&ctx, BEATMAP_MD5, Mode::Standard, CustomGamemode::Vanilla)
                .await
                .unwrap();

        assert_eq!(scores.len(), 37);
        assert_eq!(score_count, 37);
        assert_eq!(ctx.score_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.score_counts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn full_pages_are_counted_with_the_same_filter() {
        let ctx = FakeStore::new().with_scores(250, 250);
        let (scores, score_count) =
            fetch_global(&ctx, BEATMAP_MD5, Mode::Taiko, CustomGamemode::Relax)
                .await
                .unwrap();

        assert_eq!(scores.len(), SCORE_LIMIT);
        assert_eq!(score_count, 250);
        assert_eq!(ctx.score_counts.load(Ordering::SeqCst), 1);

        let filters = ctx.filters.lock().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0], filters[1]);
        assert_eq!(filters[0].mode, Mode::Taiko);
        assert_eq!(filters[0].custom_gamemode, CustomGamemode::Relax);
    }

    #[tokio::test]
    async fn count_never_drops_below_the_page() {
        let ctx = FakeStore::new().with_scores(100, 12);
        let (_, score_count) =
            fetch_global(&ctx, BEATMAP_MD5, Mode::Standard, CustomGamemode::Vanilla)
                .await
                .unwrap();
        assert_eq!(score_count, 100);
    }

    #[tokio::test]
    async fn store_failures_are_reported() {
        let mut ctx = FakeStore::new().with_scores(100, 100);
        ctx.fail_scores = true;
        let result =
            fetch_global(&ctx, BEATMAP_MD5, Mode::Standard, CustomGamemode::Vanilla).await;

        assert_eq!(result.unwrap_err(), AppError::StoreUnavailable);
        assert_eq!(ctx.score_counts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn count_failures_are_reported() {
        let mut ctx = FakeStore::new().with_scores(100, 100);
        ctx.fail_count = true;
        let result =
            fetch_global(&ctx, BEATMAP_MD5, Mode::Standard, CustomGamemode::Vanilla).await;

        assert_eq!(result.unwrap_err(), AppError::StoreUnavailable);
        assert_eq!(ctx.score_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.score_counts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn count_failures_send_the_basic_error() {
        let mut ctx = FakeStore::new().with_scores(100, 100);
        ctx.fail_count = true;
        let error = fetch(&ctx, args()).await.unwrap_err();
        assert_eq!(error.legacy_body(), "error: no");
    }

    #[tokio::test]
    async fn performance_boards_rank_by_pp() {
        let ctx = FakeStore::new().with_scores(2, 2);
        let (scores, _) = fetch_global(&ctx, BEATMAP_MD5, Mode::Standard, CustomGamemode::Autopilot)
            .await
            .unwrap();
        assert_eq!(scores[0].ranking_value, 300.0);
        assert_eq!(scores[1].ranking_value, 299.0);
    }

    #[tokio::test]
    async fn serves_ranked_leaderboard() {
        let ctx = FakeStore::new().with_scores(3, 3);
        let body = fetch(&ctx, args()).await.unwrap();
        let lines: Vec<&str> = body.split('\n').collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "2|false|315|141|3");
        assert_eq!(lines[1], "0");
        assert_eq!(lines[2], "Lix - Tori no Uta [Insane]");
        assert_eq!(lines[3], "9.0");
        assert_eq!(lines[4], "");
        assert_eq!(
            lines[5],
            "10000|player0|5000000|700|0|4|500|0|1|90|1|0|2000|1|1600000000|1"
        );
        let placements: Vec<&str> = lines[5..]
            .iter()
            .map(|line| line.split('|').nth(13).unwrap())
            .collect();
        assert_eq!(placements, ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn relax_mods_select_the_relax_board() {
        let ctx = FakeStore::new().with_scores(1, 1);
        let mut args = args();
        args.mods = (Mods::Relax | Mods::Hidden).bits().to_string();
        let body = fetch(&ctx, args).await.unwrap();

        assert_eq!(
            ctx.filters.lock().unwrap()[0].custom_gamemode,
            CustomGamemode::Relax
        );
        assert_eq!(body.split('\n').nth(5).unwrap().split('|').nth(2), Some("300"));
    }

    #[tokio::test]
    async fn empty_leaderboard_keeps_blank_own_score_line() {
        let ctx = FakeStore::new();
        let body = fetch(&ctx, args()).await.unwrap();
        let lines: Vec<&str> = body.split('\n').collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "2|false|315|141|0");
        assert_eq!(lines[4], "");
    }

    #[tokio::test]
    async fn unranked_beatmaps_only_get_a_header() {
        let mut ctx = FakeStore::new().with_scores(5, 5);
        ctx.beatmap = Some(beatmap_entity(0));
        let body = fetch(&ctx, args()).await.unwrap();

        assert_eq!(body, "0|false");
        assert_eq!(body.lines().count(), 1);
        assert_eq!(ctx.score_store_calls(), 0);
    }

    #[tokio::test]
    async fn unsupported_version_is_rejected_before_lookups() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.client_version = "3".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::UnsupportedClientVersion);
        assert_eq!(error.legacy_body(), "error: no");
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.score_store_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_checksum_is_rejected_before_lookups() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.beatmap_md5 = BEATMAP_MD5[..31].to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::BeatmapsInvalidChecksum);
        assert_eq!(error.legacy_body(), "error: no");
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.score_store_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_password_is_rejected_before_lookups() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.password_md5 = "d41d8cd98f00b204e9800998ecf8427e".to_owned();
        // an invalid version must not be revealed before the credential failure
        args.client_version = "3".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::SessionsInvalidCredentials);
        assert_eq!(error.legacy_body(), "error: pass");
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.score_store_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_users_look_like_bad_passwords() {
        let ctx = FakeStore::new();
        let mut args = args();
        args.username = "nobody".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error.legacy_body(), "error: pass");
        assert_eq!(ctx.password_checks.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_beatmaps_get_the_basic_error() {
        let mut ctx = FakeStore::new().with_scores(5, 5);
        ctx.beatmap = None;
        let error = fetch(&ctx, args()).await.unwrap_err();

        assert_eq!(error, AppError::BeatmapsNotFound);
        assert_eq!(error.legacy_body(), "error: no");
        assert_eq!(ctx.score_store_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_modes_are_rejected() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.mode = "7".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::DecodingRequestFailed);
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_password_hides_malformed_numbers() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.password_md5 = "wrong".to_owned();
        args.mode = "256".to_owned();
        args.mods = "not-a-number".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::SessionsInvalidCredentials);
        assert_eq!(error.legacy_body(), "error: pass");
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_user_hides_malformed_numbers() {
        let ctx = FakeStore::new();
        let mut args = args();
        args.username = "nobody".to_owned();
        args.client_version = String::new();
        let error = fetch(&ctx, args).await.unwrap_err();
        assert_eq!(error.legacy_body(), "error: pass");
    }

    #[tokio::test]
    async fn malformed_numbers_are_rejected_after_authentication() {
        let ctx = FakeStore::new().with_scores(5, 5);
        let mut args = args();
        args.mode = "256".to_owned();
        let error = fetch(&ctx, args).await.unwrap_err();

        assert_eq!(error, AppError::DecodingRequestFailed);
        assert_eq!(error.legacy_body(), "error: no");
        assert_eq!(ctx.password_checks.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.beatmap_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unused_fields_are_ignored() {
        let ctx = FakeStore::new().with_scores(1, 1);
        let mut args = args();
        args.filter = "x".to_owned();
        args.beatmapset_id = "abc".to_owned();
        let body = fetch(&ctx, args).await.unwrap();
        assert!(body.starts_with("2|false|315|141|1\n"));
    }
}
