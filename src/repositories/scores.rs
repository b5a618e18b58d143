use crate::common::context::Context;
use crate::entities::gamemodes::{CustomGamemode, Mode};
use crate::entities::scores::LeaderboardScore;
use crate::models::privileges::Privileges;
use crate::models::scores::BEST_SCORE_STATUS;
use async_trait::async_trait;
use sqlx::Arguments;
use sqlx::mysql::MySqlArguments;

const READ_FIELDS: &str = r#"s.id, s.score, s.pp, s.max_combo,
s.`50_count` AS count_50, s.`100_count` AS count_100, s.`300_count` AS count_300,
s.misses_count AS count_miss, s.katus_count AS count_katu, s.gekis_count AS count_geki,
s.full_combo, s.mods, s.time, u.username, u.id AS userid"#;

/// Selects the best score of every visible player on one beatmap, mode
/// and custom gamemode. Leaderboard fetches and counts share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardFilter {
    pub beatmap_md5: String,
    pub mode: Mode,
    pub custom_gamemode: CustomGamemode,
}

impl LeaderboardFilter {
    fn from_where_clause(&self) -> String {
        let table = self.custom_gamemode.scores_table();
        format!(
            r#"FROM {table} s
            INNER JOIN users u ON s.userid = u.id
            WHERE u.privileges & ?
            AND s.beatmap_md5 = ?
            AND s.play_mode = ?
            AND s.completed = ?"#
        )
    }

    fn arguments(&self) -> anyhow::Result<MySqlArguments> {
        let mut args = MySqlArguments::default();
        args.add(Privileges::leaderboard_visible().bits())
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        args.add(self.beatmap_md5.clone())
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        args.add(self.mode as u8)
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        args.add(BEST_SCORE_STATUS)
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        Ok(args)
    }

    pub fn select_query(&self, limit: usize) -> String {
        let sort_column = self.custom_gamemode.scoring().sort_column();
        format!(
            "SELECT {READ_FIELDS} {} ORDER BY s.{sort_column} DESC LIMIT {limit}",
            self.from_where_clause()
        )
    }

    pub fn count_query(&self) -> String {
        format!("SELECT COUNT(*) {}", self.from_where_clause())
    }
}

pub async fn fetch_leaderboard<C: Context>(
    ctx: &C,
    filter: &LeaderboardFilter,
    limit: usize,
) -> anyhow::Result<Vec<LeaderboardScore>> {
    let query = filter.select_query(limit);
    let args = filter.arguments()?;
    let scores: Vec<LeaderboardScore> = sqlx::query_as_with(&query, args)
        .fetch_all(ctx.db())
        .await?;
    Ok(scores)
}

pub async fn fetch_leaderboard_count<C: Context>(
    ctx: &C,
    filter: &LeaderboardFilter,
) -> anyhow::Result<i64> {
    let query = filter.count_query();
    let args = filter.arguments()?;
    let count: i64 = sqlx::query_scalar_with(&query, args)
        .fetch_one(ctx.db())
        .await?;
    Ok(count)
}

/// Read access to the per-gamemode score tables.
#[async_trait]
pub trait ScoreStore: Sync + Send {
    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: usize,
    ) -> anyhow::Result<Vec<LeaderboardScore>>;

    async fn fetch_leaderboard_count(&self, filter: &LeaderboardFilter) -> anyhow::Result<i64>;
}

#[async_trait]
impl<C: Context> ScoreStore for C {
    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: usize,
    ) -> anyhow::Result<Vec<LeaderboardScore>> {
        fetch_leaderboard(self, filter, limit).await
    }

    async fn fetch_leaderboard_count(&self, filter: &LeaderboardFilter) -> anyhow::Result<i64> {
        fetch_leaderboard_count(self, filter).await
    }
}
