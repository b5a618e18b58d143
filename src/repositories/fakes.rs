//! In-memory stores for exercising usecases and controllers without MySQL.

use crate::entities::beatmaps::Beatmap;
use crate::entities::scores::LeaderboardScore;
use crate::repositories::beatmaps::BeatmapStore;
use crate::repositories::scores::{LeaderboardFilter, ScoreStore};
use crate::repositories::users::UserStore;
use async_trait::async_trait;
use hashbrown::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BEATMAP_MD5: &str = "a5b99395a42bd55bc5eb1d2411cbdf8b";
pub const PASSWORD_MD5: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

#[derive(Default)]
pub struct FakeStore {
    pub users: HashMap<String, (i64, String)>,
    pub beatmap: Option<Beatmap>,
    pub scores: Vec<LeaderboardScore>,
    pub total_scores: i64,
    pub fail_scores: bool,
    pub fail_count: bool,

    pub password_checks: AtomicUsize,
    pub beatmap_lookups: AtomicUsize,
    pub score_fetches: AtomicUsize,
    pub score_counts: AtomicUsize,
    pub filters: Mutex<Vec<LeaderboardFilter>>,
}

impl FakeStore {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert("some_player".to_owned(), (1000, PASSWORD_MD5.to_owned()));
        Self {
            users,
            beatmap: Some(beatmap_entity(2)),
            ..Default::default()
        }
    }

    pub fn with_scores(mut self, amount: usize, total_scores: i64) -> Self {
        self.scores = (0..amount).map(|idx| score_entity(idx as i64)).collect();
        self.total_scores = total_scores;
        self
    }

    pub fn score_store_calls(&self) -> usize {
        self.score_fetches.load(Ordering::SeqCst) + self.score_counts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for FakeStore {
    async fn fetch_id_by_username_safe(&self, username_safe: &str) -> anyhow::Result<Option<i64>> {
        Ok(self.users.get(username_safe).map(|(user_id, _)| *user_id))
    }

    async fn check_password(&self, user_id: i64, password_md5: &str) -> anyhow::Result<bool> {
        self.password_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .values()
            .any(|(id, password)| *id == user_id && password == password_md5))
    }
}

#[async_trait]
impl BeatmapStore for FakeStore {
    async fn fetch_by_md5(&self, beatmap_md5: &str) -> anyhow::Result<Option<Beatmap>> {
        self.beatmap_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .beatmap
            .clone()
            .filter(|beatmap| beatmap.beatmap_md5 == beatmap_md5))
    }
}

#[async_trait]
impl ScoreStore for FakeStore {
    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: usize,
    ) -> anyhow::Result<Vec<LeaderboardScore>> {
        self.score_fetches.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(filter.clone());
        if self.fail_scores {
            anyhow::bail!("connection reset");
        }
        Ok(self.scores.iter().take(limit).cloned().collect())
    }

    async fn fetch_leaderboard_count(&self, filter: &LeaderboardFilter) -> anyhow::Result<i64> {
        self.score_counts.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(filter.clone());
        if self.fail_count {
            anyhow::bail!("lock wait timeout exceeded");
        }
        Ok(self.total_scores)
    }
}

pub fn beatmap_entity(ranked: i8) -> Beatmap {
    Beatmap {
        beatmap_id: 315,
        beatmapset_id: 141,
        beatmap_md5: BEATMAP_MD5.to_owned(),
        song_name: "Lix - Tori no Uta [Insane]".to_owned(),
        ranked,
        rating: 9.0,
    }
}

pub fn score_entity(idx: i64) -> LeaderboardScore {
    LeaderboardScore {
        id: 10_000 + idx,
        score: 5_000_000 - idx * 1000,
        pp: 300.0 - idx as f32,
        max_combo: 700,
        count_50: 0,
        count_100: 4,
        count_300: 500,
        count_miss: 0,
        count_katu: 1,
        count_geki: 90,
        full_combo: true,
        mods: 0,
        time: 1_600_000_000,
        username: format!("player{idx}"),
        userid: 2000 + idx,
    }
}
