use crate::entities::gamemodes::Scoring;
use crate::entities::scores::LeaderboardScore as LeaderboardScoreEntity;
use crate::models::mods::Mods;

/// `completed` value of a player's best submitted score on a beatmap.
pub const BEST_SCORE_STATUS: i8 = 3;

#[derive(Debug, Clone)]
pub struct LeaderboardScore {
    pub score_id: i64,
    /// Total score or pp, whichever the leaderboard is ordered by.
    pub ranking_value: f64,
    pub max_combo: i32,
    pub count_50: i32,
    pub count_100: i32,
    pub count_300: i32,
    pub count_miss: i32,
    pub count_katu: i32,
    pub count_geki: i32,
    pub full_combo: bool,
    pub mods: Mods,
    pub time: i32,
    pub username: String,
    pub user_id: i64,
}

impl LeaderboardScore {
    pub fn from_entity(value: LeaderboardScoreEntity, scoring: Scoring) -> Self {
        let ranking_value = match scoring {
            Scoring::Score => value.score as f64,
            Scoring::Performance => value.pp as f64,
        };
        Self {
            ranking_value,
            score_id: value.id,
            max_combo: value.max_combo,
            count_50: value.count_50,
            count_100: value.count_100,
            count_300: value.count_300,
            count_miss: value.count_miss,
            count_katu: value.count_katu,
            count_geki: value.count_geki,
            full_combo: value.full_combo,
            mods: Mods::from_client(value.mods),
            time: value.time,
            username: value.username,
            user_id: value.userid,
        }
    }

    /// Renders the score as one leaderboard line. The client reads these
    /// fields by position, so their order is fixed:
    /// `id|name|score|combo|50|100|300|miss|katu|geki|fc|mods|user_id|rank|time|has_replay`
    pub fn format(&self, placement: usize) -> String {
        let ranking_value = self.ranking_value.round_ties_even() as i64;
        format!(
            "{}|{}|{ranking_value}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{placement}|{}|1",
            self.score_id,
            self.username,
            self.max_combo,
            self.count_50,
            self.count_100,
            self.count_300,
            self.count_miss,
            self.count_katu,
            self.count_geki,
            self.full_combo as u8,
            self.mods.bits(),
            self.user_id,
            self.time,
        )
    }
}
