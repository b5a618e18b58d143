use crate::entities::beatmaps::Beatmap as BeatmapEntity;

#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RankedStatus {
    NotSubmitted = -1,
    Pending = 0,
    UpdateAvailable = 1,
    Ranked = 2,
    Approved = 3,
    Qualified = 4,
    Loved = 5,
}

impl From<i8> for RankedStatus {
    fn from(value: i8) -> Self {
        match value {
            -1 => Self::NotSubmitted,
            1 => Self::UpdateAvailable,
            2 => Self::Ranked,
            3 => Self::Approved,
            4 => Self::Qualified,
            5 => Self::Loved,
            _ => Self::Pending,
        }
    }
}

impl RankedStatus {
    pub fn has_leaderboard(&self) -> bool {
        *self >= RankedStatus::Ranked
    }
}

#[derive(Debug, Clone)]
pub struct Beatmap {
    pub beatmap_id: i32,
    pub beatmapset_id: i32,
    pub beatmap_md5: String,
    pub song_name: String,
    pub ranked_status: RankedStatus,
    pub rating: f64,
}

impl From<BeatmapEntity> for Beatmap {
    fn from(entity: BeatmapEntity) -> Self {
        Self {
            beatmap_id: entity.beatmap_id,
            beatmapset_id: entity.beatmapset_id,
            beatmap_md5: entity.beatmap_md5,
            song_name: entity.song_name,
            ranked_status: RankedStatus::from(entity.ranked),
            rating: entity.rating,
        }
    }
}

impl Beatmap {
    pub fn has_leaderboard(&self) -> bool {
        self.ranked_status.has_leaderboard()
    }

    /// Header block preceding the score lines.
    ///
    /// Maps without a leaderboard get a single line, everything else gets
    /// the summary line followed by offset, title and rating.
    /// The `false` field marks personal best pinning, which is never offered.
    pub fn leaderboard_header(&self, score_count: u64) -> String {
        let status = self.ranked_status as i8;
        if !self.has_leaderboard() {
            return format!("{status}|false");
        }

        // rating is written with `{:?}` so whole numbers keep their `.0`
        format!(
            "{status}|false|{}|{}|{score_count}\n0\n{}\n{:?}",
            self.beatmap_id, self.beatmapset_id, self.song_name, self.rating,
        )
    }
}
