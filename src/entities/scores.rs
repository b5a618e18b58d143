#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardScore {
    pub id: i64,
    pub score: i64,
    pub pp: f32,
    pub max_combo: i32,
    pub count_50: i32,
    pub count_100: i32,
    pub count_300: i32,
    pub count_miss: i32,
    pub count_katu: i32,
    pub count_geki: i32,
    pub full_combo: bool,
    pub mods: i32,
    pub time: i32,
    pub username: String,
    pub userid: i64,
}
