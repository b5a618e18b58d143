pub mod beatmaps;
pub mod leaderboards;
pub mod mods;
pub mod privileges;
pub mod scores;
pub mod users;
