pub mod beatmaps;
pub mod leaderboards;
pub mod users;
