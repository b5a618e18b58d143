pub mod beatmaps;
pub mod gamemodes;
pub mod scores;
pub mod users;
