pub mod beatmaps;
pub mod scores;
pub mod users;

#[cfg(test)]
pub mod fakes;
