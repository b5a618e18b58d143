pub mod leaderboards;

pub async fn index() -> &'static str {
    "Running score-service v0.1"
}
