use crate::common::error::{AppError, ServiceResult};
use crate::models::beatmaps::Beatmap;
use crate::models::mods::Mods;
use crate::models::scores::LeaderboardScore;
use axum::Form;
use axum::extract::{FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

/// Fields sent by the client when requesting a beatmap leaderboard.
///
/// Numeric fields are kept as sent and only parsed once the user is
/// authenticated, so a malformed number never hides a credential failure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardArgs {
    #[serde(rename = "us")]
    pub username: String,
    #[serde(rename = "ha")]
    pub password_md5: String,
    #[serde(rename = "c")]
    pub beatmap_md5: String,
    #[serde(default)]
    pub mods: String,
    #[serde(rename = "m", default)]
    pub mode: String,
    #[serde(rename = "v", default)]
    pub client_version: String,
    /// Leaderboard filter selected in the client, accepted but unused.
    #[serde(rename = "vv", default)]
    pub filter: String,
    /// Beatmapset id, accepted but unused.
    #[serde(rename = "i", default)]
    pub beatmapset_id: String,
}

/// The numeric part of [`LeaderboardArgs`] once decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub mods: Mods,
    pub mode: u8,
    pub client_version: i32,
}

impl LeaderboardArgs {
    pub fn decode(&self) -> ServiceResult<LeaderboardQuery> {
        let mods = self
            .mods
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::DecodingRequestFailed)?;
        let mode = self
            .mode
            .trim()
            .parse::<u8>()
            .map_err(|_| AppError::DecodingRequestFailed)?;
        let client_version = self
            .client_version
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::DecodingRequestFailed)?;
        Ok(LeaderboardQuery {
            mods: Mods::from_client(mods),
            mode,
            client_version,
        })
    }
}

impl<S: Send + Sync> FromRequest<S> for LeaderboardArgs {
    type Rejection = LegacyResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // GET requests are read from the query string, POST from the form body
        match Form::<LeaderboardArgs>::from_request(req, state).await {
            Ok(Form(args)) => Ok(args),
            Err(_) => Err(LegacyResponse::error(AppError::DecodingRequestFailed)),
        }
    }
}

/// Everything needed to render one leaderboard response.
pub struct Leaderboard {
    pub beatmap: Beatmap,
    pub score_count: u64,
    pub scores: Vec<LeaderboardScore>,
}

impl Leaderboard {
    pub fn serialize(&self) -> String {
        let mut lines = Vec::with_capacity(self.scores.len() + 2);
        lines.push(self.beatmap.leaderboard_header(self.score_count));
        // personal best slot, never filled
        lines.push(String::new());
        lines.extend(
            self.scores
                .iter()
                .enumerate()
                .map(|(idx, score)| score.format(idx + 1)),
        );
        lines.join("\n")
    }
}

/// Plain text body understood by the osu! client.
/// Always sent with 200, failures are only expressed through the body.
#[derive(Debug)]
pub struct LegacyResponse {
    body: String,
}

impl LegacyResponse {
    pub fn ok(body: String) -> Self {
        Self { body }
    }

    pub fn error(error: AppError) -> Self {
        Self {
            body: error.legacy_body().to_owned(),
        }
    }
}

impl From<AppError> for LegacyResponse {
    fn from(error: AppError) -> Self {
        LegacyResponse::error(error)
    }
}

impl IntoResponse for LegacyResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body,
        )
            .into_response()
    }
}
