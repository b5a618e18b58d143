use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;

pub const BASIC_ERROR: &str = "error: no";
pub const PASSWORD_ERROR: &str = "error: pass";

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[track_caller]
pub fn store_unavailable<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("The score store failed at {caller}: {}", e.into());
    Err(AppError::StoreUnavailable)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unexpected,
    DecodingRequestFailed,
    UnsupportedClientVersion,
    StoreUnavailable,

    BeatmapsInvalidChecksum,
    BeatmapsNotFound,

    UsersNotFound,

    SessionsInvalidCredentials,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::DecodingRequestFailed => "decoding_request_failed",
            AppError::UnsupportedClientVersion => "unsupported_client_version",
            AppError::StoreUnavailable => "store_unavailable",

            AppError::BeatmapsInvalidChecksum => "beatmaps.invalid_checksum",
            AppError::BeatmapsNotFound => "beatmaps.not_found",

            AppError::UsersNotFound => "users.not_found",

            AppError::SessionsInvalidCredentials => "sessions.invalid_credentials",
        }
    }

    /// The body the osu! client expects in place of a leaderboard.
    /// Unknown users share the credential literal so the two can't be told apart.
    pub const fn legacy_body(&self) -> &'static str {
        match self {
            AppError::UsersNotFound | AppError::SessionsInvalidCredentials => PASSWORD_ERROR,

            AppError::Unexpected
            | AppError::DecodingRequestFailed
            | AppError::UnsupportedClientVersion
            | AppError::StoreUnavailable
            | AppError::BeatmapsInvalidChecksum
            | AppError::BeatmapsNotFound => BASIC_ERROR,
        }
    }
}
