use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::users::safe_username;
use crate::repositories::users::UserStore;
use tracing::warn;

/// Resolves the requesting user and checks their password hash.
/// Returns the user id on success.
pub async fn authenticate<C: UserStore>(
    ctx: &C,
    username: &str,
    password_md5: &str,
) -> ServiceResult<i64> {
    let username_safe = safe_username(username);
    let user_id = match ctx.fetch_id_by_username_safe(&username_safe).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            warn!(%username_safe, "Leaderboard request from unknown user");
            return Err(AppError::UsersNotFound);
        }
        Err(e) => return unexpected(e),
    };

    match ctx.check_password(user_id, password_md5).await {
        Ok(true) => Ok(user_id),
        Ok(false) => {
            warn!(user_id, "Leaderboard request with invalid credentials");
            Err(AppError::SessionsInvalidCredentials)
        }
        Err(e) => unexpected(e),
    }
}
