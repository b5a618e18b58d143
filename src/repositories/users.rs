use crate::common::context::Context;
use crate::entities::users::UserCredentials;
use async_trait::async_trait;
use tracing::debug;

const TABLE_NAME: &str = "users";

pub async fn fetch_id_by_username_safe<C: Context>(
    ctx: &C,
    username_safe: &str,
) -> sqlx::Result<Option<i64>> {
    const QUERY: &str = const_str::concat!(
        "SELECT id FROM ",
        TABLE_NAME,
        " WHERE username_safe = ?"
    );
    sqlx::query_scalar(QUERY)
        .bind(username_safe)
        .fetch_optional(ctx.db())
        .await
}

pub async fn fetch_credentials<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<UserCredentials> {
    const QUERY: &str = const_str::concat!(
        "SELECT id, password_md5 FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(user_id)
        .fetch_one(ctx.db())
        .await
}

/// Identity and credential checks for incoming requests.
#[async_trait]
pub trait UserStore: Sync + Send {
    async fn fetch_id_by_username_safe(&self, username_safe: &str) -> anyhow::Result<Option<i64>>;

    /// `password_md5` is the md5 the client sends, stored bcrypt-hashed.
    async fn check_password(&self, user_id: i64, password_md5: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl<C: Context> UserStore for C {
    async fn fetch_id_by_username_safe(&self, username_safe: &str) -> anyhow::Result<Option<i64>> {
        if let Some(user_id) = self.name_cache().get(username_safe) {
            return Ok(Some(user_id));
        }

        // unknown names are not remembered, they may register at any time
        let user_id = fetch_id_by_username_safe(self, username_safe).await?;
        if let Some(user_id) = user_id {
            self.name_cache().insert(username_safe.to_owned(), user_id);
        }
        Ok(user_id)
    }

    async fn check_password(&self, user_id: i64, password_md5: &str) -> anyhow::Result<bool> {
        if self.password_cache().is_verified(user_id, password_md5) {
            return Ok(true);
        }

        let credentials = match fetch_credentials(self, user_id).await {
            Ok(credentials) => credentials,
            Err(sqlx::Error::RowNotFound) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        if !bcrypt::verify(password_md5, &credentials.password_md5)? {
            return Ok(false);
        }

        debug!(user_id, "Caching verified password");
        self.password_cache().insert(user_id, password_md5.to_owned());
        Ok(true)
    }
}
