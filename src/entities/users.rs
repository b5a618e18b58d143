use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub password_md5: String,
}
