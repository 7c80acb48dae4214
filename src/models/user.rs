use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A user row as stored in the `users` table, keyed by email.
///
/// The password is only ever held as a bcrypt hash; this type is never
/// serialized into a response.
#[derive(Debug, FromRow)]
pub struct User {
    pub email: String,
    pub user_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
