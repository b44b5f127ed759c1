use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User row as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&super::model::User> for UserRecord {
    fn from(user: &super::model::User) -> Self {
        Self {
            id: user.id().to_owned(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        }
    }
}
