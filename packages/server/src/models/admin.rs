use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::user;

/// One user row as seen by admins.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            is_banned: user.is_banned,
            created_at: user.created_at,
        }
    }
}

/// Outcome message for ban/unban actions.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BanResponse {
    #[schema(example = "User bob has been banned")]
    pub message: String,
}
