use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::vote;

/// Request body for casting a vote.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct VoteRequest {
    /// ID of the preferred photo.
    #[schema(example = 3)]
    pub winner_photo_id: i32,
    /// ID of the photo voted against.
    #[schema(example = 8)]
    pub loser_photo_id: i32,
}

/// The recorded vote.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VoteResponse {
    /// Vote ID.
    pub id: i32,
    /// ID of the voting user.
    pub voter_user_id: i32,
    pub winner_photo_id: i32,
    pub loser_photo_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<vote::Model> for VoteResponse {
    fn from(model: vote::Model) -> Self {
        Self {
            id: model.id,
            voter_user_id: model.voter_user_id,
            winner_photo_id: model.winner_photo_id,
            loser_photo_id: model.loser_photo_id,
            created_at: model.created_at,
        }
    }
}
