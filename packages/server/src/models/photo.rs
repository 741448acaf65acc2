use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::photo;

/// A photo with its rating stats and resolved owner name.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoResponse {
    /// Photo ID.
    #[schema(example = 7)]
    pub id: i32,
    /// URL the image can be fetched from.
    pub image_url: String,
    /// ID of the uploading user.
    pub user_id: i32,
    /// Username of the uploader, if the owner still exists.
    pub owner_username: Option<String>,
    /// Current Elo rating.
    #[schema(example = 1016.0)]
    pub elo_rating: f64,
    pub wins: i32,
    pub losses: i32,
    pub total_votes: i32,
    pub created_at: DateTime<Utc>,
}

impl PhotoResponse {
    pub fn from_model(model: photo::Model, owner_username: Option<String>) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            user_id: model.user_id,
            owner_username,
            elo_rating: model.elo_rating,
            wins: model.wins,
            losses: model.losses,
            total_votes: model.total_votes,
            created_at: model.created_at,
        }
    }
}

/// Two distinct photos sampled for comparison.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoPairResponse {
    pub photo_a: PhotoResponse,
    pub photo_b: PhotoResponse,
}
