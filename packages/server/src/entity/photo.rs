use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Content hash of the stored image blob (opaque storage reference).
    pub storage_key: String,
    pub image_url: String,
    pub content_type: String,

    /// Elo rating, unbounded. New photos start at 1000.0.
    pub elo_rating: f64,
    pub wins: i32,
    pub losses: i32,
    /// Always equals `wins + losses`.
    pub total_votes: i32,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub owner: HasOne<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
