use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded comparison outcome. Rows are append-only: never updated,
/// deleted only when a referenced photo is deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub voter_user_id: i32,
    #[sea_orm(belongs_to, from = "voter_user_id", to = "id")]
    pub voter: HasOne<super::user::Entity>,

    pub winner_photo_id: i32,
    #[sea_orm(belongs_to, from = "winner_photo_id", to = "id", relation_enum = "WinnerPhoto")]
    pub winner_photo: HasOne<super::photo::Entity>,

    pub loser_photo_id: i32,
    #[sea_orm(belongs_to, from = "loser_photo_id", to = "id", relation_enum = "LoserPhoto")]
    pub loser_photo: HasOne<super::photo::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
