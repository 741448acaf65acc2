use serde::{Deserialize, Serialize};

/// Query parameters for the leaderboard.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct LeaderboardQuery {
    /// Page size. Default 20, silently capped at 100.
    pub limit: Option<u64>,
    /// Number of entries to skip. Default 0; past-the-end offsets return an
    /// empty page.
    pub offset: Option<u64>,
}

/// One ranked leaderboard entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based global rank (offset-adjusted).
    #[schema(example = 1)]
    pub rank: u64,
    /// Photo ID.
    pub id: i32,
    pub image_url: String,
    #[schema(example = 1050.0)]
    pub elo_rating: f64,
    pub wins: i32,
    pub losses: i32,
    pub total_votes: i32,
    /// Uploader's username, or `"unknown"` if the owner no longer resolves.
    #[schema(example = "alice_wonder")]
    pub owner_username: String,
}
