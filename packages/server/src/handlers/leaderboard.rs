use std::collections::HashMap;

use axum::{Json, extract::Query, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{photo, user};
use crate::error::{AppError, ErrorBody};
use crate::models::leaderboard::{LeaderboardEntry, LeaderboardQuery};
use crate::state::AppState;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Leaderboard",
    operation_id = "leaderboard",
    summary = "Ranked photos by Elo rating",
    description = "Photos with at least one vote, ordered by rating descending. \
        Ranks are global (offset-adjusted), 1-based.",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Leaderboard page", body = [LeaderboardEntry]),
        (status = 400, description = "Malformed query parameters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(limit = query.limit, offset = query.offset))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let limit = Ord::min(query.limit.unwrap_or(DEFAULT_LIMIT), MAX_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let photos = photo::Entity::find()
        .filter(photo::Column::TotalVotes.gt(0))
        .order_by_desc(photo::Column::EloRating)
        .order_by_asc(photo::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(&state.db)
        .await?;

    let usernames = resolve_usernames(&state.db, &photos).await?;

    Ok(Json(build_entries(photos, &usernames, offset)))
}

/// Batch-resolve uploader usernames for a page of photos.
async fn resolve_usernames(
    db: &DatabaseConnection,
    photos: &[photo::Model],
) -> Result<HashMap<i32, String>, AppError> {
    let mut owner_ids: Vec<i32> = photos.iter().map(|p| p.user_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users: Vec<(i32, String)> = user::Entity::find()
        .filter(user::Column::Id.is_in(owner_ids))
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Username)
        .into_tuple()
        .all(db)
        .await?;

    Ok(users.into_iter().collect())
}

/// Assemble ranked entries. Ranks continue across pages: the first entry of a
/// page at offset N gets rank N+1.
fn build_entries(
    photos: Vec<photo::Model>,
    usernames: &HashMap<i32, String>,
    offset: u64,
) -> Vec<LeaderboardEntry> {
    photos
        .into_iter()
        .enumerate()
        .map(|(i, p)| LeaderboardEntry {
            rank: offset + i as u64 + 1,
            id: p.id,
            image_url: p.image_url,
            elo_rating: p.elo_rating,
            wins: p.wins,
            losses: p.losses,
            total_votes: p.total_votes,
            owner_username: usernames
                .get(&p.user_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string()),
        })
        .collect()
}
