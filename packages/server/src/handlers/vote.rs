use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{photo, vote};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::vote::{VoteRequest, VoteResponse};
use crate::rating;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/vote",
    tag = "Vote",
    operation_id = "castVote",
    summary = "Record a pairwise comparison outcome",
    description = "Applies an Elo update to both photos and appends a vote to the ledger. \
        Both photos must exist and be distinct.",
    request_body = VoteRequest,
    responses(
        (status = 201, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Winner and loser are the same photo (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Referenced photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(voter = auth_user.user_id, winner = payload.winner_photo_id, loser = payload.loser_photo_id))]
pub async fn cast_vote(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<VoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.winner_photo_id == payload.loser_photo_id {
        return Err(AppError::Validation(
            "Winner and loser must be different photos".into(),
        ));
    }

    let txn = state.db.begin().await?;

    let (winner, loser) =
        lock_vote_pair(&txn, payload.winner_photo_id, payload.loser_photo_id).await?;

    let (new_winner_rating, new_loser_rating) = rating::rate(winner.elo_rating, loser.elo_rating);

    let mut winner_active = winner.clone().into_active_model();
    winner_active.elo_rating = Set(new_winner_rating);
    winner_active.wins = Set(winner.wins + 1);
    winner_active.total_votes = Set(winner.total_votes + 1);
    winner_active.update(&txn).await?;

    let mut loser_active = loser.clone().into_active_model();
    loser_active.elo_rating = Set(new_loser_rating);
    loser_active.losses = Set(loser.losses + 1);
    loser_active.total_votes = Set(loser.total_votes + 1);
    loser_active.update(&txn).await?;

    let vote = vote::ActiveModel {
        voter_user_id: Set(auth_user.user_id),
        winner_photo_id: Set(winner.id),
        loser_photo_id: Set(loser.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(VoteResponse::from(vote))))
}

/// Lock both photos FOR UPDATE and return them as (winner, loser).
///
/// Locks are always acquired in ascending photo-id order so that two votes
/// touching the same pair in opposite roles cannot deadlock.
async fn lock_vote_pair(
    txn: &DatabaseTransaction,
    winner_id: i32,
    loser_id: i32,
) -> Result<(photo::Model, photo::Model), AppError> {
    let (first_id, second_id) = if winner_id < loser_id {
        (winner_id, loser_id)
    } else {
        (loser_id, winner_id)
    };

    let first = find_photo_for_update(txn, first_id).await?;
    let second = find_photo_for_update(txn, second_id).await?;

    if first.id == winner_id {
        Ok((first, second))
    } else {
        Ok((second, first))
    }
}

async fn find_photo_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<photo::Model, AppError> {
    photo::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))
}
