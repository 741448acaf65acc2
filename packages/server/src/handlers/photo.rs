use axum::{
    Json,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use common::storage::ContentHash;
use sea_orm::*;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::entity::{photo, user, vote};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::photo::{PhotoPairResponse, PhotoResponse};
use crate::rating;
use crate::sampler;
use crate::state::AppState;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Body limit for uploads, slightly above the image size cap to leave room
/// for multipart framing. The store enforces the real cap.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(12 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Photos",
    operation_id = "uploadPhoto",
    summary = "Upload a photo",
    description = "Multipart upload with a single `file` field. Accepted types: \
        image/jpeg, image/png, image/webp, image/gif; max 10 MB. The new photo \
        enters the pool at rating 1000.0 with zero votes.",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo created", body = PhotoResponse),
        (status = 400, description = "Missing file, unsupported type or too large (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Blob store unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::Validation("File content type is required".into()))?
            .to_string();

        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "Unsupported file type {content_type}. Allowed: {}",
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;

        upload = Some((content_type, bytes.to_vec()));
        break;
    }

    let Some((content_type, bytes)) = upload else {
        return Err(AppError::Validation("Missing 'file' field".into()));
    };
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }

    // Blob write happens before any row exists. If it fails, nothing to undo.
    let hash = state.blob_store.put(&bytes).await?;

    let txn = state.db.begin().await?;

    // The image URL embeds the photo id, which is only known after insert.
    let inserted = photo::ActiveModel {
        storage_key: Set(hash.to_hex()),
        image_url: Set(String::new()),
        content_type: Set(content_type),
        elo_rating: Set(rating::INITIAL_RATING),
        wins: Set(0),
        losses: Set(0),
        total_votes: Set(0),
        user_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let image_url = format!(
        "{}/api/v1/photos/{}/image",
        state.config.storage.public_base_url, inserted.id
    );
    let mut active = inserted.into_active_model();
    active.image_url = Set(image_url);
    let photo = active.update(&txn).await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(PhotoResponse::from_model(photo, Some(auth_user.username))),
    ))
}

#[utoipa::path(
    get,
    path = "/my",
    tag = "Photos",
    operation_id = "myPhotos",
    summary = "List the current user's photos, newest first",
    responses(
        (status = 200, description = "Photos owned by the caller", body = [PhotoResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_photos(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PhotoResponse>>, AppError> {
    let photos = photo::Entity::find()
        .filter(photo::Column::UserId.eq(auth_user.user_id))
        .order_by_desc(photo::Column::CreatedAt)
        .order_by_desc(photo::Column::Id)
        .all(&state.db)
        .await?;

    let owner = Some(auth_user.username);
    Ok(Json(
        photos
            .into_iter()
            .map(|p| PhotoResponse::from_model(p, owner.clone()))
            .collect(),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Photos",
    operation_id = "deletePhoto",
    summary = "Delete one of your own photos",
    description = "Removes the photo and every vote that references it. \
        Admins can delete any photo via the admin endpoint.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, photo_id = id))]
pub async fn delete_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let photo = photo::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

    if photo.user_id != auth_user.user_id {
        return Err(AppError::PermissionDenied);
    }

    remove_photo_cascading(&state, photo).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a photo row together with every vote referencing it, then make a
/// best-effort attempt to reclaim the underlying blob.
///
/// The blob is content-addressed and may back other photos, so it is only
/// removed once no remaining row points at the same storage key. A blob store
/// failure here is logged and swallowed; the record deletion already
/// committed.
pub(crate) async fn remove_photo_cascading(
    state: &AppState,
    photo: photo::Model,
) -> Result<(), AppError> {
    let txn = state.db.begin().await?;

    vote::Entity::delete_many()
        .filter(
            Condition::any()
                .add(vote::Column::WinnerPhotoId.eq(photo.id))
                .add(vote::Column::LoserPhotoId.eq(photo.id)),
        )
        .exec(&txn)
        .await?;

    photo::Entity::delete_by_id(photo.id).exec(&txn).await?;

    txn.commit().await?;

    let still_referenced = photo::Entity::find()
        .filter(photo::Column::StorageKey.eq(&photo.storage_key))
        .count(&state.db)
        .await?
        > 0;

    if !still_referenced {
        match ContentHash::from_hex(&photo.storage_key) {
            Ok(hash) => {
                if let Err(e) = state.blob_store.delete(&hash).await {
                    tracing::warn!(
                        photo_id = photo.id,
                        storage_key = %photo.storage_key,
                        "Failed to delete blob after photo removal: {e}"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(photo_id = photo.id, "Unparseable storage key: {e}");
            }
        }
    }

    Ok(())
}

#[utoipa::path(
    get,
    path = "/random-pair",
    tag = "Photos",
    operation_id = "randomPair",
    summary = "Sample two distinct photos for comparison",
    description = "Uniform random pair over the whole pool. Photos with zero \
        votes are just as eligible as veterans.",
    responses(
        (status = 200, description = "A matchup", body = PhotoPairResponse),
        (status = 404, description = "Fewer than two photos exist (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn random_pair(
    State(state): State<AppState>,
) -> Result<Json<PhotoPairResponse>, AppError> {
    let ids: Vec<i32> = photo::Entity::find()
        .select_only()
        .column(photo::Column::Id)
        .into_tuple()
        .all(&state.db)
        .await?;

    let (first, second) = sampler::sample_pair(&mut rand::rng(), ids.len())
        .ok_or_else(|| AppError::NotFound("Not enough photos for a matchup".into()))?;
    let (id_a, id_b) = (ids[first], ids[second]);

    let photos = photo::Entity::find()
        .filter(photo::Column::Id.is_in([id_a, id_b]))
        .all(&state.db)
        .await?;

    // A photo may vanish between the id snapshot and the fetch.
    let mut photo_a = None;
    let mut photo_b = None;
    for p in photos {
        if p.id == id_a {
            photo_a = Some(p);
        } else if p.id == id_b {
            photo_b = Some(p);
        }
    }
    let (photo_a, photo_b) = match (photo_a, photo_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(AppError::NotFound("Not enough photos for a matchup".into())),
    };

    let owner_a = resolve_owner_username(&state.db, photo_a.user_id).await?;
    let owner_b = resolve_owner_username(&state.db, photo_b.user_id).await?;

    Ok(Json(PhotoPairResponse {
        photo_a: PhotoResponse::from_model(photo_a, owner_a),
        photo_b: PhotoResponse::from_model(photo_b, owner_b),
    }))
}

async fn resolve_owner_username(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<String>, AppError> {
    let username = user::Entity::find_by_id(user_id)
        .select_only()
        .column(user::Column::Username)
        .into_tuple()
        .one(db)
        .await?;
    Ok(username)
}

#[utoipa::path(
    get,
    path = "/{id}/image",
    tag = "Photos",
    operation_id = "photoImage",
    summary = "Fetch a photo's image bytes",
    description = "Streams the stored image. Supports ETag caching via If-None-Match.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Image content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Photo or image not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(photo_id = id))]
pub async fn photo_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let photo = photo::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

    let etag_value = format!("\"{}\"", photo.storage_key);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let hash = ContentHash::from_hex(&photo.storage_key)?;
    let size = state.blob_store.size(&hash).await?;
    let reader = state.blob_store.get_stream(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &photo.content_type)
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}
