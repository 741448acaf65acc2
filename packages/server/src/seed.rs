use anyhow::Context;
use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::user;
use crate::utils::hash;

/// Create the configured bootstrap admin account if it does not exist yet.
///
/// Idempotent: if a user with the configured username already exists it is
/// left untouched, even if its admin flag differs.
pub async fn seed_bootstrap_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let Some(admin) = &auth.bootstrap_admin else {
        return Ok(());
    };

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(&admin.username))
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash::hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("failed to hash bootstrap admin password: {e}"))?;

    user::ActiveModel {
        username: Set(admin.username.clone()),
        email: Set(admin.email.trim().to_lowercase()),
        password: Set(password_hash),
        is_admin: Set(true),
        is_banned: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .context("failed to insert bootstrap admin")?;

    info!("Seeded bootstrap admin user '{}'", admin.username);
    Ok(())
}
