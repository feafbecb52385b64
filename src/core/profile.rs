//! Profile provisioning - lazy creation and lookup of per-identity profiles.
//!
//! Identity lives in an external provider, so the first time any operation
//! touches a user we auto-provision an empty, non-seller profile for them.
//! Profiles are never deleted here; removal cascades from identity removal.

use crate::{
    entities::{Profile, profile},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Loads the profile for `user_id`, creating an empty one on first access.
///
/// Generic over the connection so it can run inside a surrounding database
/// transaction (subscription purchase does this).
pub async fn get_or_create_profile<C>(db: &C, user_id: &str) -> Result<profile::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let fresh = profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        student_id: Set(None),
        university: Set(None),
        phone_number: Set(None),
        is_seller: Set(false),
        subscription_active: Set(false),
        subscription_start: Set(None),
        subscription_end: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    fresh.insert(db).await.map_err(Into::into)
}

/// Finds a profile by user id without provisioning one.
pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<profile::Model>> {
    Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}
