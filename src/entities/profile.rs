//! Profile entity - Per-identity marketplace profile.
//!
//! Identity itself lives in an external provider; this table keys off the
//! opaque `user_id` string and carries the seller-subscription state that the
//! access gate reads. A profile is auto-provisioned on first access and only
//! removed when the identity is removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity reference, one profile per user
    #[sea_orm(unique)]
    pub user_id: String,
    /// Campus student id, if the user provided one
    pub student_id: Option<String>,
    /// University the user belongs to
    pub university: Option<String>,
    /// Contact phone number shown to buyers by default
    pub phone_number: Option<String>,
    /// Whether the user has ever purchased a seller subscription
    pub is_seller: bool,
    /// Whether the seller subscription is currently active.
    /// When true, `subscription_end` is always set.
    pub subscription_active: bool,
    /// Start of the current subscription window
    pub subscription_start: Option<DateTimeUtc>,
    /// End of the current subscription window
    pub subscription_end: Option<DateTimeUtc>,
    /// When the profile was created
    pub created_at: DateTimeUtc,
    /// When the profile was last modified
    pub updated_at: DateTimeUtc,
}

/// Profiles reference external identities only; no table relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
