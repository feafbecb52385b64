//! Subscription entity - A single seller-subscription purchase.
//!
//! `amount` and `end_date` are pure functions of the plan tag and start date,
//! derived in [`crate::core::subscription`] and never supplied by callers.
//! Rows are immutable after creation except for `payment_status`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The plan tag drives both the billing amount and the validity window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PlanTag {
    /// 30 days for $10
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// 90 days for $25
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// 365 days for $90
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

/// Payment state reported by the external payment flow; opaque to this crate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentStatus {
    /// Payment initiated but not confirmed
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Payment confirmed; activates the seller profile
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Payment rejected
    #[sea_orm(string_value = "failed")]
    Failed,
    /// Payment refunded after completion
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier for the subscription
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the purchasing user
    pub user_id: String,
    /// Which plan was purchased
    pub plan: PlanTag,
    /// Billing amount in dollars, derived from the plan
    pub amount: f64,
    /// Payment state, the only mutable field
    pub payment_status: PaymentStatus,
    /// Start of the validity window
    pub start_date: DateTimeUtc,
    /// End of the validity window, derived from plan and start date
    pub end_date: DateTimeUtc,
    /// How the user paid (free-form, from the payment flow)
    pub payment_method: Option<String>,
    /// External payment transaction reference
    pub transaction_id: Option<String>,
    /// When the subscription was created
    pub created_at: DateTimeUtc,
    /// When the subscription was last modified
    pub updated_at: DateTimeUtc,
}

/// Subscriptions reference external identities only; no table relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
