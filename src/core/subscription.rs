//! Subscription ledger - purchases, derived billing, and profile activation.
//!
//! The billing amount and validity window are pure functions of the plan tag
//! and start date. `purchase` persists only the derived values; there is no
//! way for a caller to override them. A completed purchase activates the
//! buyer's seller profile in the same database transaction, so the activation
//! side effect can never be skipped or half-applied.

use crate::{
    core::profile::get_or_create_profile,
    entities::{
        Subscription, profile,
        subscription::{self, PaymentStatus, PlanTag},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Billing amount in dollars for a plan.
pub fn plan_amount(plan: PlanTag) -> f64 {
    match plan {
        PlanTag::Monthly => 10.00,
        PlanTag::Quarterly => 25.00,
        PlanTag::Yearly => 90.00,
    }
}

/// Validity window length in days for a plan.
pub const fn plan_duration_days(plan: PlanTag) -> i64 {
    match plan {
        PlanTag::Monthly => 30,
        PlanTag::Quarterly => 90,
        PlanTag::Yearly => 365,
    }
}

/// End of the validity window for a plan anchored at `start`.
pub fn plan_end_date(plan: PlanTag, start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::days(plan_duration_days(plan))
}

/// Parses a caller-supplied plan tag.
///
/// # Errors
/// Returns [`Error::Validation`] when the tag is not one of
/// `monthly`, `quarterly`, `yearly`.
pub fn parse_plan_tag(tag: &str) -> Result<PlanTag> {
    match tag {
        "monthly" => Ok(PlanTag::Monthly),
        "quarterly" => Ok(PlanTag::Quarterly),
        "yearly" => Ok(PlanTag::Yearly),
        other => Err(Error::Validation {
            errors: vec![format!("Unknown subscription plan: {other}")],
        }),
    }
}

/// Records a subscription purchase and, when payment is completed, activates
/// the buyer's seller profile.
///
/// The subscription row is written with the derived amount and end date
/// regardless of anything the payment flow reported; only `payment_status`,
/// `payment_method` and `transaction_id` come from outside. Profile
/// activation happens inside the same transaction as the insert.
///
/// # Errors
/// Returns [`Error::Validation`] for an unrecognized plan tag, otherwise
/// propagates database failures.
pub async fn purchase(
    db: &DatabaseConnection,
    user_id: &str,
    plan_tag: &str,
    payment_status: PaymentStatus,
    start_date: DateTime<Utc>,
    payment_method: Option<String>,
    transaction_id: Option<String>,
) -> Result<subscription::Model> {
    let plan = parse_plan_tag(plan_tag)?;
    let end_date = plan_end_date(plan, start_date);
    let now = Utc::now();

    let txn = db.begin().await?;

    let record = subscription::ActiveModel {
        user_id: Set(user_id.to_string()),
        plan: Set(plan),
        amount: Set(plan_amount(plan)),
        payment_status: Set(payment_status),
        start_date: Set(start_date),
        end_date: Set(end_date),
        payment_method: Set(payment_method),
        transaction_id: Set(transaction_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let record = record.insert(&txn).await?;

    if payment_status == PaymentStatus::Completed {
        let mut active: profile::ActiveModel =
            get_or_create_profile(&txn, user_id).await?.into();
        active.is_seller = Set(true);
        active.subscription_active = Set(true);
        active.subscription_start = Set(Some(start_date));
        active.subscription_end = Set(Some(end_date));
        active.updated_at = Set(now);
        active.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(record)
}

/// Returns the user's most recent completed subscription, if any.
pub async fn current_subscription(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .filter(subscription::Column::PaymentStatus.eq(PaymentStatus::Completed))
        .order_by_desc(subscription::Column::CreatedAt)
        .one(db)
        .await
        .map_err(Into::into)
}
