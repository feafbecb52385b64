//! Access gate - the single authorization checkpoint for seller actions.
//!
//! Product creation and editing, the seller dashboard, and seller messaging
//! views all funnel through [`can_post_products`]. The decision itself is the
//! pure function [`evaluate`], which returns the verdict plus an optional
//! correction to persist; the async wrapper applies the correction
//! best-effort so the read path never depends on a write succeeding.

use crate::{
    core::profile::get_or_create_profile,
    entities::profile,
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use tracing::warn;

/// A profile fix the caller should persist after evaluating the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The subscription window has lapsed; clear `subscription_active`
    DeactivateSubscription,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the user may currently act as a seller
    pub allowed: bool,
    /// A profile correction observed during evaluation, if any
    pub correction: Option<Correction>,
}

/// Pure gate decision for a profile at a given instant.
///
/// Denies when the user is not a seller, when the subscription flag is off,
/// or when the subscription window has lapsed. The lapsed case additionally
/// reports a [`Correction`] so the stale flag can be repaired.
pub fn evaluate(profile: &profile::Model, now: DateTime<Utc>) -> Verdict {
    if !profile.is_seller || !profile.subscription_active {
        return Verdict {
            allowed: false,
            correction: None,
        };
    }

    if let Some(end) = profile.subscription_end {
        if end < now {
            return Verdict {
                allowed: false,
                correction: Some(Correction::DeactivateSubscription),
            };
        }
    }

    Verdict {
        allowed: true,
        correction: None,
    }
}

/// Whether `user_id` may currently post products.
///
/// Loads the profile (provisioning one on first access), evaluates the gate,
/// and applies any expiry correction best-effort: a failed write-back is
/// logged and swallowed, and the computed verdict is returned either way.
/// Callers are expected to redirect denied users into the subscription
/// purchase flow rather than fail loudly.
pub async fn can_post_products(db: &DatabaseConnection, user_id: &str) -> Result<bool> {
    let profile = get_or_create_profile(db, user_id).await?;
    let verdict = evaluate(&profile, Utc::now());

    if verdict.correction == Some(Correction::DeactivateSubscription) {
        let mut stale: profile::ActiveModel = profile.into();
        stale.subscription_active = Set(false);
        stale.updated_at = Set(Utc::now());
        if let Err(e) = stale.update(db).await {
            // The verdict must not depend on this write; a renewal racing
            // with us will simply overwrite the flag again.
            warn!(user_id, error = %e, "failed to persist subscription expiry");
        }
    }

    Ok(verdict.allowed)
}
