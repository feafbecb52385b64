//! Shared test utilities for `CampusMarket`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{catalog, checkout::ContactInfo, profile, subscription},
    entities::{self, subscription::PaymentStatus},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Makes `user_id` a subscribed seller via a completed monthly purchase.
/// Returns the user id for convenient threading through tests.
pub async fn create_test_seller(db: &DatabaseConnection, user_id: &str) -> Result<String> {
    subscription::purchase(
        db,
        user_id,
        "monthly",
        PaymentStatus::Completed,
        Utc::now(),
        None,
        None,
    )
    .await?;
    Ok(user_id.to_string())
}

/// Creates a test category with an empty description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    catalog::create_category(db, name, "").await
}

/// A valid product draft with sensible defaults.
///
/// # Defaults
/// * `title`: "Calculus Textbook"
/// * `price`: 20.0
/// * `condition`: Good
/// * `location`: "Library steps"
pub fn sample_draft(category_id: i64) -> catalog::ProductDraft {
    catalog::ProductDraft {
        title: "Calculus Textbook".to_string(),
        description: "Third edition, light highlighting".to_string(),
        category_id,
        price: 20.0,
        condition: entities::product::Condition::Good,
        location: "Library steps".to_string(),
        seller_phone: None,
        seller_email: None,
        preferred_contact_method: entities::product::ContactMethod::Message,
    }
}

/// Contact details that pass checkout validation.
pub fn contact_fixture() -> ContactInfo {
    ContactInfo {
        buyer_name: "Bob Buyer".to_string(),
        buyer_email: "bob@campus.edu".to_string(),
        buyer_phone: "555-0100".to_string(),
        delivery_address: "Dorm B, room 214".to_string(),
        delivery_notes: None,
    }
}

/// Moves a profile's subscription end `by` into the past, leaving the
/// active flag set, to simulate a lapsed-but-uncorrected subscription.
pub async fn expire_subscription(
    db: &DatabaseConnection,
    user_id: &str,
    by: Duration,
) -> Result<()> {
    let existing = profile::get_or_create_profile(db, user_id).await?;
    let mut active: entities::profile::ActiveModel = existing.into();
    active.subscription_end = Set(Some(Utc::now() - by));
    active.update(db).await?;
    Ok(())
}

/// Sets up a complete test environment with a subscribed seller and a category.
/// Returns (db, `seller_id`, category) for common test scenarios.
pub async fn setup_with_seller() -> Result<(
    DatabaseConnection,
    String,
    entities::category::Model,
)> {
    let db = setup_test_db().await?;
    let seller = create_test_seller(&db, "seller1").await?;
    let category = create_test_category(&db, "Textbooks").await?;
    Ok((db, seller, category))
}

/// Sets up a complete test environment with seller, category, and one listing.
/// Returns (db, `seller_id`, category, product) for product-related tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    String,
    entities::category::Model,
    entities::product::Model,
)> {
    let (db, seller, category) = setup_with_seller().await?;
    let product = catalog::create_product(&db, &seller, sample_draft(category.id)).await?;
    Ok((db, seller, category, product))
}
