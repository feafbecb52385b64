//! Product catalog - listing lifecycle, validation, and categories.
//!
//! Creation and editing are gated by [`crate::core::access::can_post_products`]
//! and validate every field before returning, collecting all problems into a
//! single [`Error::Validation`] so a form can show them at once. Status
//! transitions (available / sold / reserved) are explicit seller actions;
//! checkout never changes a product's status.

use crate::{
    config::categories::CategoryConfig,
    core::access::can_post_products,
    entities::{
        Category, Product, category,
        product::{self, Condition, ContactMethod, ProductStatus},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Caller-supplied fields for creating or editing a product listing.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Listing title
    pub title: String,
    /// Full item description
    pub description: String,
    /// Category to list under; must exist
    pub category_id: i64,
    /// Asking price in dollars; must be positive
    pub price: f64,
    /// Physical condition of the item
    pub condition: Condition,
    /// Where on campus to meet
    pub location: String,
    /// Contact phone override
    pub seller_phone: Option<String>,
    /// Contact email override
    pub seller_email: Option<String>,
    /// Preferred contact method
    pub preferred_contact_method: ContactMethod,
}

/// Collects every field problem in a draft; empty vec means valid.
async fn validate_draft(db: &DatabaseConnection, draft: &ProductDraft) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("Title cannot be empty".to_string());
    }
    if draft.description.trim().is_empty() {
        errors.push("Description cannot be empty".to_string());
    }
    if Category::find_by_id(draft.category_id).one(db).await?.is_none() {
        errors.push(format!("Category {} does not exist", draft.category_id));
    }
    if !(draft.price.is_finite() && draft.price > 0.0) {
        errors.push("Price must be a positive number".to_string());
    }
    if draft.location.trim().is_empty() {
        errors.push("Meeting location cannot be empty".to_string());
    }

    Ok(errors)
}

/// Creates a new listing for `seller_id`, starting as `Available`.
///
/// # Errors
/// Returns [`Error::Forbidden`] when the seller fails the access gate and
/// [`Error::Validation`] with every collected field problem otherwise.
pub async fn create_product(
    db: &DatabaseConnection,
    seller_id: &str,
    draft: ProductDraft,
) -> Result<product::Model> {
    if !can_post_products(db, seller_id).await? {
        return Err(Error::Forbidden {
            reason: "An active seller subscription is required to post products".to_string(),
        });
    }

    let errors = validate_draft(db, &draft).await?;
    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    let now = chrono::Utc::now();
    let model = product::ActiveModel {
        seller_id: Set(seller_id.to_string()),
        title: Set(draft.title.trim().to_string()),
        description: Set(draft.description.trim().to_string()),
        category_id: Set(draft.category_id),
        price: Set(draft.price),
        condition: Set(draft.condition),
        status: Set(ProductStatus::Available),
        location: Set(draft.location.trim().to_string()),
        seller_phone: Set(draft.seller_phone),
        seller_email: Set(draft.seller_email),
        preferred_contact_method: Set(draft.preferred_contact_method),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(product_id = created.id, seller_id, "product listed");
    Ok(created)
}

/// Replaces an existing listing's fields with a new draft.
///
/// Only the owning seller may edit, and only while passing the access gate.
pub async fn update_product(
    db: &DatabaseConnection,
    seller_id: &str,
    product_id: i64,
    draft: ProductDraft,
) -> Result<product::Model> {
    if !can_post_products(db, seller_id).await? {
        return Err(Error::Forbidden {
            reason: "An active seller subscription is required to edit products".to_string(),
        });
    }

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if existing.seller_id != seller_id {
        return Err(Error::Forbidden {
            reason: "Only the listing seller may edit it".to_string(),
        });
    }

    let errors = validate_draft(db, &draft).await?;
    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    let mut active: product::ActiveModel = existing.into();
    active.title = Set(draft.title.trim().to_string());
    active.description = Set(draft.description.trim().to_string());
    active.category_id = Set(draft.category_id);
    active.price = Set(draft.price);
    active.condition = Set(draft.condition);
    active.location = Set(draft.location.trim().to_string());
    active.seller_phone = Set(draft.seller_phone);
    active.seller_email = Set(draft.seller_email);
    active.preferred_contact_method = Set(draft.preferred_contact_method);
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await.map_err(Into::into)
}

/// Moves a listing to a new lifecycle status.
///
/// Marking a product sold is a deliberate seller action; placing an order
/// does not do this automatically.
pub async fn update_status(
    db: &DatabaseConnection,
    seller_id: &str,
    product_id: i64,
    status: ProductStatus,
) -> Result<product::Model> {
    if !can_post_products(db, seller_id).await? {
        return Err(Error::Forbidden {
            reason: "An active seller subscription is required to edit products".to_string(),
        });
    }

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if existing.seller_id != seller_id {
        return Err(Error::Forbidden {
            reason: "Only the listing seller may change its status".to_string(),
        });
    }

    let mut active: product::ActiveModel = existing.into();
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All currently purchasable listings, newest first.
pub async fn available_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::Status.eq(ProductStatus::Available))
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All of a seller's listings regardless of status, newest first.
pub async fn products_by_seller(
    db: &DatabaseConnection,
    seller_id: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::SellerId.eq(seller_id))
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a category with a unique name.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            errors: vec!["Category name cannot be empty".to_string()],
        });
    }

    let model = category::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// All categories, ordered by name.
pub async fn all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Seeds categories from configuration, skipping names that already exist.
pub async fn seed_categories(
    db: &DatabaseConnection,
    configs: &[CategoryConfig],
) -> Result<usize> {
    let mut created = 0;
    for config in configs {
        let exists = Category::find()
            .filter(category::Column::Name.eq(config.name.as_str()))
            .one(db)
            .await?
            .is_some();
        if !exists {
            create_category(db, &config.name, &config.description).await?;
            created += 1;
        }
    }
    if created > 0 {
        info!(created, "seeded categories");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        create_test_seller, sample_draft, setup_test_db, setup_with_seller,
    };

    #[tokio::test]
    async fn test_create_product_requires_subscription() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_category(&db, "Textbooks", "").await?;

        let result = create_product(&db, "freeloader", sample_draft(category.id)).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { reason: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_collects_all_validation_errors() -> Result<()> {
        let (db, seller, _category) = setup_with_seller().await?;

        let draft = ProductDraft {
            title: "  ".to_string(),
            description: String::new(),
            category_id: 9999,
            price: -5.0,
            condition: Condition::Good,
            location: String::new(),
            seller_phone: None,
            seller_email: None,
            preferred_contact_method: ContactMethod::Message,
        };

        let result = create_product(&db, &seller, draft).await;
        match result.unwrap_err() {
            Error::Validation { errors } => {
                // Every problem is reported together: title, description,
                // category, price, location
                assert_eq!(errors.len(), 5);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_price() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;

        let mut draft = sample_draft(category.id);
        draft.price = 0.0;

        let result = create_product(&db, &seller, draft).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { errors: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_new_product_starts_available() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;

        let product = create_product(&db, &seller, sample_draft(category.id)).await?;
        assert_eq!(product.status, ProductStatus::Available);
        assert_eq!(product.seller_id, seller);
        assert_eq!(product.price, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_owner_only() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;

        // A second subscribed seller still cannot edit someone else's listing
        let other = create_test_seller(&db, "other_seller").await?;
        let result = update_product(&db, &other, product.id, sample_draft(category.id)).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { reason: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_replaces_fields() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;

        let mut draft = sample_draft(category.id);
        draft.title = "Calculus II, annotated".to_string();
        draft.price = 12.5;

        let updated = update_product(&db, &seller, product.id, draft).await?;
        assert_eq!(updated.title, "Calculus II, annotated");
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.id, product.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_is_explicit_and_owner_only() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;

        let sold = update_status(&db, &seller, product.id, ProductStatus::Sold).await?;
        assert_eq!(sold.status, ProductStatus::Sold);

        let result = update_status(&db, "stranger", product.id, ProductStatus::Available).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { reason: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_available_products_excludes_sold_and_reserved() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;

        let visible = create_product(&db, &seller, sample_draft(category.id)).await?;
        let sold = create_product(&db, &seller, sample_draft(category.id)).await?;
        update_status(&db, &seller, sold.id, ProductStatus::Sold).await?;
        let reserved = create_product(&db, &seller, sample_draft(category.id)).await?;
        update_status(&db, &seller, reserved.id, ProductStatus::Reserved).await?;

        let listed = available_products(&db).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, visible.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_categories_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let configs = vec![
            CategoryConfig {
                name: "Textbooks".to_string(),
                description: "Course books".to_string(),
            },
            CategoryConfig {
                name: "Electronics".to_string(),
                description: String::new(),
            },
        ];

        assert_eq!(seed_categories(&db, &configs).await?, 2);
        assert_eq!(seed_categories(&db, &configs).await?, 0);
        assert_eq!(all_categories(&db).await?.len(), 2);

        Ok(())
    }
}
