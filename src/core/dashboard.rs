//! Seller dashboard statistics.
//!
//! Count queries backing the seller's overview page; rendering lives in the
//! excluded web layer.

use crate::{
    core::access::can_post_products,
    entities::{
        Message, Product, ProductLike, ProductView, message,
        product::{self, ProductStatus},
        product_like, product_view,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, prelude::*};

/// Aggregate numbers for a seller's dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellerStats {
    /// All listings the seller has ever created
    pub total_products: u64,
    /// Listings currently available
    pub active_products: u64,
    /// Listings marked sold
    pub sold_products: u64,
    /// Unread messages addressed to the seller
    pub unread_messages: u64,
    /// Likes across all of the seller's listings
    pub total_likes: u64,
    /// Distinct viewers across all of the seller's listings
    pub total_views: u64,
}

/// Computes dashboard statistics for a seller.
///
/// Gated like every other seller surface: callers should redirect denied
/// users into the subscription purchase flow.
pub async fn seller_stats(db: &DatabaseConnection, seller_id: &str) -> Result<SellerStats> {
    if !can_post_products(db, seller_id).await? {
        return Err(Error::Forbidden {
            reason: "An active seller subscription is required for the dashboard".to_string(),
        });
    }

    let total_products = Product::find()
        .filter(product::Column::SellerId.eq(seller_id))
        .count(db)
        .await?;
    let active_products = Product::find()
        .filter(product::Column::SellerId.eq(seller_id))
        .filter(product::Column::Status.eq(ProductStatus::Available))
        .count(db)
        .await?;
    let sold_products = Product::find()
        .filter(product::Column::SellerId.eq(seller_id))
        .filter(product::Column::Status.eq(ProductStatus::Sold))
        .count(db)
        .await?;
    let unread_messages = Message::find()
        .filter(message::Column::RecipientId.eq(seller_id))
        .filter(message::Column::IsRead.eq(false))
        .count(db)
        .await?;

    let product_ids: Vec<i64> = Product::find()
        .filter(product::Column::SellerId.eq(seller_id))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let (total_likes, total_views) = if product_ids.is_empty() {
        (0, 0)
    } else {
        let likes = ProductLike::find()
            .filter(product_like::Column::ProductId.is_in(product_ids.clone()))
            .count(db)
            .await?;
        let views = ProductView::find()
            .filter(product_view::Column::ProductId.is_in(product_ids))
            .count(db)
            .await?;
        (likes, views)
    };

    Ok(SellerStats {
        total_products,
        active_products,
        sold_products,
        unread_messages,
        total_likes,
        total_views,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::{create_product, update_status};
    use crate::core::messaging::{record_view, send_message, toggle_like};
    use crate::entities::message::MessageType;
    use crate::test_utils::{sample_draft, setup_test_db, setup_with_seller};

    #[tokio::test]
    async fn test_dashboard_requires_subscription() -> Result<()> {
        let db = setup_test_db().await?;

        let result = seller_stats(&db, "freeloader").await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { reason: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_seller_stats_counts() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;

        let p1 = create_product(&db, &seller, sample_draft(category.id)).await?;
        let p2 = create_product(&db, &seller, sample_draft(category.id)).await?;
        update_status(&db, &seller, p2.id, ProductStatus::Sold).await?;

        send_message(
            &db,
            "buyer1",
            &seller,
            Some(p1.id),
            MessageType::Inquiry,
            "Still available?",
            "Hi!",
            None,
        )
        .await?;
        toggle_like(&db, "buyer1", p1.id).await?;
        toggle_like(&db, "buyer2", p1.id).await?;
        record_view(&db, Some("buyer1"), "10.0.0.1", p1.id).await?;
        record_view(&db, None, "10.0.0.2", p2.id).await?;

        let stats = seller_stats(&db, &seller).await?;
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.active_products, 1);
        assert_eq!(stats.sold_products, 1);
        assert_eq!(stats.unread_messages, 1);
        assert_eq!(stats.total_likes, 2);
        assert_eq!(stats.total_views, 2);

        Ok(())
    }
}
