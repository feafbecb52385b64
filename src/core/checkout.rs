//! Checkout - atomic conversion of a cart into an immutable multi-seller order.
//!
//! The whole sequence - totals, order number, order row, item rows, cart
//! clearing - runs inside one database transaction. Any failure rolls back
//! completely, leaving the cart and the order tables exactly as they were, so
//! a retry is always safe. Each order item copies the product's price and
//! seller at this instant and never re-reads them.

use crate::{
    core::cart::items_with_products,
    entities::{
        Cart, CartItem, Order, OrderItem, cart, cart_item,
        order::{self, OrderStatus, PaymentStatus},
        order_item,
    },
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Contact and delivery details captured at checkout.
#[derive(Debug, Clone)]
pub struct ContactInfo {
    /// Buyer display name
    pub buyer_name: String,
    /// Buyer email
    pub buyer_email: String,
    /// Buyer phone number
    pub buyer_phone: String,
    /// Where on campus to deliver or meet
    pub delivery_address: String,
    /// Free-form notes for the seller(s)
    pub delivery_notes: Option<String>,
}

/// How many order-number generation attempts before giving up.
const ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// Unambiguous uppercase alphanumerics (no 0/O, 1/I/L).
const ORDER_NUMBER_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generates a short random order token, e.g. `ORD-7KQ2MWXR`.
fn generate_order_number() -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..ORDER_NUMBER_CHARSET.len());
            ORDER_NUMBER_CHARSET[idx] as char
        })
        .collect();
    format!("ORD-{token}")
}

/// Picks an order number not yet present in the orders table.
///
/// Generation is probabilistic but uniqueness is a hard invariant, so each
/// candidate is checked and regenerated on collision.
async fn unique_order_number<C>(db: &C) -> Result<String>
where
    C: ConnectionTrait,
{
    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let candidate = generate_order_number();
        let taken = Order::find()
            .filter(order::Column::OrderNumber.eq(candidate.as_str()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(candidate);
        }
    }
    Err(Error::OrderNumberConflict {
        attempts: ORDER_NUMBER_ATTEMPTS,
    })
}

/// Collects missing required contact fields; empty vec means valid.
fn validate_contact(contact: &ContactInfo) -> Vec<String> {
    let mut errors = Vec::new();
    if contact.buyer_name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if contact.buyer_email.trim().is_empty() {
        errors.push("Email is required".to_string());
    }
    if contact.buyer_phone.trim().is_empty() {
        errors.push("Phone number is required".to_string());
    }
    if contact.delivery_address.trim().is_empty() {
        errors.push("Delivery address is required".to_string());
    }
    errors
}

/// Converts the buyer's cart into an order.
///
/// # Errors
/// - [`Error::EmptyCart`] when the buyer has no cart or no items
/// - [`Error::Validation`] listing every missing contact field
/// - [`Error::ProductNotFound`] when an item's product vanished mid-checkout
/// - [`Error::OrderNumberConflict`] when token generation kept colliding
///
/// On any error the transaction rolls back: no order rows persist and the
/// cart keeps its items.
pub async fn checkout(
    db: &DatabaseConnection,
    buyer_id: &str,
    contact: ContactInfo,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let cart = Cart::find()
        .filter(cart::Column::UserId.eq(buyer_id))
        .one(&txn)
        .await?
        .ok_or(Error::EmptyCart)?;

    let items = items_with_products(&txn, cart.id).await?;
    if items.is_empty() {
        return Err(Error::EmptyCart);
    }

    let errors = validate_contact(&contact);
    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    // Freeze pricing at this instant
    let subtotal: f64 = items
        .iter()
        .map(|(item, product)| f64::from(item.quantity) * product.price)
        .sum();
    let shipping_cost = 0.0; // campus pickup only
    let total_amount = subtotal + shipping_cost;

    let order_number = unique_order_number(&txn).await?;
    let now = chrono::Utc::now();

    let order = order::ActiveModel {
        order_number: Set(order_number),
        buyer_id: Set(buyer_id.to_string()),
        buyer_name: Set(contact.buyer_name.trim().to_string()),
        buyer_email: Set(contact.buyer_email.trim().to_string()),
        buyer_phone: Set(contact.buyer_phone.trim().to_string()),
        delivery_address: Set(contact.delivery_address.trim().to_string()),
        delivery_notes: Set(contact.delivery_notes),
        status: Set(OrderStatus::Pending),
        payment_status: Set(PaymentStatus::Pending),
        subtotal: Set(subtotal),
        shipping_cost: Set(shipping_cost),
        total_amount: Set(total_amount),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let order = order.insert(&txn).await?;

    for (item, product) in &items {
        let line_total = f64::from(item.quantity) * product.price;
        let line = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(product.id),
            seller_id: Set(product.seller_id.clone()),
            quantity: Set(item.quantity),
            price: Set(product.price),
            total: Set(line_total),
            created_at: Set(now),
            ..Default::default()
        };
        line.insert(&txn).await?;
    }

    CartItem::delete_many()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(
        order_number = %order.order_number,
        buyer_id,
        total = order.total_amount,
        "order placed"
    );
    Ok(order)
}

/// All of a buyer's orders, newest first.
pub async fn orders_for_buyer(
    db: &DatabaseConnection,
    buyer_id: &str,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::BuyerId.eq(buyer_id))
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// An order together with its item lines.
pub async fn get_order_with_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<(order::Model, Vec<order_item::Model>)>> {
    let Some(order) = Order::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await?;
    Ok(Some((order, items)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::access::can_post_products;
    use crate::core::cart::{add_item, get_or_create_cart, items_with_products};
    use crate::core::catalog::{available_products, create_product, update_product};
    use crate::core::subscription::purchase;
    use crate::entities::Product;
    use crate::entities::product::ProductStatus;
    use crate::entities::subscription::PaymentStatus as SubscriptionPayment;
    use crate::test_utils::{
        contact_fixture, create_test_seller, sample_draft, setup_with_seller,
    };
    use chrono::Utc;

    #[tokio::test]
    async fn test_checkout_empty_cart() -> Result<()> {
        let (db, _seller, _category) = setup_with_seller().await?;

        // No cart at all
        let result = checkout(&db, "buyer1", contact_fixture()).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyCart));

        // A cart with zero items behaves the same
        get_or_create_cart(&db, "buyer1").await?;
        let result = checkout(&db, "buyer1", contact_fixture()).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyCart));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_collects_missing_contact_fields() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;
        add_item(&db, "buyer1", product.id, 1).await?;

        let contact = ContactInfo {
            buyer_name: String::new(),
            buyer_email: String::new(),
            buyer_phone: "555-0100".to_string(),
            delivery_address: "  ".to_string(),
            delivery_notes: None,
        };

        match checkout(&db, "buyer1", contact).await.unwrap_err() {
            Error::Validation { errors } => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }

        // The failed checkout left the cart untouched and created no orders
        let cart = get_or_create_cart(&db, "buyer1").await?;
        assert_eq!(items_with_products(&db, cart.id).await?.len(), 1);
        assert!(orders_for_buyer(&db, "buyer1").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_snapshots_prices_and_clears_cart() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;

        let mut draft = sample_draft(category.id);
        draft.price = 10.0;
        let p1 = create_product(&db, &seller, draft).await?;
        let mut draft = sample_draft(category.id);
        draft.price = 5.0;
        let p2 = create_product(&db, &seller, draft).await?;

        add_item(&db, "buyer1", p1.id, 2).await?;
        add_item(&db, "buyer1", p2.id, 1).await?;

        let order = checkout(&db, "buyer1", contact_fixture()).await?;
        assert_eq!(order.subtotal, 25.0);
        assert_eq!(order.shipping_cost, 0.0);
        assert_eq!(order.total_amount, 25.0);
        assert_eq!(order.status, OrderStatus::Pending);

        let (_, items) = get_order_with_items(&db, order.id).await?.unwrap();
        assert_eq!(items.len(), 2);
        let line1 = items.iter().find(|i| i.product_id == p1.id).unwrap();
        assert_eq!(line1.price, 10.0);
        assert_eq!(line1.quantity, 2);
        assert_eq!(line1.total, 20.0);
        let line2 = items.iter().find(|i| i.product_id == p2.id).unwrap();
        assert_eq!(line2.price, 5.0);
        assert_eq!(line2.total, 5.0);

        // Cart is now empty
        let cart = get_or_create_cart(&db, "buyer1").await?;
        assert!(items_with_products(&db, cart.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_order_item_price_survives_later_price_change() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;
        add_item(&db, "buyer1", product.id, 1).await?;

        let order = checkout(&db, "buyer1", contact_fixture()).await?;

        let mut draft = sample_draft(category.id);
        draft.price = 99.0;
        update_product(&db, &seller, product.id, draft).await?;

        let (_, items) = get_order_with_items(&db, order.id).await?.unwrap();
        assert_eq!(items[0].price, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_multi_seller_fan_out() -> Result<()> {
        let (db, seller_a, category) = setup_with_seller().await?;
        let seller_b = create_test_seller(&db, "seller_b").await?;

        let pa = create_product(&db, &seller_a, sample_draft(category.id)).await?;
        let pb = create_product(&db, &seller_b, sample_draft(category.id)).await?;

        add_item(&db, "buyer1", pa.id, 1).await?;
        add_item(&db, "buyer1", pb.id, 1).await?;

        let order = checkout(&db, "buyer1", contact_fixture()).await?;
        let (_, items) = get_order_with_items(&db, order.id).await?.unwrap();

        // One order, but each line carries its own seller-of-record
        let line_a = items.iter().find(|i| i.product_id == pa.id).unwrap();
        let line_b = items.iter().find(|i| i.product_id == pb.id).unwrap();
        assert_eq!(line_a.seller_id, seller_a);
        assert_eq!(line_b.seller_id, seller_b);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_numbers_are_unique_tokens() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;

        add_item(&db, "buyer1", product.id, 1).await?;
        let first = checkout(&db, "buyer1", contact_fixture()).await?;

        add_item(&db, "buyer1", product.id, 1).await?;
        let second = checkout(&db, "buyer1", contact_fixture()).await?;

        assert_ne!(first.order_number, second.order_number);
        assert!(first.order_number.starts_with("ORD-"));
        assert_eq!(first.order_number.len(), 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_product_drops_out_of_cart() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;
        add_item(&db, "buyer1", product.id, 2).await?;

        // Hard-delete the product row; the cart item cascades away
        Product::delete_by_id(product.id).exec(&db).await?;

        let result = checkout(&db, "buyer1", contact_fixture()).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyCart));
        assert!(orders_for_buyer(&db, "buyer1").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_does_not_mark_product_sold() -> Result<()> {
        let (db, seller, category) = setup_with_seller().await?;
        let product = create_product(&db, &seller, sample_draft(category.id)).await?;
        add_item(&db, "buyer1", product.id, 1).await?;

        checkout(&db, "buyer1", contact_fixture()).await?;

        // Status transitions stay an explicit seller action
        let still_listed = Product::find_by_id(product.id).one(&db).await?.unwrap();
        assert_eq!(still_listed.status, ProductStatus::Available);

        Ok(())
    }

    #[tokio::test]
    async fn test_full_marketplace_workflow() -> Result<()> {
        let (db, _seller, category) = setup_with_seller().await?;

        // Step 1: a new user buys a monthly subscription and becomes a seller
        purchase(
            &db,
            "alice",
            "monthly",
            SubscriptionPayment::Completed,
            Utc::now(),
            None,
            Some("txn-777".to_string()),
        )
        .await?;
        assert!(can_post_products(&db, "alice").await?);

        // Step 2: she lists a product, visible as available
        let mut draft = sample_draft(category.id);
        draft.title = "Dorm minifridge".to_string();
        draft.price = 45.0;
        let product = create_product(&db, "alice", draft).await?;
        let listed = available_products(&db).await?;
        assert!(listed.iter().any(|p| p.id == product.id));

        // Step 3: a buyer carts it and checks out
        add_item(&db, "bob", product.id, 1).await?;
        let order = checkout(&db, "bob", contact_fixture()).await?;

        let (order, items) = get_order_with_items(&db, order.id).await?.unwrap();
        assert_eq!(order.buyer_id, "bob");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].seller_id, "alice");
        assert_eq!(items[0].price, 45.0);

        // Step 4: the buyer's cart is empty again
        let cart = get_or_create_cart(&db, "bob").await?;
        assert!(items_with_products(&db, cart.id).await?.is_empty());

        Ok(())
    }
}
