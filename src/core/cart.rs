//! Cart aggregation - the per-user mutable basket.
//!
//! A cart holds at most one item row per product; repeated adds increment the
//! quantity. Totals are computed from the *current* product prices, so the
//! displayed amount can drift until checkout freezes it into an order.

use crate::{
    entities::{Cart, CartItem, Product, cart, cart_item, product},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Loads the user's cart, creating an empty one on first access.
pub async fn get_or_create_cart<C>(db: &C, user_id: &str) -> Result<cart::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let fresh = cart::ActiveModel {
        user_id: Set(user_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    fresh.insert(db).await.map_err(Into::into)
}

/// Adds `quantity` units of a product to the user's cart.
///
/// If the cart already holds the product, its quantity is incremented;
/// otherwise a new item row is created. Runs in a transaction so the
/// read-increment-write cannot interleave with itself.
///
/// # Errors
/// Returns [`Error::Validation`] for a non-positive quantity and
/// [`Error::ProductNotFound`] when the product does not exist.
pub async fn add_item(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i64,
    quantity: i32,
) -> Result<cart_item::Model> {
    if quantity < 1 {
        return Err(Error::Validation {
            errors: vec!["Quantity must be at least 1".to_string()],
        });
    }

    let txn = db.begin().await?;

    Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let cart = get_or_create_cart(&txn, user_id).await?;

    let existing = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?;

    let item = match existing {
        Some(item) => {
            let new_quantity = item.quantity + quantity;
            let mut active: cart_item::ActiveModel = item.into();
            active.quantity = Set(new_quantity);
            active.update(&txn).await?
        }
        None => {
            let fresh = cart_item::ActiveModel {
                cart_id: Set(cart.id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            fresh.insert(&txn).await?
        }
    };

    txn.commit().await?;
    Ok(item)
}

/// Sets the quantity for a product in the user's cart.
///
/// A quantity of zero or less removes the item. Setting a quantity for a
/// product not yet in the cart adds it.
pub async fn update_quantity(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i64,
    quantity: i32,
) -> Result<Option<cart_item::Model>> {
    let txn = db.begin().await?;

    let cart = get_or_create_cart(&txn, user_id).await?;
    let existing = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?;

    let result = if quantity <= 0 {
        if let Some(item) = existing {
            item.delete(&txn).await?;
        }
        None
    } else {
        match existing {
            Some(item) => {
                let mut active: cart_item::ActiveModel = item.into();
                active.quantity = Set(quantity);
                Some(active.update(&txn).await?)
            }
            None => {
                Product::find_by_id(product_id)
                    .one(&txn)
                    .await?
                    .ok_or(Error::ProductNotFound { id: product_id })?;
                let fresh = cart_item::ActiveModel {
                    cart_id: Set(cart.id),
                    product_id: Set(product_id),
                    quantity: Set(quantity),
                    created_at: Set(chrono::Utc::now()),
                    ..Default::default()
                };
                Some(fresh.insert(&txn).await?)
            }
        }
    };

    txn.commit().await?;
    Ok(result)
}

/// All items in a cart paired with their current product rows.
///
/// Generic over the connection so checkout can read inside its transaction.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if an item's product has vanished.
pub async fn items_with_products<C>(
    db: &C,
    cart_id: i64,
) -> Result<Vec<(cart_item::Model, product::Model)>>
where
    C: ConnectionTrait,
{
    let rows = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .find_also_related(Product)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(item, product)| {
            let id = item.product_id;
            product
                .map(|p| (item, p))
                .ok_or(Error::ProductNotFound { id })
        })
        .collect()
}

/// Total cart price from *current* product prices (not a snapshot).
pub async fn total_price(db: &DatabaseConnection, cart_id: i64) -> Result<f64> {
    let items = items_with_products(db, cart_id).await?;
    Ok(items
        .iter()
        .map(|(item, product)| f64::from(item.quantity) * product.price)
        .sum())
}
