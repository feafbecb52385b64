//! Cart item entity - A (product, quantity) pair inside a cart.
//!
//! A unique index on (`cart_id`, `product_id`) guarantees one row per product
//! per cart; repeated adds increment `quantity` instead of duplicating.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the cart item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Cart this item belongs to
    pub cart_id: i64,
    /// Product being accumulated
    pub product_id: i64,
    /// How many units, always at least 1
    pub quantity: i32,
    /// When the item was first added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between CartItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cart item belongs to one cart
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id",
        on_delete = "Cascade"
    )]
    Cart,
    /// Each cart item references one product; a deleted product drops out
    /// of every cart
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
