//! Order item entity - One product line inside an order.
//!
//! `price` and `seller_id` are copied from the product at order time and
//! never re-read from the live product afterwards, so each line carries its
//! own seller-of-record and price snapshot independently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this item belongs to
    pub order_id: i64,
    /// Product that was purchased
    pub product_id: i64,
    /// Seller-of-record, copied from the product at order time
    pub seller_id: String,
    /// How many units were purchased
    pub quantity: i32,
    /// Price per unit at order time, never re-derived
    pub price: f64,
    /// `quantity * price`
    pub total: f64,
    /// When the order item was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    /// Each order item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
