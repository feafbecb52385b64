//! Order entity - An immutable multi-seller order produced by checkout.
//!
//! Contact and delivery fields are snapshots taken at checkout time. Only the
//! two status fields may change after creation; pricing fields are frozen.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fulfilment state of an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatus {
    /// Created, awaiting seller confirmation
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed by the seller(s)
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Being prepared for handover
    #[sea_orm(string_value = "processing")]
    Processing,
    /// On its way to the buyer
    #[sea_orm(string_value = "shipped")]
    Shipped,
    /// Received by the buyer
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Cancelled before completion
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Payment state of an order; supplied by the external payment flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentStatus {
    /// Not yet paid
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Paid in full
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Payment attempt failed
    #[sea_orm(string_value = "failed")]
    Failed,
    /// Payment refunded
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short random token identifying the order to humans, unique
    #[sea_orm(unique)]
    pub order_number: String,
    /// External identity of the buyer
    pub buyer_id: String,
    /// Buyer name as entered at checkout
    pub buyer_name: String,
    /// Buyer email as entered at checkout
    pub buyer_email: String,
    /// Buyer phone as entered at checkout
    pub buyer_phone: String,
    /// Where on campus to deliver or meet
    pub delivery_address: String,
    /// Free-form delivery notes
    pub delivery_notes: Option<String>,
    /// Fulfilment state
    pub status: OrderStatus,
    /// Payment state
    pub payment_status: PaymentStatus,
    /// Sum of item totals at checkout time
    pub subtotal: f64,
    /// Shipping cost; always 0.00 for campus pickup
    pub shipping_cost: f64,
    /// `subtotal + shipping_cost`
    pub total_amount: f64,
    /// When the order was created
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
