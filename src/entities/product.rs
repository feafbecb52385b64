//! Product entity - A listing posted by a subscribed seller.
//!
//! Status transitions are explicit seller actions; placing an order does not
//! change a product's status. Visibility in buyer-facing listings is driven
//! by `status == Available`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical condition of the listed item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Condition {
    /// Never used
    #[sea_orm(string_value = "new")]
    New,
    /// Used but indistinguishable from new
    #[sea_orm(string_value = "like_new")]
    LikeNew,
    /// Normal wear
    #[sea_orm(string_value = "good")]
    Good,
    /// Visible wear, fully functional
    #[sea_orm(string_value = "fair")]
    Fair,
    /// Heavy wear or partial defects
    #[sea_orm(string_value = "poor")]
    Poor,
}

/// Listing lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProductStatus {
    /// Visible to buyers and purchasable
    #[sea_orm(string_value = "available")]
    Available,
    /// Sold; hidden from buyer-facing listings
    #[sea_orm(string_value = "sold")]
    Sold,
    /// Held for a specific buyer
    #[sea_orm(string_value = "reserved")]
    Reserved,
}

/// How the seller prefers to be contacted about this listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ContactMethod {
    /// Email only
    #[sea_orm(string_value = "email")]
    Email,
    /// Phone only
    #[sea_orm(string_value = "phone")]
    Phone,
    /// In-app message
    #[sea_orm(string_value = "message")]
    Message,
    /// Any of the above
    #[sea_orm(string_value = "any")]
    Any,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the selling user
    pub seller_id: String,
    /// Listing title
    pub title: String,
    /// Full item description
    pub description: String,
    /// Category the product is listed under
    pub category_id: i64,
    /// Asking price in dollars, always positive
    pub price: f64,
    /// Physical condition of the item
    pub condition: Condition,
    /// Listing lifecycle state
    pub status: ProductStatus,
    /// Where on campus to meet for the handover
    pub location: String,
    /// Contact phone override for this listing
    pub seller_phone: Option<String>,
    /// Contact email override for this listing
    pub seller_email: Option<String>,
    /// Preferred way for buyers to reach the seller
    pub preferred_contact_method: ContactMethod,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product appears in many cart items
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// One product appears in many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// One product is referenced by many messages
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
    /// One product accumulates many likes
    #[sea_orm(has_many = "super::product_like::Entity")]
    Likes,
    /// One product accumulates many views
    #[sea_orm(has_many = "super::product_view::Entity")]
    Views,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::product_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::product_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Views.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
