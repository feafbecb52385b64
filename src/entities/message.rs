//! Message entity - Directed buyer/seller messages with optional threading.
//!
//! `parent_message_id` forms a reply tree keyed by message id; a reply always
//! points at an older message, so the structure is acyclic by construction.
//! Sender and recipient are independent readers; neither owns the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of message this is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MessageType {
    /// Question about a product
    #[sea_orm(string_value = "inquiry")]
    Inquiry,
    /// Price offer, usually with `offered_price` set
    #[sea_orm(string_value = "offer")]
    Offer,
    /// Anything else
    #[sea_orm(string_value = "general")]
    General,
}

/// Message database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the sender
    pub sender_id: String,
    /// External identity of the recipient
    pub recipient_id: String,
    /// Product the conversation is about, if any
    pub product_id: Option<i64>,
    /// What kind of message this is
    pub message_type: MessageType,
    /// Subject line
    pub subject: String,
    /// Message body
    pub content: String,
    /// Whether the recipient has read it
    pub is_read: bool,
    /// Whether a reply to this message exists
    pub is_replied: bool,
    /// Offered price in dollars, for offers
    pub offered_price: Option<f64>,
    /// Message this one replies to, if any
    pub parent_message_id: Option<i64>,
    /// When the message was created
    pub created_at: DateTimeUtc,
    /// When the message was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Message and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each message may reference one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Each reply points at its parent message
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentMessageId", to = "Column::Id")]
    Parent,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
