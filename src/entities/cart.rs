//! Cart entity - One mutable basket per identity.
//!
//! Carts are ephemeral: a successful checkout empties them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    /// Unique identifier for the cart
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the cart owner, one cart per user
    #[sea_orm(unique)]
    pub user_id: String,
    /// When the cart was created
    pub created_at: DateTimeUtc,
    /// When the cart was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Cart and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cart has many items
    #[sea_orm(has_many = "super::cart_item::Entity")]
    Items,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
