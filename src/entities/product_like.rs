//! Product like entity - An engagement fact, one per (user, product).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product like database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_likes")]
pub struct Model {
    /// Unique identifier for the like
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the liking user
    pub user_id: String,
    /// Liked product
    pub product_id: i64,
    /// When the like was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ProductLike and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each like belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
