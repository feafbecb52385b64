//! Product view entity - An engagement fact, deduplicated per viewer.
//!
//! Authenticated views key on `user_id`; anonymous views key on `ip_address`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product view database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_views")]
pub struct Model {
    /// Unique identifier for the view
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity of the viewer, None for anonymous views
    pub user_id: Option<String>,
    /// Viewed product
    pub product_id: i64,
    /// Client IP the view came from
    pub ip_address: String,
    /// When the view was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ProductView and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each view belongs to one product
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
