//! Category entity - Product categories, seeded from config.toml.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across categories
    #[sea_orm(unique)]
    pub name: String,
    /// Optional longer description
    pub description: String,
    /// When the category was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
