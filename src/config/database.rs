//! Database configuration module for `CampusMarket`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements from
//! the entity models, ensuring that the database schema matches the Rust struct definitions
//! without requiring manual SQL. Composite uniqueness (one cart item per product, one like
//! per user and product) cannot be expressed on the entities themselves, so the matching
//! unique indexes are created right after the tables.

use crate::entities::{
    Cart, CartItem, Category, Message, Order, OrderItem, Product, ProductLike, ProductView,
    Profile, Subscription,
};
use crate::errors::Result;
use sea_orm::sea_query::{Alias, Index};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/campus_market.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. After the tables, it creates the unique indexes that back the cart-item
/// and like deduplication invariants.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables using SeaORM's schema generation
    db.execute(builder.build(&schema.create_table_from_entity(Profile)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Subscription)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Category)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Product)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Cart)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(CartItem)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Order)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(OrderItem)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Message)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ProductLike)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ProductView)))
        .await?;

    // One cart item row per (cart, product); repeated adds increment quantity
    let cart_item_unique = Index::create()
        .name("ux_cart_items_cart_product")
        .table(Alias::new("cart_items"))
        .col(Alias::new("cart_id"))
        .col(Alias::new("product_id"))
        .unique()
        .to_owned();
    db.execute(builder.build(&cart_item_unique)).await?;

    // One like row per (user, product); concurrent toggles cannot duplicate
    let like_unique = Index::create()
        .name("ux_product_likes_user_product")
        .table(Alias::new("product_likes"))
        .col(Alias::new("user_id"))
        .col(Alias::new("product_id"))
        .unique()
        .to_owned();
    db.execute(builder.build(&like_unique)).await?;

    Ok(())
}
