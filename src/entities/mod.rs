//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cart;
pub mod cart_item;
pub mod category;
pub mod message;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_like;
pub mod product_view;
pub mod profile;
pub mod subscription;

// Re-export specific types to avoid conflicts
pub use cart::{Column as CartColumn, Entity as Cart, Model as CartModel};
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use message::{Column as MessageColumn, Entity as Message, Model as MessageModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_like::{
    Column as ProductLikeColumn, Entity as ProductLike, Model as ProductLikeModel,
};
pub use product_view::{
    Column as ProductViewColumn, Entity as ProductView, Model as ProductViewModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use subscription::{
    Column as SubscriptionColumn, Entity as Subscription, Model as SubscriptionModel,
};
