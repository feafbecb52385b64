//! Messaging - directed buyer/seller messages, threads, and engagement facts.
//!
//! Messages form a reply tree via `parent_message_id`. Likes and views are
//! deduplicated engagement facts: one like per (user, product) backed by a
//! unique index, one view per (user-or-ip, product) enforced on the write
//! path.

use crate::{
    entities::{
        Message, Product, ProductLike, ProductView,
        message::{self, MessageType},
        product_like, product_view,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    /// Whether the user likes the product after the toggle
    pub liked: bool,
    /// Current like count for the product
    pub like_count: u64,
}

/// Sends a message from one user to another, optionally about a product.
///
/// # Errors
/// - [`Error::Forbidden`] when sender and recipient are the same user
/// - [`Error::Validation`] collecting empty subject/content
/// - [`Error::ProductNotFound`] when the referenced product is missing
#[allow(clippy::too_many_arguments)]
pub async fn send_message(
    db: &DatabaseConnection,
    sender_id: &str,
    recipient_id: &str,
    product_id: Option<i64>,
    message_type: MessageType,
    subject: &str,
    content: &str,
    offered_price: Option<f64>,
) -> Result<message::Model> {
    if sender_id == recipient_id {
        return Err(Error::Forbidden {
            reason: "You cannot message yourself".to_string(),
        });
    }

    let mut errors = Vec::new();
    if subject.trim().is_empty() {
        errors.push("Subject cannot be empty".to_string());
    }
    if content.trim().is_empty() {
        errors.push("Message content cannot be empty".to_string());
    }
    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    if let Some(id) = product_id {
        Product::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::ProductNotFound { id })?;
    }

    let now = chrono::Utc::now();
    let model = message::ActiveModel {
        sender_id: Set(sender_id.to_string()),
        recipient_id: Set(recipient_id.to_string()),
        product_id: Set(product_id),
        message_type: Set(message_type),
        subject: Set(subject.trim().to_string()),
        content: Set(content.to_string()),
        is_read: Set(false),
        is_replied: Set(false),
        offered_price: Set(offered_price),
        parent_message_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Replies to a message, threading it under the original.
///
/// Only a participant may reply; the reply is addressed to the other party
/// and inherits the original's type and product reference. The original's
/// `is_replied` flag flips in the same transaction as the insert.
pub async fn reply(
    db: &DatabaseConnection,
    original_message_id: i64,
    replier_id: &str,
    subject: &str,
    content: &str,
) -> Result<message::Model> {
    let mut errors = Vec::new();
    if subject.trim().is_empty() {
        errors.push("Subject cannot be empty".to_string());
    }
    if content.trim().is_empty() {
        errors.push("Message content cannot be empty".to_string());
    }
    if !errors.is_empty() {
        return Err(Error::Validation { errors });
    }

    let txn = db.begin().await?;

    let original = Message::find_by_id(original_message_id)
        .one(&txn)
        .await?
        .ok_or(Error::MessageNotFound {
            id: original_message_id,
        })?;

    let recipient_id = if replier_id == original.sender_id {
        original.recipient_id.clone()
    } else if replier_id == original.recipient_id {
        original.sender_id.clone()
    } else {
        return Err(Error::Forbidden {
            reason: "Only a participant may reply to this conversation".to_string(),
        });
    };

    let now = chrono::Utc::now();
    let reply_model = message::ActiveModel {
        sender_id: Set(replier_id.to_string()),
        recipient_id: Set(recipient_id),
        product_id: Set(original.product_id),
        message_type: Set(original.message_type),
        subject: Set(subject.trim().to_string()),
        content: Set(content.to_string()),
        is_read: Set(false),
        is_replied: Set(false),
        offered_price: Set(None),
        parent_message_id: Set(Some(original.id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = reply_model.insert(&txn).await?;

    let mut original: message::ActiveModel = original.into();
    original.is_replied = Set(true);
    original.updated_at = Set(now);
    original.update(&txn).await?;

    txn.commit().await?;
    Ok(created)
}

/// Marks a message read, but only when the viewer is its recipient.
///
/// Anyone else (including the sender) is a silent no-op; the message is
/// returned unchanged.
pub async fn mark_read(
    db: &DatabaseConnection,
    message_id: i64,
    viewer_id: &str,
) -> Result<message::Model> {
    let msg = Message::find_by_id(message_id)
        .one(db)
        .await?
        .ok_or(Error::MessageNotFound { id: message_id })?;

    if msg.recipient_id != viewer_id || msg.is_read {
        return Ok(msg);
    }

    let mut active: message::ActiveModel = msg.into();
    active.is_read = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Marks all of a recipient's unread messages read; returns how many changed.
pub async fn mark_all_read(db: &DatabaseConnection, recipient_id: &str) -> Result<u64> {
    use sea_orm::sea_query::Expr;

    let result = Message::update_many()
        .col_expr(message::Column::IsRead, Expr::value(true))
        .filter(message::Column::RecipientId.eq(recipient_id))
        .filter(message::Column::IsRead.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// All messages addressed to a user, newest first.
pub async fn messages_for_recipient(
    db: &DatabaseConnection,
    recipient_id: &str,
) -> Result<Vec<message::Model>> {
    Message::find()
        .filter(message::Column::RecipientId.eq(recipient_id))
        .order_by_desc(message::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// How many unread messages a user has.
pub async fn unread_count(db: &DatabaseConnection, recipient_id: &str) -> Result<u64> {
    Message::find()
        .filter(message::Column::RecipientId.eq(recipient_id))
        .filter(message::Column::IsRead.eq(false))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Direct replies to a message, oldest first.
pub async fn replies(db: &DatabaseConnection, parent_id: i64) -> Result<Vec<message::Model>> {
    Message::find()
        .filter(message::Column::ParentMessageId.eq(parent_id))
        .order_by_asc(message::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Flips a user's like on a product and reports the new state.
///
/// A unique index on (user, product) guarantees concurrent toggles can never
/// produce duplicate rows.
pub async fn toggle_like(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i64,
) -> Result<LikeStatus> {
    let txn = db.begin().await?;

    Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let existing = ProductLike::find()
        .filter(product_like::Column::UserId.eq(user_id))
        .filter(product_like::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?;

    let liked = match existing {
        Some(like) => {
            like.delete(&txn).await?;
            false
        }
        None => {
            let fresh = product_like::ActiveModel {
                user_id: Set(user_id.to_string()),
                product_id: Set(product_id),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            fresh.insert(&txn).await?;
            true
        }
    };

    let like_count = ProductLike::find()
        .filter(product_like::Column::ProductId.eq(product_id))
        .count(&txn)
        .await?;

    txn.commit().await?;
    Ok(LikeStatus { liked, like_count })
}

/// Records a product view for a user or an anonymous IP.
///
/// The first view by a given viewer creates a fact row; repeats are no-ops.
/// Returns whether a new fact was recorded.
pub async fn record_view(
    db: &DatabaseConnection,
    user_id: Option<&str>,
    ip_address: &str,
    product_id: i64,
) -> Result<bool> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let mut query = ProductView::find().filter(product_view::Column::ProductId.eq(product_id));
    query = match user_id {
        Some(user) => query.filter(product_view::Column::UserId.eq(user)),
        None => query
            .filter(product_view::Column::UserId.is_null())
            .filter(product_view::Column::IpAddress.eq(ip_address)),
    };

    if query.one(db).await?.is_some() {
        return Ok(false);
    }

    let fresh = product_view::ActiveModel {
        user_id: Set(user_id.map(ToString::to_string)),
        product_id: Set(product_id),
        ip_address: Set(ip_address.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    fresh.insert(db).await?;
    Ok(true)
}

/// How many distinct viewers a product has had.
pub async fn view_count(db: &DatabaseConnection, product_id: i64) -> Result<u64> {
    ProductView::find()
        .filter(product_view::Column::ProductId.eq(product_id))
        .count(db)
        .await
        .map_err(Into::into)
}
