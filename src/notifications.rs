//! Broadcast notifications.
//!
//! Announcements are written once by the admin and visible to every
//! student. Read state is a per-user membership table; the unread count is
//! always derived as total minus rows read, never stored.

use crate::db::get_db_pool;
use crate::orm::{notification_reads, notifications};
use sea_orm::{entity::*, query::*, DbErr, Set};

/// Create a broadcast. Returns the new notification id.
pub async fn create_notification(title: &str, body: &str) -> Result<i32, DbErr> {
    let result = notifications::Entity::insert(notifications::ActiveModel {
        title: Set(title.to_owned()),
        body: Set(body.to_owned()),
        ..Default::default()
    })
    .exec(get_db_pool())
    .await?;

    Ok(result.last_insert_id)
}

/// Unread count = total notifications minus rows this user has read,
/// floored at zero.
pub async fn count_unread(user_id: i32) -> Result<i64, DbErr> {
    let db = get_db_pool();

    let total = notifications::Entity::find().count(db).await? as i64;
    let read = notification_reads::Entity::find()
        .filter(notification_reads::Column::UserId.eq(user_id))
        .count(db)
        .await? as i64;

    Ok((total - read).max(0))
}

/// List every notification newest first, and mark each unread one read in
/// the same request. Reading is fused with listing; there is no separate
/// mark-read step for students.
pub async fn list_and_mark_read(user_id: i32) -> Result<Vec<notifications::Model>, DbErr> {
    let db = get_db_pool();

    let items = notifications::Entity::find()
        .order_by_desc(notifications::Column::Id)
        .all(db)
        .await?;

    let read_ids: std::collections::HashSet<i32> = notification_reads::Entity::find()
        .filter(notification_reads::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.notification_id)
        .collect();

    for item in &items {
        if !read_ids.contains(&item.id) {
            notification_reads::Entity::insert(notification_reads::ActiveModel {
                user_id: Set(user_id),
                notification_id: Set(item.id),
                ..Default::default()
            })
            .exec(db)
            .await?;
        }
    }

    Ok(items)
}

/// List without touching read state, for the admin dashboard.
pub async fn list_all() -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .order_by_desc(notifications::Column::Id)
        .all(get_db_pool())
        .await
}

/// Blank fields leave the stored value untouched.
pub async fn update_notification(id: i32, title: &str, body: &str) -> Result<(), DbErr> {
    if title.is_empty() && body.is_empty() {
        return Ok(());
    }

    let db = get_db_pool();
    let existing = match notifications::Entity::find_by_id(id).one(db).await? {
        Some(model) => model,
        None => return Ok(()),
    };

    let mut active: notifications::ActiveModel = existing.into();
    if !title.is_empty() {
        active.title = Set(title.to_owned());
    }
    if !body.is_empty() {
        active.body = Set(body.to_owned());
    }
    active.update(db).await?;
    Ok(())
}

/// Delete a broadcast along with every per-user read row.
pub async fn delete_notification(id: i32) -> Result<(), DbErr> {
    let db = get_db_pool();

    notification_reads::Entity::delete_many()
        .filter(notification_reads::Column::NotificationId.eq(id))
        .exec(db)
        .await?;
    notifications::Entity::delete_many()
        .filter(notifications::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(())
}
