//! Student/admin messaging.
//!
//! The message log is flat and append-only. The student-facing unread
//! indicator is a boolean derived from the latest admin message id against
//! the user's stored marker; the admin-facing per-thread indicator is the
//! same comparison against the persisted `admin_message_reads` marker.
//! Both stay booleans, never counts.

use crate::db::get_db_pool;
use crate::orm::messages::{SENDER_ADMIN, SENDER_STUDENT};
use crate::orm::{admin_message_reads, messages, users};
use sea_orm::{entity::*, query::*, DbErr, Set};
use std::collections::HashMap;

/// One student's slice of the log, as shown on the admin dashboard.
#[derive(Clone, Debug)]
pub struct MessageThread {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub messages: Vec<messages::Model>,
    pub latest_student_id: i32,
    pub new: bool,
}

async fn append(user: &users::Model, text: &str, sender: &str) -> Result<i32, DbErr> {
    let result = messages::Entity::insert(messages::ActiveModel {
        user_id: Set(user.id),
        user_name: Set(user.name.clone()),
        user_email: Set(user.email.clone()),
        text: Set(text.to_owned()),
        sender: Set(sender.to_owned()),
        ..Default::default()
    })
    .exec(get_db_pool())
    .await?;

    Ok(result.last_insert_id)
}

pub async fn send_student_message(user: &users::Model, text: &str) -> Result<i32, DbErr> {
    append(user, text, SENDER_STUDENT).await
}

pub async fn send_admin_reply(user: &users::Model, text: &str) -> Result<i32, DbErr> {
    append(user, text, SENDER_ADMIN).await
}

/// Full thread for one student, newest first.
pub async fn messages_for_user(user_id: i32) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::UserId.eq(user_id))
        .order_by_desc(messages::Column::Id)
        .all(get_db_pool())
        .await
}

async fn latest_admin_message_id(user_id: i32) -> Result<Option<i32>, DbErr> {
    Ok(messages::Entity::find()
        .filter(messages::Column::UserId.eq(user_id))
        .filter(messages::Column::Sender.eq(SENDER_ADMIN))
        .order_by_desc(messages::Column::Id)
        .one(get_db_pool())
        .await?
        .map(|message| message.id))
}

/// True when the latest admin reply postdates the user's seen marker.
pub async fn has_unread_admin_reply(user: &users::Model) -> Result<bool, DbErr> {
    match latest_admin_message_id(user.id).await? {
        Some(latest) => Ok(latest > user.last_seen_admin_message_id),
        None => Ok(false),
    }
}

/// Advance the user's marker to the latest admin message. Called as a side
/// effect of viewing the contact thread.
pub async fn mark_admin_replies_seen(user: &users::Model) -> Result<(), DbErr> {
    let latest = match latest_admin_message_id(user.id).await? {
        Some(latest) if latest > user.last_seen_admin_message_id => latest,
        _ => return Ok(()),
    };

    let mut active: users::ActiveModel = user.clone().into();
    active.last_seen_admin_message_id = Set(latest);
    active.update(get_db_pool()).await?;
    Ok(())
}

/// Group the flat log by student email, preserving newest-first order
/// within each thread. Pure so the grouping is unit-testable.
pub fn group_by_student(
    log: Vec<messages::Model>,
    seen: &HashMap<i32, i32>,
) -> Vec<MessageThread> {
    let mut order: Vec<String> = Vec::new();
    let mut threads: HashMap<String, MessageThread> = HashMap::new();

    for message in log {
        let key = message.user_email.clone();
        let thread = threads.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            MessageThread {
                user_id: message.user_id,
                name: message.user_name.clone(),
                email: message.user_email.clone(),
                messages: Vec::new(),
                latest_student_id: 0,
                new: false,
            }
        });

        if message.sender == SENDER_STUDENT && message.id > thread.latest_student_id {
            thread.latest_student_id = message.id;
        }
        thread.messages.push(message);
    }

    let mut result: Vec<MessageThread> = order
        .into_iter()
        .filter_map(|email| threads.remove(&email))
        .collect();

    for thread in &mut result {
        let last_seen = seen.get(&thread.user_id).copied().unwrap_or(0);
        thread.new = thread.latest_student_id > last_seen;
    }

    result
}

/// Threads for the admin dashboard, flagged against the persisted seen
/// markers.
pub async fn admin_threads() -> Result<Vec<MessageThread>, DbErr> {
    let db = get_db_pool();

    let log = messages::Entity::find()
        .order_by_desc(messages::Column::Id)
        .all(db)
        .await?;

    let seen: HashMap<i32, i32> = admin_message_reads::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.user_id, row.last_seen_message_id))
        .collect();

    Ok(group_by_student(log, &seen))
}

/// Advance the admin's marker for one student to the given message id.
pub async fn mark_thread_seen(user_id: i32, message_id: i32) -> Result<(), DbErr> {
    let db = get_db_pool();

    match admin_message_reads::Entity::find_by_id(user_id).one(db).await? {
        Some(existing) => {
            if message_id > existing.last_seen_message_id {
                let mut active: admin_message_reads::ActiveModel = existing.into();
                active.last_seen_message_id = Set(message_id);
                active.update(db).await?;
            }
        }
        None => {
            admin_message_reads::Entity::insert(admin_message_reads::ActiveModel {
                user_id: Set(user_id),
                last_seen_message_id: Set(message_id),
            })
            .exec(db)
            .await?;
        }
    }

    Ok(())
}

/// Viewing the dashboard counts as seeing every thread on it.
pub async fn mark_threads_seen(threads: &[MessageThread]) -> Result<(), DbErr> {
    for thread in threads {
        if thread.latest_student_id > 0 {
            mark_thread_seen(thread.user_id, thread.latest_student_id).await?;
        }
    }
    Ok(())
}

/// Advance one student's marker to their latest student-authored message.
pub async fn mark_latest_student_seen(user_id: i32) -> Result<(), DbErr> {
    let latest = messages::Entity::find()
        .filter(messages::Column::UserId.eq(user_id))
        .filter(messages::Column::Sender.eq(SENDER_STUDENT))
        .order_by_desc(messages::Column::Id)
        .one(get_db_pool())
        .await?;

    if let Some(message) = latest {
        mark_thread_seen(user_id, message.id).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i32, user_id: i32, email: &str, sender: &str) -> messages::Model {
        messages::Model {
            id,
            user_id,
            user_name: format!("user{}", user_id),
            user_email: email.to_owned(),
            text: "hello".to_owned(),
            sender: sender.to_owned(),
        }
    }

    #[test]
    fn grouping_splits_by_email() {
        let log = vec![
            message(3, 2, "b@example.com", SENDER_STUDENT),
            message(2, 1, "a@example.com", SENDER_ADMIN),
            message(1, 1, "a@example.com", SENDER_STUDENT),
        ];

        let threads = group_by_student(log, &HashMap::new());
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].email, "b@example.com");
        assert_eq!(threads[1].messages.len(), 2);
    }

    #[test]
    fn latest_student_id_ignores_admin_messages() {
        let log = vec![
            message(5, 1, "a@example.com", SENDER_ADMIN),
            message(4, 1, "a@example.com", SENDER_STUDENT),
        ];

        let threads = group_by_student(log, &HashMap::new());
        assert_eq!(threads[0].latest_student_id, 4);
    }

    #[test]
    fn thread_is_new_only_past_the_marker() {
        let log = vec![message(7, 1, "a@example.com", SENDER_STUDENT)];

        let mut seen = HashMap::new();
        seen.insert(1, 7);
        assert!(!group_by_student(log.clone(), &seen)[0].new);

        seen.insert(1, 6);
        assert!(group_by_student(log, &seen)[0].new);
    }

    #[test]
    fn admin_only_thread_is_not_new() {
        let log = vec![message(9, 1, "a@example.com", SENDER_ADMIN)];
        let threads = group_by_student(log, &HashMap::new());
        assert_eq!(threads[0].latest_student_id, 0);
        assert!(!threads[0].new);
    }
}
