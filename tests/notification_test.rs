/// Integration tests for broadcast notifications and unread tracking
mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use learnhub::notifications;

#[actix_rt::test]
#[serial]
async fn test_unread_count_lifecycle() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "alice", "alice@example.com", "password123")
        .await
        .expect("Failed to create user");

    assert_eq!(notifications::count_unread(user.id).await.expect("count"), 0);

    notifications::create_notification("Exam schedule", "Finals start Monday.")
        .await
        .expect("create");
    notifications::create_notification("New videos", "Power Systems got three uploads.")
        .await
        .expect("create");

    assert_eq!(notifications::count_unread(user.id).await.expect("count"), 2);

    let listed = notifications::list_and_mark_read(user.id)
        .await
        .expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(notifications::count_unread(user.id).await.expect("count"), 0);

    // A fresh broadcast shows up as exactly one unread.
    notifications::create_notification("Holiday", "Campus closed Friday.")
        .await
        .expect("create");
    assert_eq!(notifications::count_unread(user.id).await.expect("count"), 1);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_listing_is_newest_first() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "bob", "bob@example.com", "password123")
        .await
        .expect("Failed to create user");

    notifications::create_notification("First", "a").await.expect("create");
    notifications::create_notification("Second", "b").await.expect("create");

    let listed = notifications::list_and_mark_read(user.id)
        .await
        .expect("list");
    assert_eq!(listed[0].title, "Second");
    assert_eq!(listed[1].title, "First");

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_reading_is_per_user() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let reader = create_test_user(db, "cara", "cara@example.com", "password123")
        .await
        .expect("Failed to create user");
    let other = create_test_user(db, "dave", "dave@example.com", "password123")
        .await
        .expect("Failed to create user");

    notifications::create_notification("Broadcast", "For everyone.")
        .await
        .expect("create");

    notifications::list_and_mark_read(reader.id).await.expect("list");

    assert_eq!(notifications::count_unread(reader.id).await.expect("count"), 0);
    assert_eq!(notifications::count_unread(other.id).await.expect("count"), 1);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_delete_clears_read_rows_and_count() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "erin", "erin@example.com", "password123")
        .await
        .expect("Failed to create user");

    let id = notifications::create_notification("Temp", "Will be deleted.")
        .await
        .expect("create");
    notifications::list_and_mark_read(user.id).await.expect("list");

    notifications::delete_notification(id).await.expect("delete");

    // The count never goes negative once the read rows are gone.
    assert_eq!(notifications::count_unread(user.id).await.expect("count"), 0);
    assert!(notifications::list_all().await.expect("list").is_empty());

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_blank_edit_keeps_stored_values() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let id = notifications::create_notification("Original", "Body text.")
        .await
        .expect("create");

    notifications::update_notification(id, "", "Updated body.")
        .await
        .expect("update");

    let listed = notifications::list_all().await.expect("list");
    assert_eq!(listed[0].title, "Original");
    assert_eq!(listed[0].body, "Updated body.");

    cleanup_test_data(db).await.expect("Failed to cleanup");
}
