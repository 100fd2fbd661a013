/// Integration tests for student/admin messaging and unread markers
mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use learnhub::messaging;

#[actix_rt::test]
#[serial]
async fn test_admin_reply_flags_student_unread() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "alice", "alice@example.com", "password123")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    messaging::send_student_message(&user, "When is the exam?")
        .await
        .expect("send");
    assert!(!messaging::has_unread_admin_reply(&user).await.expect("flag"));

    messaging::send_admin_reply(&user, "Next Monday.")
        .await
        .expect("reply");
    assert!(messaging::has_unread_admin_reply(&user).await.expect("flag"));

    messaging::mark_admin_replies_seen(&user).await.expect("seen");
    let user = get_user(db, user.id).await.expect("user");
    assert!(!messaging::has_unread_admin_reply(&user).await.expect("flag"));

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_thread_is_flagged_until_admin_views() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "bob", "bob@example.com", "password123")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    messaging::send_student_message(&user, "Notes for topic 3 are missing.")
        .await
        .expect("send");

    let threads = messaging::admin_threads().await.expect("threads");
    assert_eq!(threads.len(), 1);
    assert!(threads[0].new);

    // Rendering the dashboard advances the markers.
    messaging::mark_threads_seen(&threads).await.expect("seen");
    let threads = messaging::admin_threads().await.expect("threads");
    assert!(!threads[0].new);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_new_student_message_reflags_thread() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "cara", "cara@example.com", "password123")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    messaging::send_student_message(&user, "First question.")
        .await
        .expect("send");
    messaging::mark_latest_student_seen(user.id).await.expect("seen");

    let threads = messaging::admin_threads().await.expect("threads");
    assert!(!threads[0].new);

    messaging::send_student_message(&user, "Follow-up question.")
        .await
        .expect("send");
    let threads = messaging::admin_threads().await.expect("threads");
    assert!(threads[0].new);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_admin_reply_does_not_flag_admin_side() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "dave", "dave@example.com", "password123")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    messaging::send_student_message(&user, "Question.").await.expect("send");
    messaging::mark_latest_student_seen(user.id).await.expect("seen");
    messaging::send_admin_reply(&user, "Answer.").await.expect("reply");

    // The admin's own reply never counts as a new student message.
    let threads = messaging::admin_threads().await.expect("threads");
    assert!(!threads[0].new);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_thread_holds_both_senders_newest_first() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "erin", "erin@example.com", "password123")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    messaging::send_student_message(&user, "Hello.").await.expect("send");
    messaging::send_admin_reply(&user, "Hi there.").await.expect("reply");

    let thread = messaging::messages_for_user(user.id).await.expect("thread");
    assert_eq!(thread.len(), 2);
    assert!(thread[0].is_from_admin());
    assert!(!thread[1].is_from_admin());

    cleanup_test_data(db).await.expect("Failed to cleanup");
}
