/// Integration tests for registration lookups and password verification
mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use learnhub::session;
use learnhub::user;

#[actix_rt::test]
#[serial]
async fn test_find_by_email_normalizes_input() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    create_test_user(db, "alice", "alice@example.com", "password123")
        .await
        .expect("Failed to create user");

    let found = user::find_by_email(db, "  ALICE@example.COM  ")
        .await
        .expect("lookup");
    assert!(found.is_some());

    let missing = user::find_by_email(db, "nobody@example.com")
        .await
        .expect("lookup");
    assert!(missing.is_none());

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_stored_hash_verifies_only_the_right_password() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let fixture = create_test_user(db, "bob", "bob@example.com", "hunter2hunter2")
        .await
        .expect("Failed to create user");
    let user = get_user(db, fixture.id).await.expect("user");

    assert!(session::verify_password(&user.password_hash, "hunter2hunter2"));
    assert!(!session::verify_password(&user.password_hash, "wrong-password"));

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_duplicate_email_is_rejected_by_the_schema() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    create_test_user(db, "cara", "cara@example.com", "password123")
        .await
        .expect("Failed to create user");

    let duplicate = create_test_user(db, "imposter", "cara@example.com", "password456").await;
    assert!(duplicate.is_err());

    cleanup_test_data(db).await.expect("Failed to cleanup");
}
