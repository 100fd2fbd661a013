/// Integration tests for schema creation and seed idempotence
mod common;
use serial_test::serial;

use common::database::*;
use learnhub::db;
use learnhub::orm::{subjects, topics, videos};
use sea_orm::{entity::*, query::*, ActiveValue::Set};

#[actix_rt::test]
#[serial]
async fn test_bootstrap_seeds_the_catalogue_once() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    db::bootstrap(db).await.expect("first bootstrap");

    let subject_count = subjects::Entity::find().count(db).await.expect("count");
    let topic_count = topics::Entity::find().count(db).await.expect("count");
    let video_count = videos::Entity::find().count(db).await.expect("count");

    assert_eq!(subject_count, 5);
    assert_eq!(topic_count, 15);
    assert!(video_count > 0);

    // Running bootstrap again must not duplicate anything.
    db::bootstrap(db).await.expect("second bootstrap");

    assert_eq!(subjects::Entity::find().count(db).await.expect("count"), subject_count);
    assert_eq!(topics::Entity::find().count(db).await.expect("count"), topic_count);
    assert_eq!(videos::Entity::find().count(db).await.expect("count"), video_count);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_concurrent_bootstrap_calls_seed_once() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    // Racing first calls must all succeed and seed exactly once.
    let results =
        futures::future::join_all((0..4).map(|_| db::ensure_bootstrapped())).await;
    for result in results {
        result.expect("concurrent bootstrap call failed");
    }

    assert_eq!(subjects::Entity::find().count(db).await.expect("count"), 5);
    assert_eq!(topics::Entity::find().count(db).await.expect("count"), 15);

    // Once the flag is set, further calls are no-ops.
    db::ensure_bootstrapped().await.expect("late bootstrap call failed");
    assert_eq!(subjects::Entity::find().count(db).await.expect("count"), 5);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_bootstrap_respects_admin_content() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    // Any existing subject suppresses the seed entirely.
    subjects::ActiveModel {
        name: Set("Custom Subject".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert");

    db::bootstrap(db).await.expect("bootstrap");

    assert_eq!(subjects::Entity::find().count(db).await.expect("count"), 1);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}
