/// Integration tests for video and topic completion tracking
mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use learnhub::orm::{topic_completions, video_completions};
use learnhub::progress;
use sea_orm::{entity::*, query::*};

#[actix_rt::test]
#[serial]
async fn test_subject_progress_rollup() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "alice", "alice@example.com", "password123")
        .await
        .expect("Failed to create user");
    let subject_id = create_subject(db, "Power Systems").await.expect("subject");
    let topic_id = create_topic(db, subject_id, "Transmission").await.expect("topic");
    let first = create_video(db, topic_id, "Intro", "abc123").await.expect("video");
    let second = create_video(db, topic_id, "Lines", "def456").await.expect("video");

    let rollup = progress::progress_by_subject(user.id)
        .await
        .expect("rollup")[&subject_id];
    assert_eq!(rollup.completed, 0);
    assert_eq!(rollup.total, 2);
    assert_eq!(rollup.percent, 0);

    progress::complete_video(user.id, first).await.expect("complete");

    let rollup = progress::progress_by_subject(user.id)
        .await
        .expect("rollup")[&subject_id];
    assert_eq!(rollup.completed, 1);
    assert_eq!(rollup.percent, 50);

    let topic = progress::progress_by_topic(user.id, subject_id)
        .await
        .expect("rollup")[&topic_id];
    assert!(!topic.done);

    progress::complete_video(user.id, second).await.expect("complete");

    let rollup = progress::progress_by_subject(user.id)
        .await
        .expect("rollup")[&subject_id];
    assert_eq!(rollup.percent, 100);

    let topic = progress::progress_by_topic(user.id, subject_id)
        .await
        .expect("rollup")[&topic_id];
    assert!(topic.done);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_video_completion_is_idempotent() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "bob", "bob@example.com", "password123")
        .await
        .expect("Failed to create user");
    let subject_id = create_subject(db, "Control Systems").await.expect("subject");
    let topic_id = create_topic(db, subject_id, "Stability").await.expect("topic");
    let video_id = create_video(db, topic_id, "Bode", "ghi789").await.expect("video");

    progress::complete_video(user.id, video_id).await.expect("first");
    progress::complete_video(user.id, video_id).await.expect("second");

    let rows = video_completions::Entity::find()
        .filter(video_completions::Column::UserId.eq(user.id))
        .count(db)
        .await
        .expect("count");
    assert_eq!(rows, 1);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_uncomplete_without_completion_is_noop() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "cara", "cara@example.com", "password123")
        .await
        .expect("Failed to create user");

    progress::uncomplete_video(user.id, 9999)
        .await
        .expect("uncomplete of a missing pair should succeed");

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_uncomplete_reverses_completion() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "dave", "dave@example.com", "password123")
        .await
        .expect("Failed to create user");
    let subject_id = create_subject(db, "Signals").await.expect("subject");
    let topic_id = create_topic(db, subject_id, "Fourier").await.expect("topic");
    let video_id = create_video(db, topic_id, "Series", "jkl012").await.expect("video");

    progress::complete_video(user.id, video_id).await.expect("complete");
    progress::uncomplete_video(user.id, video_id).await.expect("uncomplete");

    let completed = progress::completed_video_ids(user.id).await.expect("ids");
    assert!(completed.is_empty());

    cleanup_test_data(db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_topic_completion_is_idempotent() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(db).await.expect("Failed to cleanup");

    let user = create_test_user(db, "erin", "erin@example.com", "password123")
        .await
        .expect("Failed to create user");
    let subject_id = create_subject(db, "Machines").await.expect("subject");
    let topic_id = create_topic(db, subject_id, "Transformers").await.expect("topic");

    progress::complete_topic(user.id, topic_id).await.expect("first");
    progress::complete_topic(user.id, topic_id).await.expect("second");

    let rows = topic_completions::Entity::find()
        .filter(topic_completions::Column::UserId.eq(user.id))
        .count(db)
        .await
        .expect("count");
    assert_eq!(rows, 1);

    cleanup_test_data(db).await.expect("Failed to cleanup");
}
