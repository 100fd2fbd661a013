//! Test database setup and management
#![allow(dead_code)]

use learnhub::db::{create_schema, get_db_pool, init_db};
use learnhub::orm::{
    admin_message_reads, interview_preps, messages, notes, notification_reads, notifications,
    questions, subjects, topic_completions, topics, users, video_completions, videos,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// Connect the global pool to a shared in-memory sqlite database and create
/// the schema. Safe to call from every test; only the first call does work.
pub async fn setup_test_database() -> Result<&'static DatabaseConnection, DbErr> {
    init_db("sqlite::memory:".to_owned()).await;
    let db = get_db_pool();

    create_schema(db).await?;

    Ok(db)
}

/// Remove all rows, child tables before their parents so foreign keys
/// never complain.
pub async fn cleanup_test_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    admin_message_reads::Entity::delete_many().exec(db).await?;
    notification_reads::Entity::delete_many().exec(db).await?;
    notifications::Entity::delete_many().exec(db).await?;
    messages::Entity::delete_many().exec(db).await?;
    video_completions::Entity::delete_many().exec(db).await?;
    topic_completions::Entity::delete_many().exec(db).await?;
    interview_preps::Entity::delete_many().exec(db).await?;
    videos::Entity::delete_many().exec(db).await?;
    notes::Entity::delete_many().exec(db).await?;
    questions::Entity::delete_many().exec(db).await?;
    topics::Entity::delete_many().exec(db).await?;
    subjects::Entity::delete_many().exec(db).await?;
    users::Entity::delete_many().exec(db).await?;
    Ok(())
}
