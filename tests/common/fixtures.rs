//! Test fixtures for creating test data
#![allow(dead_code)]

use learnhub::orm::{subjects, topics, users, videos};
use learnhub::session;
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

/// Test user fixture
pub struct TestUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String, // Plain text password for testing
}

/// Create a test user with known credentials
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, DbErr> {
    let password_hash = session::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Password hashing failed: {}", e)))?;

    let user = users::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email.to_owned()),
        password_hash: Set(password_hash),
        last_seen_admin_message_id: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(TestUser {
        id: user.id,
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

pub async fn get_user(db: &DatabaseConnection, user_id: i32) -> Result<users::Model, DbErr> {
    users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom("test user missing".to_owned()))
}

pub async fn create_subject(db: &DatabaseConnection, name: &str) -> Result<i32, DbErr> {
    let subject = subjects::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(subject.id)
}

pub async fn create_topic(
    db: &DatabaseConnection,
    subject_id: i32,
    name: &str,
) -> Result<i32, DbErr> {
    let topic = topics::ActiveModel {
        name: Set(name.to_owned()),
        subject_id: Set(subject_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(topic.id)
}

pub async fn create_video(
    db: &DatabaseConnection,
    topic_id: i32,
    title: &str,
    youtube_id: &str,
) -> Result<i32, DbErr> {
    let video = videos::ActiveModel {
        title: Set(title.to_owned()),
        youtube_id: Set(youtube_id.to_owned()),
        topic_id: Set(topic_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(video.id)
}
