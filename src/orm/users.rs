//! SeaORM Entity for users table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. Never rendered.
    pub password_hash: String,
    /// High-water mark for the admin-reply unread indicator.
    pub last_seen_admin_message_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::messages::Entity")]
    Message,
    #[sea_orm(has_many = "super::topic_completions::Entity")]
    TopicCompletion,
    #[sea_orm(has_many = "super::video_completions::Entity")]
    VideoCompletion,
    #[sea_orm(has_many = "super::notification_reads::Entity")]
    NotificationRead,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl Related<super::topic_completions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TopicCompletion.def()
    }
}

impl Related<super::video_completions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoCompletion.def()
    }
}

impl Related<super::notification_reads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NotificationRead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
