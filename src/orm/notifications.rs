//! SeaORM Entity for notifications table
//!
//! Broadcast announcements. Per-user read state lives in
//! `notification_reads`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notification_reads::Entity")]
    NotificationRead,
}

impl Related<super::notification_reads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NotificationRead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
