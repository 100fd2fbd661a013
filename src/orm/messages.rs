//! SeaORM Entity for messages table
//!
//! An append-only log. `user_name` and `user_email` are denormalized from
//! the user row at send time so threads survive profile renames.

use sea_orm::entity::prelude::*;

/// Role of the message author.
pub const SENDER_STUDENT: &str = "student";
pub const SENDER_ADMIN: &str = "admin";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub text: String,
    pub sender: String,
}

impl Model {
    pub fn is_from_admin(&self) -> bool {
        self.sender == SENDER_ADMIN
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
