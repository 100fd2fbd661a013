//! SeaORM Entity for subjects table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::topics::Entity")]
    Topic,
    #[sea_orm(has_many = "super::interview_preps::Entity")]
    InterviewPrep,
}

impl Related<super::topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::interview_preps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InterviewPrep.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
