//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External identity issued by the login provider
    #[sea_orm(unique)]
    pub openid: String,
    pub real_name: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::instrument::Entity")]
    Instruments,
    #[sea_orm(has_many = "super::room_usage_record::Entity")]
    RoomUsageRecords,
}

impl Related<super::instrument::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instruments.def()
    }
}

impl Related<super::room_usage_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomUsageRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            openid: model.openid,
            real_name: model.real_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
