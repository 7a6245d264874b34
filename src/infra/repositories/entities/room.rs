//! Lab room database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Room;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Room name or function
    pub room_info: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::instrument::Entity")]
    Instrument,
    #[sea_orm(has_many = "super::room_usage_record::Entity")]
    UsageRecords,
}

impl Related<super::instrument::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instrument.def()
    }
}

impl Related<super::room_usage_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsageRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Room {
    fn from(model: Model) -> Self {
        Room {
            id: model.id,
            room_info: model.room_info,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
