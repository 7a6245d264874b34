//! Room usage record entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::RoomUsageRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "room_usage_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: i32,
    pub operator_id: i32,
    /// Entering or leaving the room
    pub room_status: String,
    /// Daily, process or CNAS operation
    pub operation_type: String,
    pub details: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OperatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Operator,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RoomUsageRecord {
    fn from(model: Model) -> Self {
        RoomUsageRecord {
            id: model.id,
            room_id: model.room_id,
            operator_id: model.operator_id,
            room_status: model.room_status,
            operation_type: model.operation_type,
            details: model.details,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
