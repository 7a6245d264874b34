//! Sequencing instrument database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Instrument;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "instruments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Lab inventory code
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub brand: String,
    pub specifications_and_model: String,
    #[sea_orm(unique)]
    pub serial_number: String,
    pub manufacturer: String,
    /// Room slot; at most one instrument per room
    #[sea_orm(unique)]
    pub room_id: Option<i32>,
    /// Owning user (one user owns many instruments)
    pub owner_id: Option<i32>,
    pub usage_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Room,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Instrument {
    fn from(model: Model) -> Self {
        Instrument {
            id: model.id,
            code: model.code,
            name: model.name,
            brand: model.brand,
            specifications_and_model: model.specifications_and_model,
            serial_number: model.serial_number,
            manufacturer: model.manufacturer,
            room_id: model.room_id,
            owner_id: model.owner_id,
            usage_type: model.usage_type,
            remark: model.remark,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
