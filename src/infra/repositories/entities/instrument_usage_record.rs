//! Instrument usage record entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::InstrumentUsageRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "instrument_usage_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub instrument_code: String,
    pub instrument: String,
    pub instrument_status: String,
    pub operator_name: String,
    pub details: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InstrumentUsageRecord {
    fn from(model: Model) -> Self {
        InstrumentUsageRecord {
            id: model.id,
            instrument_code: model.instrument_code,
            instrument: model.instrument,
            instrument_status: model.instrument_status,
            operator_name: model.operator_name,
            details: model.details,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
