use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "well_log")]
    WellLog,
    #[sea_orm(string_value = "as_built")]
    AsBuilt,
    #[sea_orm(string_value = "pump_curve")]
    PumpCurve,
    #[sea_orm(string_value = "pump_test")]
    PumpTest,
    #[sea_orm(string_value = "well_test")]
    WellTest,
    #[sea_orm(string_value = "panel_check")]
    PanelCheck,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub site: Uuid,
    pub entry_type: EntryType,
    #[sea_orm(column_type = "Text")]
    pub note: String,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::Site",
        to = "super::site::Column::Id"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::entry_file::Entity")]
    EntryFile,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::entry_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
