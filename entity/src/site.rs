use chrono::NaiveDateTime;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "site")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub customer: Uuid,
    pub name: String,
    pub job_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub category: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub deleted: bool,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

/// Lifecycle of a site. The `deleted`/`deleted_at` columns are only ever
/// written through this type so the two stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteLifecycle {
    Active,
    Deleted { at: NaiveDateTime },
}

impl Model {
    pub fn lifecycle(&self) -> SiteLifecycle {
        if self.deleted {
            SiteLifecycle::Deleted {
                at: self.deleted_at.unwrap_or_default(),
            }
        } else {
            SiteLifecycle::Active
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self.lifecycle(), SiteLifecycle::Deleted { .. })
    }
}

impl ActiveModel {
    pub fn set_lifecycle(&mut self, lifecycle: SiteLifecycle) {
        match lifecycle {
            SiteLifecycle::Active => {
                self.deleted = Set(false);
                self.deleted_at = Set(None);
            }
            SiteLifecycle::Deleted { at } => {
                self.deleted = Set(true);
                self.deleted_at = Set(Some(at));
            }
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::Customer",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::entry::Entity")]
    Entry,
    #[sea_orm(has_many = "super::share_link::Entity")]
    ShareLink,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
