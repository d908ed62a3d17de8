//! Area entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A floor or zone of an office.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "area")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub office_id: String,

    pub name: String,

    /// Floor plan image for the map widget.
    #[sea_orm(nullable)]
    pub map_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::office::Entity",
        from = "Column::OfficeId",
        to = "super::office::Column::Id",
        on_delete = "Cascade"
    )]
    Office,

    #[sea_orm(has_many = "super::desk::Entity")]
    Desks,
}

impl Related<super::office::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Office.def()
    }
}

impl Related<super::desk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Desks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
