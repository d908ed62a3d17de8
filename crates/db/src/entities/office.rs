//! Office (hub) entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical office location.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "office")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub name: String,

    /// Whether the hub map / desk booking is enabled for this office.
    #[sea_orm(default_value = false)]
    pub allow_desk_reservation: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::area::Entity")]
    Areas,

    #[sea_orm(has_many = "super::visit::Entity")]
    Visits,
}

impl Related<super::area::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Areas.def()
    }
}

impl Related<super::visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
