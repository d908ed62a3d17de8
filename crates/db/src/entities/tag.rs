//! Tag entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A taxonomy tag, grouped by category.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Alternative spellings as a JSON array of strings.
    pub alt_names: Json,

    #[sea_orm(indexed)]
    pub category: String,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Alternative names for this tag.
    #[must_use]
    pub fn alt_name_list(&self) -> Vec<String> {
        serde_json::from_value(self.alt_names.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_tag::Entity")]
    UserTags,
}

impl Related<super::user_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
