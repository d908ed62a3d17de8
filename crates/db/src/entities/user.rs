//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    pub full_name: String,

    /// Role identifiers as a JSON array of strings.
    pub roles: Json,

    #[sea_orm(nullable)]
    pub department: Option<String>,

    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Hidden from the hub map when true.
    #[sea_orm(default_value = false)]
    pub stealth_mode: bool,

    /// Date the retention jobs pick this user up, NULL = not scheduled.
    #[sea_orm(nullable)]
    pub scheduled_to_delete: Option<Date>,

    /// Set once the anonymization job has run. Irreversible.
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    /// Access token for API authentication.
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Role identifiers assigned to this user.
    #[must_use]
    pub fn role_ids(&self) -> Vec<String> {
        serde_json::from_value(self.roles.clone()).unwrap_or_default()
    }

    /// Whether this user has not been deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Whether this user's roles grant the given permission.
    #[must_use]
    pub fn has_permission(&self, permission: hub_common::Permission) -> bool {
        hub_common::permissions_for_roles(&self.role_ids()).contains(&permission)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::form_submission::Entity")]
    FormSubmissions,

    #[sea_orm(has_many = "super::user_tag::Entity")]
    UserTags,

    #[sea_orm(has_many = "super::visit::Entity")]
    Visits,
}

impl Related<super::form_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormSubmissions.def()
    }
}

impl Related<super::user_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTags.def()
    }
}

impl Related<super::visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
