//! Tag taxonomy service.

use hub_common::{AppError, AppResult, IdGenerator};
use hub_db::{
    entities::tag,
    repositories::{TagRepository, UserTagRepository},
};
use sea_orm::{IntoActiveModel, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

/// Tags of one category, sorted by name.
#[derive(Debug, Clone, Serialize)]
pub struct TagGroup {
    pub category: String,
    pub tags: Vec<tag::Model>,
}

/// One tag entry of a bulk import.
#[derive(Debug, Clone, Deserialize)]
pub struct TagImportEntry {
    /// Present when the entry targets an existing tag.
    pub id: Option<String>,
    pub name: String,
    pub alt_names: Vec<String>,
}

/// One category block of a bulk import.
#[derive(Debug, Clone, Deserialize)]
pub struct TagImportGroup {
    pub category: String,
    pub tags: Vec<TagImportEntry>,
}

/// Counts reported after a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagImportSummary {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
}

/// Tag service for business logic.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
    user_tag_repo: UserTagRepository,
    id_gen: IdGenerator,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(tag_repo: TagRepository, user_tag_repo: UserTagRepository) -> Self {
        Self {
            tag_repo,
            user_tag_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All tags grouped by category, categories and tags sorted by name.
    pub async fn list_grouped(&self) -> AppResult<Vec<TagGroup>> {
        let tags = self.tag_repo.find_all().await?;

        let mut groups: Vec<TagGroup> = Vec::new();
        for tag in tags {
            match groups.last_mut() {
                Some(group) if group.category == tag.category => group.tags.push(tag),
                _ => groups.push(TagGroup {
                    category: tag.category.clone(),
                    tags: vec![tag],
                }),
            }
        }
        Ok(groups)
    }

    /// Apply a bulk import in a single transaction.
    ///
    /// Per category: entries with a known `id` update that tag, entries
    /// matching an existing name update its alternative names, anything
    /// else is created. Existing tags of a covered category that the
    /// import does not mention are deleted together with their user
    /// assignments. Categories not mentioned in the import are untouched.
    pub async fn import(&self, groups: Vec<TagImportGroup>) -> AppResult<TagImportSummary> {
        let mut summary = TagImportSummary::default();

        let db = self.tag_repo.connection();
        let tx = db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        for group in groups {
            let category = group.category.trim();
            if category.is_empty() {
                return Err(AppError::Validation(
                    "Import group without a category".to_string(),
                ));
            }

            let existing = self.tag_repo.find_by_category_tx(&tx, category).await?;
            let mut kept_ids: Vec<String> = Vec::new();

            for entry in group.tags {
                let name = entry.name.trim();
                if name.is_empty() {
                    return Err(AppError::Validation(format!(
                        "Tag without a name in category: {category}"
                    )));
                }

                let by_id = entry
                    .id
                    .as_ref()
                    .and_then(|id| existing.iter().find(|t| &t.id == id));
                let by_name = existing.iter().find(|t| t.name == name);

                if let Some(current) = by_id {
                    kept_ids.push(current.id.clone());
                    let mut active = current.clone().into_active_model();
                    active.name = Set(name.to_string());
                    active.alt_names = Set(serde_json::json!(entry.alt_names));
                    self.tag_repo.update_tx(&tx, active).await?;
                    summary.updated += 1;
                } else if let Some(current) = by_name {
                    kept_ids.push(current.id.clone());
                    let mut active = current.clone().into_active_model();
                    active.alt_names = Set(serde_json::json!(entry.alt_names));
                    self.tag_repo.update_tx(&tx, active).await?;
                    summary.updated += 1;
                } else {
                    let model = tag::ActiveModel {
                        id: Set(self.id_gen.generate()),
                        name: Set(name.to_string()),
                        alt_names: Set(serde_json::json!(entry.alt_names)),
                        category: Set(category.to_string()),
                        created_at: Set(chrono::Utc::now().into()),
                    };
                    self.tag_repo.create_tx(&tx, model).await?;
                    summary.created += 1;
                }
            }

            let stale: Vec<String> = existing
                .iter()
                .filter(|t| !kept_ids.contains(&t.id))
                .map(|t| t.id.clone())
                .collect();
            self.user_tag_repo.delete_by_tag_ids_tx(&tx, &stale).await?;
            summary.deleted += self.tag_repo.delete_by_ids_tx(&tx, &stale).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(summary)
    }
}
