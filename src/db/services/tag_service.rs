use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, QueryFilter, QueryOrder, Set};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::error::{ServiceError, map_unique_violation};
use super::group_service::GroupService;
use crate::db::archive::{self, Archivable, Scope};
use crate::db::entities::{prelude::Tag, tag};
use crate::db::models::TagInput;
use crate::db::serialize::to_map;

pub const MAX_TAG_NAME_LEN: usize = 15;

pub struct TagService;

impl TagService {
    pub async fn create_tag(db: &DbConn, input: TagInput) -> Result<tag::Model, ServiceError> {
        validate_name(&input.name)?;
        GroupService::get_group(db, input.group_id).await?;
        ensure_name_free(db, &input.name, None).await?;

        let new_tag = tag::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description),
            date_created: Set(Some(Utc::now().date_naive())),
            group_id: Set(input.group_id),
            archived: Set(None),
            ..Default::default()
        };
        let created = new_tag
            .insert(db)
            .await
            .map_err(|e| map_unique_violation(e, "tag", &input.name))?;
        info!(tag_id = created.id, name = %created.name, "Tag created.");
        Ok(created)
    }

    pub async fn get_tag(db: &DbConn, tag_id: i32, scope: Scope) -> Result<tag::Model, ServiceError> {
        Tag::find_in(scope)
            .filter(tag::Column::Id.eq(tag_id))
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("tag", tag_id))
    }

    pub async fn list_tags(db: &DbConn, scope: Scope) -> Result<Vec<tag::Model>, ServiceError> {
        Ok(Tag::find_in(scope)
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update_tag(
        db: &DbConn,
        tag_id: i32,
        input: TagInput,
    ) -> Result<tag::Model, ServiceError> {
        validate_name(&input.name)?;
        let tag = Self::get_tag(db, tag_id, Scope::Active).await?;
        GroupService::get_group(db, input.group_id).await?;
        ensure_name_free(db, &input.name, Some(tag_id)).await?;

        let mut active_tag: tag::ActiveModel = tag.into();
        active_tag.name = Set(input.name.clone());
        active_tag.description = Set(input.description);
        active_tag.group_id = Set(input.group_id);

        active_tag
            .update(db)
            .await
            .map_err(|e| map_unique_violation(e, "tag", &input.name))
    }

    pub async fn archive_tag(db: &DbConn, tag_id: i32) -> Result<tag::Model, ServiceError> {
        let tag = Self::get_tag(db, tag_id, Scope::Active).await?;
        let archived = archive::archive::<Tag, _>(db, tag).await?;
        info!(tag_id, "Tag archived.");
        Ok(archived)
    }

    pub async fn unarchive_tag(db: &DbConn, tag_id: i32) -> Result<tag::Model, ServiceError> {
        let tag = Self::get_tag(db, tag_id, Scope::WithArchived).await?;
        let restored = archive::unarchive::<Tag, _>(db, tag).await?;
        info!(tag_id, "Tag unarchived.");
        Ok(restored)
    }

    pub async fn serialize_tag(
        db: &DbConn,
        tag_id: i32,
        scope: Scope,
    ) -> Result<Map<String, Value>, ServiceError> {
        let tag = Self::get_tag(db, tag_id, scope).await?;
        Ok(to_map(&tag))
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("Tag name must not be empty.".to_string()));
    }
    if name.chars().count() > MAX_TAG_NAME_LEN {
        warn!(name, "Rejected tag name longer than {} characters.", MAX_TAG_NAME_LEN);
        return Err(ServiceError::InvalidInput(format!(
            "Tag name must be at most {MAX_TAG_NAME_LEN} characters."
        )));
    }
    Ok(())
}

// Names are unique across archived tags too.
async fn ensure_name_free(db: &DbConn, name: &str, except: Option<i32>) -> Result<(), ServiceError> {
    let existing = Tag::find_with_archived()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?;
    match existing {
        Some(found) if Some(found.id) != except => Err(ServiceError::DuplicateName {
            entity: "tag",
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}
