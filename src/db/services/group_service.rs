use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use tracing::info;

use super::error::{ServiceError, map_unique_violation};
use crate::db::entities::{group, prelude::Group};

pub struct GroupService;

impl GroupService {
    pub async fn create_group(db: &DbConn, name: String) -> Result<group::Model, ServiceError> {
        if Self::find_by_name(db, &name).await?.is_some() {
            return Err(ServiceError::DuplicateName { entity: "group", name });
        }

        let new_group = group::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        };
        let created = new_group
            .insert(db)
            .await
            .map_err(|e| map_unique_violation(e, "group", &name))?;
        info!(group_id = created.id, name = %created.name, "Group created.");
        Ok(created)
    }

    pub async fn find_by_name(db: &DbConn, name: &str) -> Result<Option<group::Model>, ServiceError> {
        Ok(Group::find()
            .filter(group::Column::Name.eq(name))
            .one(db)
            .await?)
    }

    pub async fn get_group(db: &DbConn, group_id: i32) -> Result<group::Model, ServiceError> {
        Group::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("group", group_id))
    }
}
