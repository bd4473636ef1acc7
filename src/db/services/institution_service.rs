use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::{ServiceError, map_unique_violation};
use super::participant_service::ParticipantService;
use super::tag_service::TagService;
use crate::db::archive::{self, Archivable, Scope};
use crate::db::entities::{
    institution, institution_contact, institution_tag, participant,
    prelude::{Institution, InstitutionContact, InstitutionTag},
    tag,
};
use crate::db::models::InstitutionInput;
use crate::db::serialize::to_map;

pub struct InstitutionService;

impl InstitutionService {
    pub async fn create_institution(
        db: &DbConn,
        input: InstitutionInput,
    ) -> Result<institution::Model, ServiceError> {
        validate_name(&input.name)?;
        ensure_name_free(db, &input.name, None).await?;

        let name = input.name.clone();
        let new_institution = institution::ActiveModel {
            name: Set(input.name),
            inst_street_address: Set(input.street_address),
            inst_city_address: Set(input.city),
            inst_state_address: Set(input.state),
            inst_zipcode_address: Set(input.zipcode),
            is_member: Set(input.is_member),
            archived: Set(None),
            ..Default::default()
        };
        let created = new_institution
            .insert(db)
            .await
            .map_err(|e| map_unique_violation(e, "institution", &name))?;
        info!(institution_id = created.id, name = %created.name, "Institution created.");
        Ok(created)
    }

    pub async fn get_institution(
        db: &DbConn,
        institution_id: i32,
        scope: Scope,
    ) -> Result<institution::Model, ServiceError> {
        Institution::find_in(scope)
            .filter(institution::Column::Id.eq(institution_id))
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("institution", institution_id))
    }

    pub async fn list_institutions(
        db: &DbConn,
        scope: Scope,
    ) -> Result<Vec<institution::Model>, ServiceError> {
        Ok(Institution::find_in(scope)
            .order_by_asc(institution::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update_institution(
        db: &DbConn,
        institution_id: i32,
        input: InstitutionInput,
    ) -> Result<institution::Model, ServiceError> {
        validate_name(&input.name)?;
        let existing = Self::get_institution(db, institution_id, Scope::Active).await?;
        ensure_name_free(db, &input.name, Some(institution_id)).await?;

        let name = input.name.clone();
        let mut active: institution::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.inst_street_address = Set(input.street_address);
        active.inst_city_address = Set(input.city);
        active.inst_state_address = Set(input.state);
        active.inst_zipcode_address = Set(input.zipcode);
        active.is_member = Set(input.is_member);

        active
            .update(db)
            .await
            .map_err(|e| map_unique_violation(e, "institution", &name))
    }

    pub async fn archive_institution(
        db: &DbConn,
        institution_id: i32,
    ) -> Result<institution::Model, ServiceError> {
        let existing = Self::get_institution(db, institution_id, Scope::Active).await?;
        let archived = archive::archive::<Institution, _>(db, existing).await?;
        info!(institution_id, "Institution archived.");
        Ok(archived)
    }

    pub async fn unarchive_institution(
        db: &DbConn,
        institution_id: i32,
    ) -> Result<institution::Model, ServiceError> {
        let existing = Self::get_institution(db, institution_id, Scope::WithArchived).await?;
        let restored = archive::unarchive::<Institution, _>(db, existing).await?;
        info!(institution_id, "Institution unarchived.");
        Ok(restored)
    }

    // --- Tags ---

    /// Links a tag to an institution. Linking twice is a no-op.
    pub async fn add_tag(db: &DbConn, institution_id: i32, tag_id: i32) -> Result<(), ServiceError> {
        Self::get_institution(db, institution_id, Scope::Active).await?;
        TagService::get_tag(db, tag_id, Scope::Active).await?;

        if InstitutionTag::find_by_id((institution_id, tag_id))
            .one(db)
            .await?
            .is_some()
        {
            debug!(institution_id, tag_id, "Tag already linked to institution.");
            return Ok(());
        }
        let link = institution_tag::ActiveModel {
            institution_id: Set(institution_id),
            tag_id: Set(tag_id),
        };
        InstitutionTag::insert(link).exec_without_returning(db).await?;
        Ok(())
    }

    pub async fn remove_tag(db: &DbConn, institution_id: i32, tag_id: i32) -> Result<u64, ServiceError> {
        let result = InstitutionTag::delete_by_id((institution_id, tag_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn tags(
        db: &DbConn,
        institution_id: i32,
        scope: Scope,
    ) -> Result<Vec<tag::Model>, ServiceError> {
        let existing = Self::get_institution(db, institution_id, Scope::WithArchived).await?;
        let mut query = existing.find_related(tag::Entity);
        if scope == Scope::Active {
            query = query.filter(tag::Column::Archived.is_null());
        }
        Ok(query.order_by_asc(tag::Column::Name).all(db).await?)
    }

    // --- Contacts ---

    pub async fn add_contact(
        db: &DbConn,
        institution_id: i32,
        participant_id: i32,
    ) -> Result<(), ServiceError> {
        Self::get_institution(db, institution_id, Scope::Active).await?;
        ParticipantService::get_participant(db, participant_id, Scope::Active).await?;

        if InstitutionContact::find_by_id((institution_id, participant_id))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(());
        }
        let link = institution_contact::ActiveModel {
            institution_id: Set(institution_id),
            participant_id: Set(participant_id),
        };
        InstitutionContact::insert(link).exec_without_returning(db).await?;
        info!(institution_id, participant_id, "Contact added to institution.");
        Ok(())
    }

    pub async fn remove_contact(
        db: &DbConn,
        institution_id: i32,
        participant_id: i32,
    ) -> Result<u64, ServiceError> {
        let result = InstitutionContact::delete_by_id((institution_id, participant_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn contacts(
        db: &DbConn,
        institution_id: i32,
        scope: Scope,
    ) -> Result<Vec<participant::Model>, ServiceError> {
        let existing = Self::get_institution(db, institution_id, Scope::WithArchived).await?;
        let mut query = existing.find_related(participant::Entity);
        if scope == Scope::Active {
            query = query.filter(participant::Column::Archived.is_null());
        }
        Ok(query.order_by_asc(participant::Column::Name).all(db).await?)
    }

    pub async fn serialize_institution(
        db: &DbConn,
        institution_id: i32,
        scope: Scope,
    ) -> Result<Map<String, Value>, ServiceError> {
        let existing = Self::get_institution(db, institution_id, scope).await?;
        Ok(to_map(&existing))
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Institution name must not be empty.".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_name_free(db: &DbConn, name: &str, except: Option<i32>) -> Result<(), ServiceError> {
    let existing = Institution::find_with_archived()
        .filter(institution::Column::Name.eq(name))
        .one(db)
        .await?;
    match existing {
        Some(found) if Some(found.id) != except => Err(ServiceError::DuplicateName {
            entity: "institution",
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}
