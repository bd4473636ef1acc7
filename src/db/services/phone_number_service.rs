use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::{Map, Value};
use tracing::info;

use super::error::ServiceError;
use super::participant_service::ParticipantService;
use crate::db::archive::Scope;
use crate::db::entities::{phone_number, prelude::PhoneNumber as PhoneNumberEntity};
use crate::db::models::{PhoneNumberInput, PhoneNumberRecord};
use crate::db::serialize::to_map;
use crate::phone::PhoneNumber;

/// Phone numbers have no archive state; they are never deleted through this
/// service either.
pub struct PhoneNumberService;

impl PhoneNumberService {
    pub async fn create_phone_number(
        db: &DbConn,
        input: PhoneNumberInput,
    ) -> Result<phone_number::Model, ServiceError> {
        let canonical = canonicalize(input.phone_number.as_deref())?;
        if let Some(owner_id) = input.owner_id {
            ParticipantService::get_participant(db, owner_id, Scope::Active).await?;
        }

        let new_number = phone_number::ActiveModel {
            phone_number: Set(canonical),
            cell: Set(input.cell),
            owner_id: Set(input.owner_id),
            date_created: Set(Some(Utc::now().date_naive())),
            ..Default::default()
        };
        let created = new_number.insert(db).await?;
        info!(phone_number_id = created.id, owner_id = ?created.owner_id, "Phone number linked.");
        Ok(created)
    }

    pub async fn get_phone_number(
        db: &DbConn,
        phone_number_id: i32,
    ) -> Result<phone_number::Model, ServiceError> {
        PhoneNumberEntity::find_by_id(phone_number_id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("phone number", phone_number_id))
    }

    pub async fn list_for_owner(
        db: &DbConn,
        owner_id: i32,
    ) -> Result<Vec<phone_number::Model>, ServiceError> {
        Ok(PhoneNumberEntity::find()
            .filter(phone_number::Column::OwnerId.eq(owner_id))
            .order_by_asc(phone_number::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update_phone_number(
        db: &DbConn,
        phone_number_id: i32,
        input: PhoneNumberInput,
    ) -> Result<phone_number::Model, ServiceError> {
        let canonical = canonicalize(input.phone_number.as_deref())?;
        let existing = Self::get_phone_number(db, phone_number_id).await?;
        if let Some(owner_id) = input.owner_id {
            if existing.owner_id != Some(owner_id) {
                ParticipantService::get_participant(db, owner_id, Scope::Active).await?;
            }
        }

        let mut active: phone_number::ActiveModel = existing.into();
        active.phone_number = Set(canonical);
        active.cell = Set(input.cell);
        active.owner_id = Set(input.owner_id);
        Ok(active.update(db).await?)
    }

    pub async fn load_record(
        db: &DbConn,
        phone_number_id: i32,
    ) -> Result<PhoneNumberRecord, ServiceError> {
        let phone_number = Self::get_phone_number(db, phone_number_id).await?;
        let owner = match phone_number.owner_id {
            Some(owner_id) => {
                let owner = ParticipantService::get_participant(db, owner_id, Scope::WithArchived).await?;
                Some(ParticipantService::record_for(db, owner).await?)
            }
            None => None,
        };
        Ok(PhoneNumberRecord { phone_number, owner })
    }

    pub async fn serialize_phone_number(
        db: &DbConn,
        phone_number_id: i32,
    ) -> Result<Map<String, Value>, ServiceError> {
        let record = Self::load_record(db, phone_number_id).await?;
        Ok(to_map(&record))
    }
}

/// Blank input means "no number"; anything else must parse.
fn canonicalize(raw: Option<&str>) -> Result<Option<String>, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => {
            let parsed: PhoneNumber = raw.parse()?;
            Ok(Some(parsed.to_e164()))
        }
    }
}
