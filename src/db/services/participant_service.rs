use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::ServiceError;
use super::institution_service::InstitutionService;
use crate::db::archive::{self, Archivable, Scope};
use crate::db::entities::{
    event, participant, phone_number,
    prelude::{Institution, Participant},
};
use crate::db::models::{ParticipantInput, ParticipantRecord};
use crate::db::serialize::to_map;

pub struct ParticipantService;

impl ParticipantService {
    pub async fn create_participant(
        db: &DbConn,
        input: ParticipantInput,
    ) -> Result<participant::Model, ServiceError> {
        validate_name(&input.name)?;
        if let Some(institution_id) = input.institution_id {
            InstitutionService::get_institution(db, institution_id, Scope::Active).await?;
        }

        let new_participant = participant::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            participant_street_address: Set(input.street_address),
            participant_city_address: Set(input.city),
            participant_state_address: Set(input.state),
            participant_zipcode_address: Set(input.zipcode),
            institution_id: Set(input.institution_id),
            title: Set(input.title),
            archived: Set(None),
            ..Default::default()
        };
        let created = new_participant.insert(db).await?;
        info!(participant_id = created.id, name = %created.name, "Participant created.");
        Ok(created)
    }

    pub async fn get_participant(
        db: &DbConn,
        participant_id: i32,
        scope: Scope,
    ) -> Result<participant::Model, ServiceError> {
        Participant::find_in(scope)
            .filter(participant::Column::Id.eq(participant_id))
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("participant", participant_id))
    }

    pub async fn list_participants(
        db: &DbConn,
        scope: Scope,
    ) -> Result<Vec<participant::Model>, ServiceError> {
        Ok(Participant::find_in(scope)
            .order_by_asc(participant::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update_participant(
        db: &DbConn,
        participant_id: i32,
        input: ParticipantInput,
    ) -> Result<participant::Model, ServiceError> {
        validate_name(&input.name)?;
        let existing = Self::get_participant(db, participant_id, Scope::Active).await?;
        if let Some(institution_id) = input.institution_id {
            if existing.institution_id != Some(institution_id) {
                InstitutionService::get_institution(db, institution_id, Scope::Active).await?;
            }
        }

        let mut active: participant::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.email = Set(input.email);
        active.participant_street_address = Set(input.street_address);
        active.participant_city_address = Set(input.city);
        active.participant_state_address = Set(input.state);
        active.participant_zipcode_address = Set(input.zipcode);
        active.institution_id = Set(input.institution_id);
        active.title = Set(input.title);

        Ok(active.update(db).await?)
    }

    pub async fn set_institution(
        db: &DbConn,
        participant_id: i32,
        institution_id: Option<i32>,
    ) -> Result<participant::Model, ServiceError> {
        let existing = Self::get_participant(db, participant_id, Scope::Active).await?;
        if let Some(institution_id) = institution_id {
            InstitutionService::get_institution(db, institution_id, Scope::Active).await?;
        }
        let mut active: participant::ActiveModel = existing.into();
        active.institution_id = Set(institution_id);
        Ok(active.update(db).await?)
    }

    pub async fn archive_participant(
        db: &DbConn,
        participant_id: i32,
    ) -> Result<participant::Model, ServiceError> {
        let existing = Self::get_participant(db, participant_id, Scope::Active).await?;
        let archived = archive::archive::<Participant, _>(db, existing).await?;
        info!(participant_id, "Participant archived.");
        Ok(archived)
    }

    pub async fn unarchive_participant(
        db: &DbConn,
        participant_id: i32,
    ) -> Result<participant::Model, ServiceError> {
        let existing = Self::get_participant(db, participant_id, Scope::WithArchived).await?;
        let restored = archive::unarchive::<Participant, _>(db, existing).await?;
        info!(participant_id, "Participant unarchived.");
        Ok(restored)
    }

    /// Active events the participant attended, newest first.
    pub async fn events(
        db: &DbConn,
        participant_id: i32,
    ) -> Result<Vec<event::Model>, ServiceError> {
        let existing = Self::get_participant(db, participant_id, Scope::WithArchived).await?;
        Ok(existing
            .find_related(event::Entity)
            .filter(event::Column::Archived.is_null())
            .order_by_desc(event::Column::Date)
            .order_by_desc(event::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn phone_numbers(
        db: &DbConn,
        participant_id: i32,
    ) -> Result<Vec<phone_number::Model>, ServiceError> {
        let existing = Self::get_participant(db, participant_id, Scope::WithArchived).await?;
        Ok(existing
            .find_related(phone_number::Entity)
            .order_by_asc(phone_number::Column::Id)
            .all(db)
            .await?)
    }

    /// Loads the participant together with its institution. References are
    /// followed regardless of their archive state.
    pub async fn load_record(
        db: &DbConn,
        participant_id: i32,
        scope: Scope,
    ) -> Result<ParticipantRecord, ServiceError> {
        let participant = Self::get_participant(db, participant_id, scope).await?;
        Self::record_for(db, participant).await
    }

    pub(crate) async fn record_for(
        db: &DbConn,
        participant: participant::Model,
    ) -> Result<ParticipantRecord, ServiceError> {
        let institution = match participant.institution_id {
            Some(institution_id) => Institution::find_by_id(institution_id).one(db).await?,
            None => None,
        };
        debug!(
            participant_id = participant.id,
            has_institution = institution.is_some(),
            "Loaded participant record."
        );
        Ok(ParticipantRecord {
            participant,
            institution,
        })
    }

    pub async fn serialize_participant(
        db: &DbConn,
        participant_id: i32,
        scope: Scope,
    ) -> Result<Map<String, Value>, ServiceError> {
        let record = Self::load_record(db, participant_id, scope).await?;
        Ok(to_map(&record))
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Participant name must not be empty.".to_string(),
        ));
    }
    Ok(())
}
