use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::error::ServiceError;
use super::participant_service::ParticipantService;
use super::tag_service::TagService;
use crate::db::archive::{self, Archivable, Scope};
use crate::db::entities::{
    event, event_participant, event_tag, participant,
    prelude::{Event, EventParticipant, EventTag},
    tag,
};
use crate::db::models::{EventInput, EventRecord, ParticipantRecord};
use crate::db::serialize::to_map;

pub struct EventService;

impl EventService {
    pub async fn create_event(db: &DbConn, input: EventInput) -> Result<event::Model, ServiceError> {
        validate_name(&input.name)?;
        if let Some(organizer_id) = input.organizer_id {
            ParticipantService::get_participant(db, organizer_id, Scope::Active).await?;
        }

        let new_event = event::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            date: Set(input.date),
            time: Set(input.time),
            organizer_id: Set(input.organizer_id),
            location: Set(input.location),
            issue_area: Set(input.issue_area),
            is_prep: Set(input.is_prep),
            major_action_id: Set(None),
            archived: Set(None),
            ..Default::default()
        };
        let created = new_event.insert(db).await?;
        info!(event_id = created.id, name = %created.name, "Event created.");
        Ok(created)
    }

    pub async fn get_event(db: &DbConn, event_id: i32, scope: Scope) -> Result<event::Model, ServiceError> {
        Event::find_in(scope)
            .filter(event::Column::Id.eq(event_id))
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("event", event_id))
    }

    /// Newest first.
    pub async fn list_events(db: &DbConn, scope: Scope) -> Result<Vec<event::Model>, ServiceError> {
        Ok(Event::find_in(scope)
            .order_by_desc(event::Column::Date)
            .order_by_desc(event::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update_event(
        db: &DbConn,
        event_id: i32,
        input: EventInput,
    ) -> Result<event::Model, ServiceError> {
        validate_name(&input.name)?;
        let existing = Self::get_event(db, event_id, Scope::Active).await?;
        if let Some(organizer_id) = input.organizer_id {
            if existing.organizer_id != Some(organizer_id) {
                ParticipantService::get_participant(db, organizer_id, Scope::Active).await?;
            }
        }

        let mut active: event::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.date = Set(input.date);
        active.time = Set(input.time);
        active.organizer_id = Set(input.organizer_id);
        active.location = Set(input.location);
        active.issue_area = Set(input.issue_area);
        active.is_prep = Set(input.is_prep);

        Ok(active.update(db).await?)
    }

    pub async fn set_organizer(
        db: &DbConn,
        event_id: i32,
        organizer_id: Option<i32>,
    ) -> Result<event::Model, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::Active).await?;
        if let Some(organizer_id) = organizer_id {
            ParticipantService::get_participant(db, organizer_id, Scope::Active).await?;
        }
        let mut active: event::ActiveModel = existing.into();
        active.organizer_id = Set(organizer_id);
        Ok(active.update(db).await?)
    }

    /// Points a prep meeting at the major action it leads up to. Rejects any
    /// link that would make the major action chain loop back to `event_id`.
    pub async fn set_major_action(
        db: &DbConn,
        event_id: i32,
        major_action_id: Option<i32>,
    ) -> Result<event::Model, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::Active).await?;

        if let Some(major_action_id) = major_action_id {
            let mut next = Some(major_action_id);
            let mut seen = HashSet::new();
            while let Some(current) = next {
                if current == event_id || !seen.insert(current) {
                    warn!(event_id, major_action_id, "Rejected cyclic major action.");
                    return Err(ServiceError::CyclicReference(event_id));
                }
                let ancestor = Self::get_event(db, current, Scope::WithArchived).await?;
                next = ancestor.major_action_id;
            }
        }

        let mut active: event::ActiveModel = existing.into();
        active.major_action_id = Set(major_action_id);
        Ok(active.update(db).await?)
    }

    pub async fn archive_event(db: &DbConn, event_id: i32) -> Result<event::Model, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::Active).await?;
        let archived = archive::archive::<Event, _>(db, existing).await?;
        info!(event_id, "Event archived.");
        Ok(archived)
    }

    pub async fn unarchive_event(db: &DbConn, event_id: i32) -> Result<event::Model, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::WithArchived).await?;
        let restored = archive::unarchive::<Event, _>(db, existing).await?;
        info!(event_id, "Event unarchived.");
        Ok(restored)
    }

    // --- Participants ---

    pub async fn add_participant(
        db: &DbConn,
        event_id: i32,
        participant_id: i32,
    ) -> Result<(), ServiceError> {
        Self::get_event(db, event_id, Scope::Active).await?;
        ParticipantService::get_participant(db, participant_id, Scope::Active).await?;

        if EventParticipant::find_by_id((event_id, participant_id))
            .one(db)
            .await?
            .is_some()
        {
            debug!(event_id, participant_id, "Participant already attending event.");
            return Ok(());
        }
        let link = event_participant::ActiveModel {
            event_id: Set(event_id),
            participant_id: Set(participant_id),
        };
        EventParticipant::insert(link).exec_without_returning(db).await?;
        Ok(())
    }

    pub async fn remove_participant(
        db: &DbConn,
        event_id: i32,
        participant_id: i32,
    ) -> Result<u64, ServiceError> {
        let result = EventParticipant::delete_by_id((event_id, participant_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn participants(
        db: &DbConn,
        event_id: i32,
        scope: Scope,
    ) -> Result<Vec<participant::Model>, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::WithArchived).await?;
        let mut query = existing.find_related(participant::Entity);
        if scope == Scope::Active {
            query = query.filter(participant::Column::Archived.is_null());
        }
        Ok(query.order_by_asc(participant::Column::Name).all(db).await?)
    }

    /// Number of active participants.
    pub async fn attendee_count(db: &DbConn, event_id: i32) -> Result<u64, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::WithArchived).await?;
        Ok(existing
            .find_related(participant::Entity)
            .filter(participant::Column::Archived.is_null())
            .count(db)
            .await?)
    }

    // --- Tags ---

    pub async fn add_tag(db: &DbConn, event_id: i32, tag_id: i32) -> Result<(), ServiceError> {
        Self::get_event(db, event_id, Scope::Active).await?;
        TagService::get_tag(db, tag_id, Scope::Active).await?;

        if EventTag::find_by_id((event_id, tag_id)).one(db).await?.is_some() {
            return Ok(());
        }
        let link = event_tag::ActiveModel {
            event_id: Set(event_id),
            tag_id: Set(tag_id),
        };
        EventTag::insert(link).exec_without_returning(db).await?;
        Ok(())
    }

    pub async fn remove_tag(db: &DbConn, event_id: i32, tag_id: i32) -> Result<u64, ServiceError> {
        let result = EventTag::delete_by_id((event_id, tag_id)).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn tags(db: &DbConn, event_id: i32, scope: Scope) -> Result<Vec<tag::Model>, ServiceError> {
        let existing = Self::get_event(db, event_id, Scope::WithArchived).await?;
        let mut query = existing.find_related(tag::Entity);
        if scope == Scope::Active {
            query = query.filter(tag::Column::Archived.is_null());
        }
        Ok(query.order_by_asc(tag::Column::Name).all(db).await?)
    }

    // --- Serialization ---

    /// Loads the event, its organizer and every major action above it.
    /// Fails with `CyclicReference` if the stored chain loops.
    pub async fn load_record(
        db: &DbConn,
        event_id: i32,
        scope: Scope,
    ) -> Result<EventRecord, ServiceError> {
        let root = Self::get_event(db, event_id, scope).await?;

        let mut seen = HashSet::from([root.id]);
        let mut next = root.major_action_id;
        let mut chain = vec![root];
        while let Some(current) = next {
            if !seen.insert(current) {
                return Err(ServiceError::CyclicReference(current));
            }
            let ancestor = Self::get_event(db, current, Scope::WithArchived).await?;
            next = ancestor.major_action_id;
            chain.push(ancestor);
        }
        debug!(event_id, depth = chain.len(), "Loaded major action chain.");

        let mut record: Option<Box<EventRecord>> = None;
        for event in chain.into_iter().rev() {
            let organizer = Self::load_organizer(db, &event).await?;
            record = Some(Box::new(EventRecord {
                event,
                organizer,
                major_action: record,
            }));
        }
        record
            .map(|boxed| *boxed)
            .ok_or(ServiceError::not_found("event", event_id))
    }

    async fn load_organizer(
        db: &DbConn,
        event: &event::Model,
    ) -> Result<Option<ParticipantRecord>, ServiceError> {
        match event.organizer_id {
            Some(organizer_id) => {
                let organizer =
                    ParticipantService::get_participant(db, organizer_id, Scope::WithArchived).await?;
                Ok(Some(ParticipantService::record_for(db, organizer).await?))
            }
            None => Ok(None),
        }
    }

    pub async fn serialize_event(
        db: &DbConn,
        event_id: i32,
        scope: Scope,
    ) -> Result<Map<String, Value>, ServiceError> {
        let record = Self::load_record(db, event_id, scope).await?;
        Ok(to_map(&record))
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("Event name must not be empty.".to_string()));
    }
    Ok(())
}
