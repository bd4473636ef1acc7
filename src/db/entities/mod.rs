//! SeaORM entities for the CRM tables.
//!
//! Each entity lives in its own module. Many-to-many relations are backed by
//! the `*_tag`, `*_contact` and `event_participant` join entities.

pub mod group;
pub mod tag;
pub mod institution;
pub mod institution_tag;
pub mod institution_contact;
pub mod participant;
pub mod phone_number;
pub mod event;
pub mod event_participant;
pub mod event_tag;

// Prelude module for easy importing of all entities and their related types
pub mod prelude {
    pub use super::group::Entity as Group;
    pub use super::group::Model as GroupModel;
    pub use super::group::ActiveModel as GroupActiveModel;
    pub use super::group::Column as GroupColumn;

    pub use super::tag::Entity as Tag;
    pub use super::tag::Model as TagModel;
    pub use super::tag::ActiveModel as TagActiveModel;
    pub use super::tag::Column as TagColumn;

    pub use super::institution::Entity as Institution;
    pub use super::institution::Model as InstitutionModel;
    pub use super::institution::ActiveModel as InstitutionActiveModel;
    pub use super::institution::Column as InstitutionColumn;

    pub use super::institution_tag::Entity as InstitutionTag;
    pub use super::institution_tag::Model as InstitutionTagModel;
    pub use super::institution_tag::ActiveModel as InstitutionTagActiveModel;
    pub use super::institution_tag::Column as InstitutionTagColumn;

    pub use super::institution_contact::Entity as InstitutionContact;
    pub use super::institution_contact::Model as InstitutionContactModel;
    pub use super::institution_contact::ActiveModel as InstitutionContactActiveModel;
    pub use super::institution_contact::Column as InstitutionContactColumn;

    pub use super::participant::Entity as Participant;
    pub use super::participant::Model as ParticipantModel;
    pub use super::participant::ActiveModel as ParticipantActiveModel;
    pub use super::participant::Column as ParticipantColumn;

    pub use super::phone_number::Entity as PhoneNumber;
    pub use super::phone_number::Model as PhoneNumberModel;
    pub use super::phone_number::ActiveModel as PhoneNumberActiveModel;
    pub use super::phone_number::Column as PhoneNumberColumn;

    pub use super::event::Entity as Event;
    pub use super::event::Model as EventModel;
    pub use super::event::ActiveModel as EventActiveModel;
    pub use super::event::Column as EventColumn;

    pub use super::event_participant::Entity as EventParticipant;
    pub use super::event_participant::Model as EventParticipantModel;
    pub use super::event_participant::ActiveModel as EventParticipantActiveModel;
    pub use super::event_participant::Column as EventParticipantColumn;

    pub use super::event_tag::Entity as EventTag;
    pub use super::event_tag::Model as EventTagModel;
    pub use super::event_tag::ActiveModel as EventTagActiveModel;
    pub use super::event_tag::Column as EventTagColumn;
}
