//! High-level API over the CRM tables.
//!
//! One stateless service per entity. Every service hides archived rows unless
//! the caller passes [`Scope::WithArchived`](crate::db::archive::Scope) and
//! none of them exposes a hard delete.

pub mod error;
pub mod event_service;
pub mod group_service;
pub mod institution_service;
pub mod participant_service;
pub mod phone_number_service;
pub mod tag_service;

pub use error::ServiceError;
pub use event_service::EventService;
pub use group_service::GroupService;
pub use institution_service::InstitutionService;
pub use participant_service::ParticipantService;
pub use phone_number_service::PhoneNumberService;
pub use tag_service::TagService;
