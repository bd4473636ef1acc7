//! Archive-instead-of-delete.
//!
//! Archivable rows carry a nullable `archived` timestamp. A null value means
//! the row is active. Default queries only see active rows; callers opt in to
//! archived rows with [`Scope::WithArchived`].

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, Select, Value,
};

use super::entities::{event, institution, participant, tag};

/// Which rows a query sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Active,
    WithArchived,
}

impl Scope {
    pub fn from_include_archived(include_archived: bool) -> Self {
        if include_archived {
            Scope::WithArchived
        } else {
            Scope::Active
        }
    }
}

pub trait Archivable: EntityTrait {
    fn archived_column() -> Self::Column;

    /// Default scope: `archived IS NULL`.
    fn find_active() -> Select<Self> {
        Self::find().filter(Self::archived_column().is_null())
    }

    fn find_with_archived() -> Select<Self> {
        Self::find()
    }

    fn find_in(scope: Scope) -> Select<Self> {
        match scope {
            Scope::Active => Self::find_active(),
            Scope::WithArchived => Self::find_with_archived(),
        }
    }
}

impl Archivable for tag::Entity {
    fn archived_column() -> Self::Column {
        tag::Column::Archived
    }
}

impl Archivable for institution::Entity {
    fn archived_column() -> Self::Column {
        institution::Column::Archived
    }
}

impl Archivable for participant::Entity {
    fn archived_column() -> Self::Column {
        participant::Column::Archived
    }
}

impl Archivable for event::Entity {
    fn archived_column() -> Self::Column {
        event::Column::Archived
    }
}

/// Stamps the row with the current time and persists it.
pub async fn archive<E, C>(db: &C, model: E::Model) -> Result<E::Model, DbErr>
where
    E: Archivable,
    C: ConnectionTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    set_archived::<E, C>(db, model, Some(Utc::now())).await
}

/// Clears the archive stamp and persists the row.
pub async fn unarchive<E, C>(db: &C, model: E::Model) -> Result<E::Model, DbErr>
where
    E: Archivable,
    C: ConnectionTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    set_archived::<E, C>(db, model, None).await
}

async fn set_archived<E, C>(
    db: &C,
    model: E::Model,
    archived: Option<DateTime<Utc>>,
) -> Result<E::Model, DbErr>
where
    E: Archivable,
    C: ConnectionTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    let mut active = model.into_active_model();
    active.set(
        E::archived_column(),
        Value::ChronoDateTimeUtc(archived.map(Box::new)),
    );
    active.update(db).await
}
