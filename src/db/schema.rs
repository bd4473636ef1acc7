//! Table creation straight from the entity definitions.
//!
//! Used by `streetcrm init-db` and by the integration tests. It only ever
//! creates missing tables; it does not alter existing ones.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::debug;

use super::entities::prelude::*;

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    debug!(table = %table, "Ensured table exists.");
    Ok(())
}

/// Creates every CRM table that does not exist yet, parents before children.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, Group).await?;
    create_table(db, Tag).await?;
    create_table(db, Institution).await?;
    create_table(db, Participant).await?;
    create_table(db, PhoneNumber).await?;
    create_table(db, Event).await?;
    create_table(db, InstitutionTag).await?;
    create_table(db, InstitutionContact).await?;
    create_table(db, EventParticipant).await?;
    create_table(db, EventTag).await?;
    Ok(())
}
