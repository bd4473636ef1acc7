//! Operator commands behind the `streetcrm` binary.

use clap::{Parser, Subcommand, ValueEnum};
use sea_orm::DbConn;
use serde_json::{Map, Value};

use crate::db::archive::Scope;
use crate::db::schema;
use crate::db::services::{
    EventService, InstitutionService, ParticipantService, PhoneNumberService, ServiceError,
    TagService,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create any missing tables
    InitDb,
    /// List records by display string
    List {
        kind: Kind,
        #[arg(long)]
        include_archived: bool,
    },
    /// Print a record as JSON
    Show {
        kind: Kind,
        id: i32,
        #[arg(long)]
        include_archived: bool,
    },
    Archive { kind: Kind, id: i32 },
    Unarchive { kind: Kind, id: i32 },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Tag,
    Institution,
    Participant,
    Event,
    Phone,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Tag => "tag",
            Kind::Institution => "institution",
            Kind::Participant => "participant",
            Kind::Event => "event",
            Kind::Phone => "phone",
        }
    }
}

fn line(id: i32, display: impl std::fmt::Display, archived: bool) -> String {
    if archived {
        format!("{id}\t{display}\t(archived)")
    } else {
        format!("{id}\t{display}")
    }
}

/// Runs one command and returns the lines to print.
pub async fn execute(db: &DbConn, command: &Command) -> Result<Vec<String>, ServiceError> {
    match command {
        Command::InitDb => {
            schema::create_tables(db).await?;
            Ok(vec!["Tables are up to date.".to_string()])
        }
        Command::List {
            kind,
            include_archived,
        } => list(db, *kind, Scope::from_include_archived(*include_archived)).await,
        Command::Show {
            kind,
            id,
            include_archived,
        } => {
            let map = show(db, *kind, *id, Scope::from_include_archived(*include_archived)).await?;
            let json = serde_json::to_string_pretty(&Value::Object(map))
                .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
            Ok(vec![json])
        }
        Command::Archive { kind, id } => {
            let display = match kind {
                Kind::Tag => TagService::archive_tag(db, *id).await?.to_string(),
                Kind::Institution => InstitutionService::archive_institution(db, *id).await?.to_string(),
                Kind::Participant => ParticipantService::archive_participant(db, *id).await?.to_string(),
                Kind::Event => EventService::archive_event(db, *id).await?.to_string(),
                Kind::Phone => return Err(not_archivable()),
            };
            Ok(vec![format!("Archived {} {id}: {display}", kind.label())])
        }
        Command::Unarchive { kind, id } => {
            let display = match kind {
                Kind::Tag => TagService::unarchive_tag(db, *id).await?.to_string(),
                Kind::Institution => InstitutionService::unarchive_institution(db, *id).await?.to_string(),
                Kind::Participant => ParticipantService::unarchive_participant(db, *id).await?.to_string(),
                Kind::Event => EventService::unarchive_event(db, *id).await?.to_string(),
                Kind::Phone => return Err(not_archivable()),
            };
            Ok(vec![format!("Restored {} {id}: {display}", kind.label())])
        }
    }
}

fn not_archivable() -> ServiceError {
    ServiceError::InvalidInput("Phone numbers cannot be archived.".to_string())
}

async fn list(db: &DbConn, kind: Kind, scope: Scope) -> Result<Vec<String>, ServiceError> {
    let lines = match kind {
        Kind::Tag => TagService::list_tags(db, scope)
            .await?
            .into_iter()
            .map(|t| line(t.id, &t, t.archived.is_some()))
            .collect(),
        Kind::Institution => InstitutionService::list_institutions(db, scope)
            .await?
            .into_iter()
            .map(|i| line(i.id, &i, i.archived.is_some()))
            .collect(),
        Kind::Participant => ParticipantService::list_participants(db, scope)
            .await?
            .into_iter()
            .map(|p| line(p.id, &p, p.archived.is_some()))
            .collect(),
        Kind::Event => EventService::list_events(db, scope)
            .await?
            .into_iter()
            .map(|e| line(e.id, &e, e.archived.is_some()))
            .collect(),
        Kind::Phone => {
            return Err(ServiceError::InvalidInput(
                "Phone numbers are listed per participant; use `show participant`.".to_string(),
            ));
        }
    };
    Ok(lines)
}

async fn show(db: &DbConn, kind: Kind, id: i32, scope: Scope) -> Result<Map<String, Value>, ServiceError> {
    match kind {
        Kind::Tag => TagService::serialize_tag(db, id, scope).await,
        Kind::Institution => InstitutionService::serialize_institution(db, id, scope).await,
        Kind::Participant => ParticipantService::serialize_participant(db, id, scope).await,
        Kind::Event => EventService::serialize_event(db, id, scope).await,
        Kind::Phone => PhoneNumberService::serialize_phone_number(db, id).await,
    }
}
