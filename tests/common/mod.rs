#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use streetcrm::db::entities::{group, participant, tag};
use streetcrm::db::models::{ParticipantInput, TagInput};
use streetcrm::db::schema;
use streetcrm::db::services::{GroupService, ParticipantService, TagService};

/// Fresh in-memory database with every table created. A single connection
/// keeps the in-memory database alive for the whole test.
pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    schema::create_tables(&db).await.unwrap();
    db
}

pub async fn organizers_group(db: &DatabaseConnection) -> group::Model {
    GroupService::create_group(db, "Organizers".to_string())
        .await
        .unwrap()
}

pub async fn tag(db: &DatabaseConnection, group_id: i32, name: &str) -> tag::Model {
    TagService::create_tag(
        db,
        TagInput {
            name: name.to_string(),
            description: None,
            group_id,
        },
    )
    .await
    .unwrap()
}

pub async fn participant(db: &DatabaseConnection, name: &str) -> participant::Model {
    ParticipantService::create_participant(
        db,
        ParticipantInput {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}
