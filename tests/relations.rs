mod common;

use chrono::NaiveDate;
use streetcrm::db::archive::Scope;
use streetcrm::db::models::{EventInput, InstitutionInput};
use streetcrm::db::services::{EventService, InstitutionService, ParticipantService, TagService};

async fn event_on(db: &sea_orm::DatabaseConnection, name: &str, date: Option<NaiveDate>) -> i32 {
    EventService::create_event(
        db,
        EventInput {
            name: name.to_string(),
            date,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_participant_events_newest_first_and_active_only() {
    let db = common::setup().await;
    let maria = common::participant(&db, "Maria Lopez").await;
    let older = event_on(&db, "Spring meeting", NaiveDate::from_ymd_opt(2015, 3, 1)).await;
    let newer = event_on(&db, "Summer rally", NaiveDate::from_ymd_opt(2015, 7, 1)).await;
    let dropped = event_on(&db, "Cancelled", NaiveDate::from_ymd_opt(2015, 8, 1)).await;

    for id in [older, newer, dropped] {
        EventService::add_participant(&db, id, maria.id).await.unwrap();
    }
    EventService::archive_event(&db, dropped).await.unwrap();

    let events = ParticipantService::events(&db, maria.id).await.unwrap();
    let ids: Vec<i32> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newer, older]);
}

#[tokio::test]
async fn test_attendee_count_ignores_archived_and_duplicates() {
    let db = common::setup().await;
    let event = event_on(&db, "Budget hearing", None).await;
    let a = common::participant(&db, "Ana").await;
    let b = common::participant(&db, "Ben").await;

    EventService::add_participant(&db, event, a.id).await.unwrap();
    EventService::add_participant(&db, event, a.id).await.unwrap();
    EventService::add_participant(&db, event, b.id).await.unwrap();
    assert_eq!(EventService::attendee_count(&db, event).await.unwrap(), 2);

    ParticipantService::archive_participant(&db, b.id).await.unwrap();
    assert_eq!(EventService::attendee_count(&db, event).await.unwrap(), 1);
    assert_eq!(
        EventService::participants(&db, event, Scope::WithArchived)
            .await
            .unwrap()
            .len(),
        2
    );

    assert_eq!(EventService::remove_participant(&db, event, a.id).await.unwrap(), 1);
    assert_eq!(EventService::attendee_count(&db, event).await.unwrap(), 0);
}

#[tokio::test]
async fn test_event_and_institution_tags() {
    let db = common::setup().await;
    let group = common::organizers_group(&db).await;
    let housing = common::tag(&db, group.id, "housing").await;
    let schools = common::tag(&db, group.id, "schools").await;
    let event = event_on(&db, "Forum", None).await;
    let parish = InstitutionService::create_institution(
        &db,
        InstitutionInput {
            name: "St. Rita Parish".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    EventService::add_tag(&db, event, schools.id).await.unwrap();
    EventService::add_tag(&db, event, housing.id).await.unwrap();
    InstitutionService::add_tag(&db, parish.id, housing.id).await.unwrap();

    let names: Vec<String> = EventService::tags(&db, event, Scope::Active)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["housing", "schools"]);

    TagService::archive_tag(&db, housing.id).await.unwrap();
    assert_eq!(EventService::tags(&db, event, Scope::Active).await.unwrap().len(), 1);
    assert!(
        InstitutionService::tags(&db, parish.id, Scope::Active)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        InstitutionService::tags(&db, parish.id, Scope::WithArchived)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_institution_contacts_are_separate_from_membership() {
    let db = common::setup().await;
    let parish = InstitutionService::create_institution(
        &db,
        InstitutionInput {
            name: "St. Rita Parish".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let maria = common::participant(&db, "Maria Lopez").await;

    InstitutionService::add_contact(&db, parish.id, maria.id).await.unwrap();
    let contacts = InstitutionService::contacts(&db, parish.id, Scope::Active).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].institution_id, None);

    let member = ParticipantService::set_institution(&db, maria.id, Some(parish.id))
        .await
        .unwrap();
    assert_eq!(member.institution_id, Some(parish.id));

    assert_eq!(InstitutionService::remove_contact(&db, parish.id, maria.id).await.unwrap(), 1);
    assert!(
        InstitutionService::contacts(&db, parish.id, Scope::Active)
            .await
            .unwrap()
            .is_empty()
    );
}
