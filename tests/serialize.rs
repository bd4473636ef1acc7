mod common;

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{Value, json};
use streetcrm::db::archive::Scope;
use streetcrm::db::entities::{event, phone_number};
use streetcrm::db::models::{EventInput, InstitutionInput, ParticipantInput, PhoneNumberInput};
use streetcrm::db::serialize::DISPLAY_KEY;
use streetcrm::db::services::{
    EventService, InstitutionService, ParticipantService, PhoneNumberService, ServiceError,
    TagService,
};

#[tokio::test]
async fn test_tag_never_serializes_group() {
    let db = common::setup().await;
    let group = common::organizers_group(&db).await;
    let tag = common::tag(&db, group.id, "housing").await;

    let map = TagService::serialize_tag(&db, tag.id, Scope::Active).await.unwrap();
    assert!(!map.contains_key("group"));
    assert!(!map.contains_key("group_id"));
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "archived", "name", "description", "date_created"]);
    assert_eq!(map["name"], json!("housing"));
    assert_eq!(map["archived"], Value::Null);
}

#[tokio::test]
async fn test_participant_without_institution() {
    let db = common::setup().await;
    let maria = common::participant(&db, "Maria Lopez").await;

    let map = ParticipantService::serialize_participant(&db, maria.id, Scope::Active)
        .await
        .unwrap();
    assert_eq!(map["institution"], Value::Null);
    assert_eq!(map["name"], json!("Maria Lopez"));
    assert!(!map.contains_key(DISPLAY_KEY));
}

#[tokio::test]
async fn test_participant_institution_is_nested() {
    let db = common::setup().await;
    let parish = InstitutionService::create_institution(
        &db,
        InstitutionInput {
            name: "St. Rita Parish".to_string(),
            city: Some("Chicago".to_string()),
            is_member: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let maria = ParticipantService::create_participant(
        &db,
        ParticipantInput {
            name: "Maria Lopez".to_string(),
            email: "maria@example.org".to_string(),
            institution_id: Some(parish.id),
            title: Some("Pastor".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let map = ParticipantService::serialize_participant(&db, maria.id, Scope::Active)
        .await
        .unwrap();
    assert_eq!(
        map["institution"],
        json!({
            "id": parish.id,
            "archived": null,
            "name": "St. Rita Parish",
            "inst_street_address": null,
            "inst_city_address": "Chicago",
            "inst_state_address": null,
            "inst_zipcode_address": null,
            "is_member": true,
            "__str__": "St. Rita Parish",
        })
    );
    assert_eq!(map["title"], json!("Pastor"));
}

#[tokio::test]
async fn test_event_organizer_is_nested_with_display_string() {
    let db = common::setup().await;
    let organizer = common::participant(&db, "Dolores Huerta").await;
    let event = EventService::create_event(
        &db,
        EventInput {
            name: "Housing forum".to_string(),
            date: NaiveDate::from_ymd_opt(2015, 6, 4),
            time: NaiveTime::from_hms_opt(18, 30, 0),
            organizer_id: Some(organizer.id),
            location: "Parish hall".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let map = EventService::serialize_event(&db, event.id, Scope::Active).await.unwrap();
    assert_eq!(map["organizer"]["__str__"], json!("Dolores Huerta"));
    assert_eq!(map["organizer"]["name"], json!("Dolores Huerta"));
    assert_eq!(map["organizer"]["institution"], Value::Null);
    assert_eq!(map["date"], json!("2015-06-04"));
    assert_eq!(map["time"], json!("18:30:00"));
    assert_eq!(map["major_action"], Value::Null);
    assert!(!map.contains_key(DISPLAY_KEY));
}

#[tokio::test]
async fn test_archived_reference_still_serializes() {
    let db = common::setup().await;
    let organizer = common::participant(&db, "Dolores Huerta").await;
    let event = EventService::create_event(
        &db,
        EventInput {
            name: "Housing forum".to_string(),
            organizer_id: Some(organizer.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    ParticipantService::archive_participant(&db, organizer.id).await.unwrap();

    let map = EventService::serialize_event(&db, event.id, Scope::Active).await.unwrap();
    assert_eq!(map["organizer"]["__str__"], json!("Dolores Huerta"));
    assert!(map["organizer"]["archived"].is_string());
}

#[tokio::test]
async fn test_major_action_chain_is_nested() {
    let db = common::setup().await;
    let rally = EventService::create_event(
        &db,
        EventInput {
            name: "City hall rally".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let prep = EventService::create_event(
        &db,
        EventInput {
            name: "Rally prep".to_string(),
            is_prep: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    EventService::set_major_action(&db, prep.id, Some(rally.id)).await.unwrap();

    let map = EventService::serialize_event(&db, prep.id, Scope::Active).await.unwrap();
    assert_eq!(map["is_prep"], json!(true));
    assert_eq!(map["major_action"]["id"], json!(rally.id));
    assert_eq!(map["major_action"]["__str__"], json!("City hall rally"));
    assert_eq!(map["major_action"]["major_action"], Value::Null);
}

#[tokio::test]
async fn test_major_action_cycle_is_rejected() {
    let db = common::setup().await;
    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        let event = EventService::create_event(
            &db,
            EventInput {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        ids.push(event.id);
    }

    let itself = EventService::set_major_action(&db, ids[0], Some(ids[0])).await;
    assert!(matches!(itself, Err(ServiceError::CyclicReference(_))));

    EventService::set_major_action(&db, ids[0], Some(ids[1])).await.unwrap();
    EventService::set_major_action(&db, ids[1], Some(ids[2])).await.unwrap();
    let loop_back = EventService::set_major_action(&db, ids[2], Some(ids[0])).await;
    assert!(matches!(loop_back, Err(ServiceError::CyclicReference(_))));

    // Still loads: the chain a -> b -> c ends.
    let map = EventService::serialize_event(&db, ids[0], Scope::Active).await.unwrap();
    assert_eq!(map["major_action"]["major_action"]["name"], json!("c"));
}

#[tokio::test]
async fn test_phone_number_display_by_country_code() {
    let db = common::setup().await;
    let maria = common::participant(&db, "Maria Lopez").await;

    let us = PhoneNumberService::create_phone_number(
        &db,
        PhoneNumberInput {
            phone_number: Some("312-555-0100".to_string()),
            cell: true,
            owner_id: Some(maria.id),
        },
    )
    .await
    .unwrap();
    assert_eq!(us.phone_number.as_deref(), Some("+13125550100"));

    let uk = PhoneNumberService::create_phone_number(
        &db,
        PhoneNumberInput {
            phone_number: Some("+44 20 7946 0958".to_string()),
            cell: false,
            owner_id: Some(maria.id),
        },
    )
    .await
    .unwrap();

    let us_map = PhoneNumberService::serialize_phone_number(&db, us.id).await.unwrap();
    assert_eq!(us_map["phone_number"], json!("(312) 555-0100"));
    assert_eq!(us_map["cell"], json!(true));
    assert_eq!(us_map["owner"]["__str__"], json!("Maria Lopez"));

    let uk_map = PhoneNumberService::serialize_phone_number(&db, uk.id).await.unwrap();
    assert_eq!(uk_map["phone_number"], json!("+44 2079460958"));
}

#[tokio::test]
async fn test_phone_number_without_value() {
    let db = common::setup().await;
    let blank = PhoneNumberService::create_phone_number(
        &db,
        PhoneNumberInput {
            phone_number: Some("   ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(blank.phone_number, None);
    assert_eq!(blank.display(), None);

    let map = PhoneNumberService::serialize_phone_number(&db, blank.id).await.unwrap();
    assert_eq!(map["phone_number"], Value::Null);
    assert_eq!(map["owner"], Value::Null);

    let invalid = PhoneNumberService::create_phone_number(
        &db,
        PhoneNumberInput {
            phone_number: Some("555-0100".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(invalid, Err(ServiceError::InvalidPhoneNumber(_))));
}

#[tokio::test]
async fn test_stored_major_action_cycle_fails_to_load() {
    let db = common::setup().await;
    let rally = EventService::create_event(
        &db,
        EventInput {
            name: "City hall rally".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let prep = EventService::create_event(
        &db,
        EventInput {
            name: "Rally prep".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    EventService::set_major_action(&db, prep.id, Some(rally.id)).await.unwrap();

    // Bypass the service guard to close the loop rally -> prep -> rally.
    let mut looped: event::ActiveModel = rally.into();
    looped.major_action_id = Set(Some(prep.id));
    looped.update(&db).await.unwrap();

    let result = EventService::serialize_event(&db, prep.id, Scope::Active).await;
    assert!(matches!(result, Err(ServiceError::CyclicReference(_))));
}

#[tokio::test]
async fn test_unparseable_stored_phone_number_has_no_display() {
    let db = common::setup().await;
    let maria = common::participant(&db, "Maria Lopez").await;
    let number = PhoneNumberService::create_phone_number(
        &db,
        PhoneNumberInput {
            phone_number: Some("312-555-0100".to_string()),
            cell: true,
            owner_id: Some(maria.id),
        },
    )
    .await
    .unwrap();

    let mut corrupted: phone_number::ActiveModel = number.into();
    corrupted.phone_number = Set(Some("ext. 12".to_string()));
    let corrupted = corrupted.update(&db).await.unwrap();
    assert_eq!(corrupted.display(), None);

    let map = PhoneNumberService::serialize_phone_number(&db, corrupted.id).await.unwrap();
    assert_eq!(map["phone_number"], Value::Null);
    assert_eq!(map["owner"]["__str__"], json!("Maria Lopez"));
}
