use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::entities::{event, institution, participant, phone_number, tag};
use super::serialize::{FieldValue, Serializable};

// --- Loaded graphs ---

/// A participant with its institution loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub participant: participant::Model,
    pub institution: Option<institution::Model>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumberRecord {
    pub phone_number: phone_number::Model,
    pub owner: Option<ParticipantRecord>,
}

/// An event with its organizer and the whole major action chain loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event: event::Model,
    pub organizer: Option<ParticipantRecord>,
    pub major_action: Option<Box<EventRecord>>,
}

impl Serializable for tag::Model {
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::plain(self.id)),
            ("archived", FieldValue::plain(self.archived)),
            ("name", FieldValue::plain(&self.name)),
            ("description", FieldValue::plain(&self.description)),
            ("date_created", FieldValue::plain(self.date_created)),
            ("group", FieldValue::plain(self.group_id)),
        ]
    }

    fn display(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn excluded_fields(&self) -> &'static [&'static str] {
        &["group"]
    }
}

impl Serializable for institution::Model {
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::plain(self.id)),
            ("archived", FieldValue::plain(self.archived)),
            ("name", FieldValue::plain(&self.name)),
            ("inst_street_address", FieldValue::plain(&self.inst_street_address)),
            ("inst_city_address", FieldValue::plain(&self.inst_city_address)),
            ("inst_state_address", FieldValue::plain(&self.inst_state_address)),
            ("inst_zipcode_address", FieldValue::plain(&self.inst_zipcode_address)),
            ("is_member", FieldValue::plain(self.is_member)),
        ]
    }

    fn display(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Serializable for ParticipantRecord {
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let p = &self.participant;
        vec![
            ("id", FieldValue::plain(p.id)),
            ("archived", FieldValue::plain(p.archived)),
            ("name", FieldValue::plain(&p.name)),
            ("email", FieldValue::plain(&p.email)),
            ("participant_street_address", FieldValue::plain(&p.participant_street_address)),
            ("participant_city_address", FieldValue::plain(&p.participant_city_address)),
            ("participant_state_address", FieldValue::plain(&p.participant_state_address)),
            ("participant_zipcode_address", FieldValue::plain(&p.participant_zipcode_address)),
            (
                "institution",
                FieldValue::Reference(self.institution.as_ref().map(|i| i as &dyn Serializable)),
            ),
            ("title", FieldValue::plain(&p.title)),
        ]
    }

    fn display(&self) -> Option<String> {
        Some(self.participant.to_string())
    }
}

impl Serializable for PhoneNumberRecord {
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let p = &self.phone_number;
        vec![
            ("id", FieldValue::plain(p.id)),
            ("phone_number", FieldValue::Phone(p.parsed())),
            ("cell", FieldValue::plain(p.cell)),
            (
                "owner",
                FieldValue::Reference(self.owner.as_ref().map(|o| o as &dyn Serializable)),
            ),
            ("date_created", FieldValue::plain(p.date_created)),
        ]
    }

    fn display(&self) -> Option<String> {
        self.phone_number.display()
    }
}

impl Serializable for EventRecord {
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        let e = &self.event;
        vec![
            ("id", FieldValue::plain(e.id)),
            ("archived", FieldValue::plain(e.archived)),
            ("name", FieldValue::plain(&e.name)),
            ("description", FieldValue::plain(&e.description)),
            ("date", FieldValue::plain(e.date)),
            ("time", FieldValue::plain(e.time)),
            (
                "organizer",
                FieldValue::Reference(self.organizer.as_ref().map(|o| o as &dyn Serializable)),
            ),
            ("location", FieldValue::plain(&e.location)),
            ("issue_area", FieldValue::plain(&e.issue_area)),
            ("is_prep", FieldValue::plain(e.is_prep)),
            (
                "major_action",
                FieldValue::Reference(
                    self.major_action
                        .as_deref()
                        .map(|m| m as &dyn Serializable),
                ),
            ),
        ]
    }

    fn display(&self) -> Option<String> {
        Some(self.event.to_string())
    }
}

// --- Inputs ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagInput {
    pub name: String,
    pub description: Option<String>,
    pub group_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstitutionInput {
    pub name: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    #[serde(default)]
    pub is_member: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantInput {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub institution_id: Option<i32>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    pub name: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub organizer_id: Option<i32>,
    #[serde(default)]
    pub location: String,
    pub issue_area: Option<String>,
    #[serde(default)]
    pub is_prep: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneNumberInput {
    /// Any form accepted by [`crate::phone::PhoneNumber`]'s parser.
    pub phone_number: Option<String>,
    #[serde(default)]
    pub cell: bool,
    pub owner_id: Option<i32>,
}
