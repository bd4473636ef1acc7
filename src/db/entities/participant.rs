use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person who can take part in an event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archived: Option<ChronoDateTimeUtc>,
    pub name: String,
    pub email: String,
    pub participant_street_address: Option<String>,
    pub participant_city_address: Option<String>,
    pub participant_state_address: Option<String>,
    pub participant_zipcode_address: Option<String>,
    pub institution_id: Option<i32>,
    pub title: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institution::Entity",
        from = "Column::InstitutionId",
        to = "super::institution::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Institution,
    #[sea_orm(has_many = "super::phone_number::Entity")]
    PhoneNumbers,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::phone_number::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhoneNumbers.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_participant::Relation::Event.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::event_participant::Relation::Participant.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
