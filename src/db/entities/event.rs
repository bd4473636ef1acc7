use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An organizing action. Prep meetings point at the major action they
/// lead up to through `major_action_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archived: Option<ChronoDateTimeUtc>,
    pub name: String,
    pub description: Option<String>,
    pub date: Option<ChronoDate>,
    pub time: Option<ChronoTime>,
    pub organizer_id: Option<i32>,
    pub location: String,
    pub issue_area: Option<String>,
    pub is_prep: bool,
    pub major_action_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::participant::Entity",
        from = "Column::OrganizerId",
        to = "super::participant::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Organizer,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::MajorActionId",
        to = "Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    MajorAction,
}

// Attendees, through `event_participants`. The organizer is loaded by id.
impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_participant::Relation::Participant.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::event_participant::Relation::Event.def().rev())
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::event_tag::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
