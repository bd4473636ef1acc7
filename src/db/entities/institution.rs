use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "institutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archived: Option<ChronoDateTimeUtc>,
    #[sea_orm(unique)]
    pub name: String,
    pub inst_street_address: Option<String>,
    pub inst_city_address: Option<String>,
    pub inst_state_address: Option<String>,
    pub inst_zipcode_address: Option<String>,
    pub is_member: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::institution_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::institution_tag::Relation::Institution.def().rev())
    }
}

// Contacts, not members: membership is `participant.institution_id`.
impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        super::institution_contact::Relation::Participant.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::institution_contact::Relation::Institution.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
