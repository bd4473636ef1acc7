use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archived: Option<ChronoDateTimeUtc>,
    #[sea_orm(unique, column_type = "String(StringLen::N(15))")]
    pub name: String,
    pub description: Option<String>,
    pub date_created: Option<ChronoDate>,
    pub group_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        super::institution_tag::Relation::Institution.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::institution_tag::Relation::Tag.def().rev())
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_tag::Relation::Event.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::event_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
