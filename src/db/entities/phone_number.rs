use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::phone::PhoneNumber;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phone_numbers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// E.164 form, e.g. `+13125550100`.
    pub phone_number: Option<String>,
    pub cell: bool,
    pub owner_id: Option<i32>,
    pub date_created: Option<ChronoDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::participant::Entity",
        from = "Column::OwnerId",
        to = "super::participant::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Owner,
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parsed form of the stored number. `None` when no number is set or the
    /// stored value is not a valid E.164 string.
    pub fn parsed(&self) -> Option<PhoneNumber> {
        self.phone_number.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// National format for country code 1, international otherwise. A stored
    /// value that no longer parses has no display form.
    pub fn display(&self) -> Option<String> {
        let number = self.parsed();
        if number.is_none() && self.phone_number.is_some() {
            warn!(phone_number_id = self.id, "Stored phone number is not valid E.164.");
        }
        number.map(|n| n.to_string())
    }
}
