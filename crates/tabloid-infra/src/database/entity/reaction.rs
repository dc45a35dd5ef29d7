//! Reaction entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image_location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_reaction::Entity")]
    PostReaction,
}

impl Related<super::post_reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostReaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tabloid_core::domain::Reaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            image_location: model.image_location,
        }
    }
}

impl From<tabloid_core::domain::Reaction> for ActiveModel {
    fn from(reaction: tabloid_core::domain::Reaction) -> Self {
        Self {
            id: Set(reaction.id),
            name: Set(reaction.name),
            image_location: Set(reaction.image_location),
        }
    }
}
