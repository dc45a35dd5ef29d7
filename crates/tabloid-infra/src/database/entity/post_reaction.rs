//! PostReaction join entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    pub reaction_id: i32,
    pub user_profile_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::reaction::Entity",
        from = "Column::ReactionId",
        to = "super::reaction::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Reaction,
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::UserProfileId",
        to = "super::user_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserProfile,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tabloid_core::domain::PostReaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            reaction_id: model.reaction_id,
            user_profile_id: model.user_profile_id,
        }
    }
}

impl From<tabloid_core::domain::PostReaction> for ActiveModel {
    fn from(post_reaction: tabloid_core::domain::PostReaction) -> Self {
        Self {
            id: Set(post_reaction.id),
            post_id: Set(post_reaction.post_id),
            reaction_id: Set(post_reaction.reaction_id),
            user_profile_id: Set(post_reaction.user_profile_id),
        }
    }
}
