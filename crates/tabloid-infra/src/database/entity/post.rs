//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTimeWithTimeZone,
    pub publish_date_time: Option<DateTimeWithTimeZone>,
    pub is_approved: bool,
    pub category_id: i32,
    pub user_profile_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::UserProfileId",
        to = "super::user_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserProfile,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
    #[sea_orm(has_many = "super::post_reaction::Entity")]
    PostReaction,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for tabloid_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            image_location: model.image_location,
            create_date_time: model.create_date_time.into(),
            publish_date_time: model.publish_date_time.map(Into::into),
            is_approved: model.is_approved,
            category_id: model.category_id,
            user_profile_id: model.user_profile_id,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<tabloid_core::domain::Post> for ActiveModel {
    fn from(post: tabloid_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            image_location: Set(post.image_location),
            create_date_time: Set(post.create_date_time.into()),
            publish_date_time: Set(post.publish_date_time.map(Into::into)),
            is_approved: Set(post.is_approved),
            category_id: Set(post.category_id),
            user_profile_id: Set(post.user_profile_id),
        }
    }
}
