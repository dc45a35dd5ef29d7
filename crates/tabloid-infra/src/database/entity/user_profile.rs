//! UserProfile entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use tabloid_core::domain::UserType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub firebase_user_id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTimeWithTimeZone,
    pub user_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain UserProfile.
impl From<Model> for tabloid_core::domain::UserProfile {
    fn from(model: Model) -> Self {
        let user_type = UserType::try_from(model.user_type_id).unwrap_or_else(|_| {
            tracing::warn!(
                user_profile_id = model.id,
                user_type_id = model.user_type_id,
                "Unknown user type, treating profile as a regular author"
            );
            UserType::Author
        });

        Self {
            id: model.id,
            firebase_user_id: model.firebase_user_id,
            display_name: model.display_name,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            image_location: model.image_location,
            create_date_time: model.create_date_time.into(),
            user_type,
        }
    }
}

/// Conversion from Domain UserProfile to SeaORM ActiveModel.
impl From<tabloid_core::domain::UserProfile> for ActiveModel {
    fn from(user: tabloid_core::domain::UserProfile) -> Self {
        Self {
            id: Set(user.id),
            firebase_user_id: Set(user.firebase_user_id),
            display_name: Set(user.display_name),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            image_location: Set(user.image_location),
            create_date_time: Set(user.create_date_time.into()),
            user_type_id: Set(user.user_type.id()),
        }
    }
}
