//! Subscription entity for SeaORM.
//!
//! A NULL `end_date_time` means the subscription is active.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use tabloid_core::domain::SubscriptionState;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subscriber_user_profile_id: i32,
    pub provider_user_profile_id: i32,
    pub begin_date_time: DateTimeWithTimeZone,
    pub end_date_time: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::SubscriberUserProfileId",
        to = "super::user_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subscriber,
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::ProviderUserProfileId",
        to = "super::user_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Provider,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tabloid_core::domain::Subscription {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            subscriber_user_profile_id: model.subscriber_user_profile_id,
            provider_user_profile_id: model.provider_user_profile_id,
            begin_date_time: model.begin_date_time.into(),
            state: SubscriptionState::from_end_date_time(model.end_date_time.map(Into::into)),
        }
    }
}

impl From<tabloid_core::domain::Subscription> for ActiveModel {
    fn from(sub: tabloid_core::domain::Subscription) -> Self {
        Self {
            id: Set(sub.id),
            subscriber_user_profile_id: Set(sub.subscriber_user_profile_id),
            provider_user_profile_id: Set(sub.provider_user_profile_id),
            begin_date_time: Set(sub.begin_date_time.into()),
            end_date_time: Set(sub.state.end_date_time().map(Into::into)),
        }
    }
}
