//! HTTP handlers and route configuration.

mod category;
mod comment;
mod health;
mod post;
mod reaction;
mod subscription;
mod tag;
mod user_profile;

use actix_web::web;

use tabloid_core::domain::{UserProfile, UserType};
use tabloid_core::policy::require_role;

use crate::middleware::AppResult;
use crate::middleware::error::json_error_handler;

/// Reject callers that are not moderators.
pub(crate) fn require_moderator(user: &UserProfile, action: &str) -> AppResult<()> {
    require_role(user, UserType::Admin).map_err(|e| {
        tracing::warn!(user_id = user.id, action, "Rejected non-moderator");
        e.into()
    })
}

/// Configure all application routes.
///
/// Literal segments are registered before `{id}` captures in each scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/userprofile")
                        .route("", web::get().to(user_profile::list))
                        .route("", web::post().to(user_profile::register))
                        .route("/me", web::get().to(user_profile::me))
                        .route(
                            "/{firebaseUserId}",
                            web::get().to(user_profile::get_by_firebase_id),
                        ),
                )
                .service(
                    web::scope("/post")
                        .route("", web::get().to(post::list))
                        .route("", web::post().to(post::create))
                        .route("/Home", web::get().to(post::home))
                        .route("/UnapprovedPosts", web::get().to(post::unapproved))
                        .route("/subscribed", web::get().to(post::subscribed))
                        .route("/getbytag/{tagId}", web::get().to(post::get_by_tag))
                        .route("/getbyuser/{id}", web::get().to(post::get_by_user))
                        .route("/approval/{id}", web::put().to(post::approve))
                        .route("/{id}", web::get().to(post::get_by_id))
                        .route("/{id}", web::put().to(post::update))
                        .route("/{id}", web::delete().to(post::delete)),
                )
                .service(
                    web::scope("/comment")
                        .route("", web::post().to(comment::create))
                        .route("/{postId}", web::get().to(comment::list_for_post))
                        .route("/{id}", web::put().to(comment::update))
                        .route("/{id}", web::delete().to(comment::delete)),
                )
                .service(
                    web::scope("/tag")
                        .route("", web::get().to(tag::list))
                        .route("", web::post().to(tag::create))
                        .route("/{id}", web::get().to(tag::get_by_id))
                        .route("/{id}", web::put().to(tag::update))
                        .route("/{id}", web::delete().to(tag::deactivate)),
                )
                .service(
                    web::scope("/posttag")
                        .route("", web::post().to(tag::add_to_post))
                        .route("/{postId}", web::get().to(tag::list_for_post))
                        .route("/{id}", web::delete().to(tag::remove_from_post)),
                )
                .service(
                    web::scope("/category")
                        .route("", web::get().to(category::list))
                        .route("", web::post().to(category::create))
                        .route("/{id}", web::get().to(category::get_by_id))
                        .route("/{id}", web::put().to(category::update))
                        .route("/{id}", web::delete().to(category::delete)),
                )
                .service(
                    web::scope("/reaction")
                        .route("", web::get().to(reaction::list))
                        .route("", web::post().to(reaction::create)),
                )
                .service(
                    web::scope("/postreaction")
                        .route("", web::post().to(reaction::react))
                        .route("/{id}", web::delete().to(reaction::unreact)),
                )
                .service(
                    web::scope("/subscription")
                        .route("", web::post().to(subscription::subscribe))
                        .route("/provider/{providerId}", web::get().to(subscription::lookup))
                        .route("/{userProfileId}", web::get().to(subscription::list_for_subscriber))
                        .route("/{id}", web::put().to(subscription::update)),
                ),
        );
}
