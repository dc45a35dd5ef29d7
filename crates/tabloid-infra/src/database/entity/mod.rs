//! SeaORM entities, one per table.

pub mod category;
pub mod comment;
pub mod post;
pub mod post_reaction;
pub mod post_tag;
pub mod reaction;
pub mod subscription;
pub mod tag;
pub mod user_profile;
