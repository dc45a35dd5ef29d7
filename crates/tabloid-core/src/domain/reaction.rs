use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// A reaction type readers can attach to posts (an emoji or image).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: i32,
    pub name: String,
    pub image_location: String,
}

impl Reaction {
    pub fn new(name: String, image_location: String) -> Self {
        Self {
            id: 0,
            name,
            image_location,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, 50)?;
        require_text("imageLocation", &self.image_location, 255)
    }
}

/// One user's reaction on one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReaction {
    pub id: i32,
    pub post_id: i32,
    pub reaction_id: i32,
    pub user_profile_id: i32,
}

impl PostReaction {
    pub fn new(post_id: i32, reaction_id: i32, user_profile_id: i32) -> Self {
        Self {
            id: 0,
            post_id,
            reaction_id,
            user_profile_id,
        }
    }
}

/// Read-side tally of one reaction type on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub reaction: Reaction,
    pub count: u64,
}

impl ReactionCount {
    /// Tally `post_reactions` against every known reaction type.
    ///
    /// Every reaction type appears in the result, in the order given,
    /// including those nobody used.
    pub fn tally(reactions: Vec<Reaction>, post_reactions: &[PostReaction]) -> Vec<ReactionCount> {
        reactions
            .into_iter()
            .map(|reaction| {
                let count = post_reactions
                    .iter()
                    .filter(|pr| pr.reaction_id == reaction.id)
                    .count() as u64;
                ReactionCount { reaction, count }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reaction(id: i32, name: &str) -> Reaction {
        Reaction {
            id,
            name: name.to_string(),
            image_location: format!("/img/{name}.png"),
        }
    }

    #[test]
    fn test_tally_includes_unused_reactions() {
        let reactions = vec![reaction(1, "like"), reaction(2, "laugh")];
        let post_reactions = vec![
            PostReaction {
                id: 1,
                post_id: 9,
                reaction_id: 1,
                user_profile_id: 3,
            },
            PostReaction {
                id: 2,
                post_id: 9,
                reaction_id: 1,
                user_profile_id: 4,
            },
        ];

        let counts = ReactionCount::tally(reactions, &post_reactions);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].reaction.name, "like");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].count, 0);
    }
}
