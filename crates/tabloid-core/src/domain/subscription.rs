use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// End date older clients use to mark a subscription as still running.
pub const LEGACY_ACTIVE_END_DATE: &str = "9999-12-31T23:59:59.997";

/// Wire-level subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Ended,
}

/// Whether a subscription is running, and since when it stopped if not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionState {
    Active,
    Ended { at: DateTime<Utc> },
}

impl SubscriptionState {
    pub fn status(&self) -> SubscriptionStatus {
        match self {
            SubscriptionState::Active => SubscriptionStatus::Active,
            SubscriptionState::Ended { .. } => SubscriptionStatus::Ended,
        }
    }

    pub fn end_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            SubscriptionState::Active => None,
            SubscriptionState::Ended { at } => Some(*at),
        }
    }

    /// Rebuild the state from a stored nullable end date.
    pub fn from_end_date_time(end: Option<DateTime<Utc>>) -> Self {
        match end {
            None => SubscriptionState::Active,
            Some(at) => SubscriptionState::Ended { at },
        }
    }

    /// Interpret an `endDateTime` string sent by a client.
    ///
    /// The legacy far-future marker means "active"; anything else means the
    /// client wants the subscription ended.
    pub fn requested_by_end_date(end_date_time: &str) -> SubscriptionStatus {
        if end_date_time.starts_with(&LEGACY_ACTIVE_END_DATE[..10]) {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Ended
        }
    }
}

/// A directed follow relationship from a subscriber to a provider (author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i32,
    pub subscriber_user_profile_id: i32,
    pub provider_user_profile_id: i32,
    pub begin_date_time: DateTime<Utc>,
    pub state: SubscriptionState,
}

impl Subscription {
    pub fn new(subscriber_user_profile_id: i32, provider_user_profile_id: i32) -> Self {
        Self {
            id: 0,
            subscriber_user_profile_id,
            provider_user_profile_id,
            begin_date_time: Utc::now(),
            state: SubscriptionState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SubscriptionState::Active
    }

    /// End the subscription. Ending twice keeps the first end date.
    pub fn end(&mut self, at: DateTime<Utc>) {
        if self.is_active() {
            self.state = SubscriptionState::Ended { at };
        }
    }

    /// Start the subscription again on the same row.
    pub fn reactivate(&mut self, at: DateTime<Utc>) {
        if !self.is_active() {
            self.state = SubscriptionState::Active;
            self.begin_date_time = at;
        }
    }

    /// Move to the requested status. Repeating a request changes nothing.
    pub fn apply(&mut self, requested: SubscriptionStatus, at: DateTime<Utc>) {
        match requested {
            SubscriptionStatus::Active => self.reactivate(at),
            SubscriptionStatus::Ended => self.end(at),
        }
    }
}

/// What the subscribe button next to an author should do for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    /// No relationship yet: create one.
    Subscribe,
    /// Running subscription: end it.
    Unsubscribe,
    /// Ended subscription: reactivate the existing row.
    Resubscribe,
}

impl SubscriptionAction {
    pub fn for_relationship(existing: Option<&Subscription>) -> Self {
        match existing {
            None => SubscriptionAction::Subscribe,
            Some(sub) if sub.is_active() => SubscriptionAction::Unsubscribe,
            Some(_) => SubscriptionAction::Resubscribe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_double_end_keeps_first_end_date() {
        let mut sub = Subscription::new(1, 2);
        let first = Utc::now();
        sub.end(first);
        sub.end(first + Duration::minutes(5));

        assert_eq!(sub.state, SubscriptionState::Ended { at: first });
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut sub = Subscription::new(1, 2);
        let ended_at = Utc::now();

        sub.apply(SubscriptionStatus::Ended, ended_at);
        sub.apply(SubscriptionStatus::Ended, ended_at + Duration::minutes(1));
        assert_eq!(sub.state, SubscriptionState::Ended { at: ended_at });

        let resumed_at = ended_at + Duration::minutes(2);
        sub.apply(SubscriptionStatus::Active, resumed_at);
        sub.apply(SubscriptionStatus::Active, resumed_at + Duration::minutes(1));
        assert!(sub.is_active());
        assert_eq!(sub.begin_date_time, resumed_at);
    }

    #[test]
    fn test_action_for_relationship() {
        let mut sub = Subscription::new(1, 2);
        assert_eq!(
            SubscriptionAction::for_relationship(None),
            SubscriptionAction::Subscribe
        );
        assert_eq!(
            SubscriptionAction::for_relationship(Some(&sub)),
            SubscriptionAction::Unsubscribe
        );
        sub.end(Utc::now());
        assert_eq!(
            SubscriptionAction::for_relationship(Some(&sub)),
            SubscriptionAction::Resubscribe
        );
    }

    #[test]
    fn test_legacy_end_date_marker() {
        assert_eq!(
            SubscriptionState::requested_by_end_date(LEGACY_ACTIVE_END_DATE),
            SubscriptionStatus::Active
        );
        assert_eq!(
            SubscriptionState::requested_by_end_date("2024-03-01T10:00:00"),
            SubscriptionStatus::Ended
        );
    }

    #[test]
    fn test_state_round_trips_through_end_date() {
        let at = Utc::now();
        let ended = SubscriptionState::Ended { at };
        assert_eq!(
            SubscriptionState::from_end_date_time(ended.end_date_time()),
            ended
        );
        assert_eq!(
            SubscriptionState::from_end_date_time(None),
            SubscriptionState::Active
        );
    }
}
