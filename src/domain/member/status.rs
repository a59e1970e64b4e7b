//! Member lifecycle status state machine.
//!
//! ```text
//! NotActive ──subscription created──▶ Active ──subscription deleted──▶ Deactivated
//!                                       ▲                                   │
//!                                       └────────subscription created───────┘
//! ```
//!
//! Members are never deleted, only deactivated.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Known customer without a running subscription.
    NotActive,

    /// Paying member with (or about to get) a directory entry.
    Active,

    /// Former member. The directory entry, if any, is disabled and
    /// its external id retained.
    Deactivated,
}

impl MemberStatus {
    /// Returns true if this status grants physical access.
    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }

    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::NotActive => "not_active",
            MemberStatus::Active => "active",
            MemberStatus::Deactivated => "deactivated",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_active" => Some(MemberStatus::NotActive),
            "active" => Some(MemberStatus::Active),
            "deactivated" => Some(MemberStatus::Deactivated),
            _ => None,
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for MemberStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MemberStatus::*;
        matches!(
            (self, target),
            (NotActive, Active)
                | (NotActive, Deactivated)
                // Re-activation retries a directory mirror that failed earlier
                | (Active, Active)
                | (Active, Deactivated)
                | (Deactivated, Active)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_active_can_become_active() {
        let status = MemberStatus::NotActive;
        assert_eq!(
            status.transition_to(MemberStatus::Active),
            Ok(MemberStatus::Active)
        );
    }

    #[test]
    fn deactivated_can_be_reactivated() {
        assert!(MemberStatus::Deactivated.can_transition_to(&MemberStatus::Active));
    }

    #[test]
    fn active_can_be_deactivated() {
        assert!(MemberStatus::Active.can_transition_to(&MemberStatus::Deactivated));
    }

    #[test]
    fn deactivated_cannot_be_deactivated_again() {
        assert!(MemberStatus::Deactivated
            .transition_to(MemberStatus::Deactivated)
            .is_err());
    }

    #[test]
    fn nothing_returns_to_not_active() {
        for status in [
            MemberStatus::NotActive,
            MemberStatus::Active,
            MemberStatus::Deactivated,
        ] {
            assert!(!status.can_transition_to(&MemberStatus::NotActive));
        }
    }

    #[test]
    fn only_active_grants_access() {
        assert!(MemberStatus::Active.is_active());
        assert!(!MemberStatus::NotActive.is_active());
        assert!(!MemberStatus::Deactivated.is_active());
    }

    #[test]
    fn storage_representation_round_trips() {
        for status in [
            MemberStatus::NotActive,
            MemberStatus::Active,
            MemberStatus::Deactivated,
        ] {
            assert_eq!(MemberStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MemberStatus::parse("ACTIVE"), Some(MemberStatus::Active));
        assert_eq!(MemberStatus::parse("pending"), None);
    }

    #[test]
    fn serializes_in_snake_case() {
        let json = serde_json::to_string(&MemberStatus::NotActive).unwrap();
        assert_eq!(json, "\"not_active\"");
    }
}
