//! NFC card coverage across directory users.

use serde::Serialize;
use std::fmt;

use crate::domain::member::MemberStatus;

/// Counts of non-deactivated directory users with and without an NFC card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CardReport {
    pub with_card: usize,
    pub without_card: usize,
}

impl CardReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one directory user. Deactivated users are skipped.
    pub fn record(&mut self, status: MemberStatus, has_card: bool) {
        if status == MemberStatus::Deactivated {
            return;
        }
        if has_card {
            self.with_card += 1;
        } else {
            self.without_card += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.with_card + self.without_card
    }
}

impl fmt::Display for CardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total members:        {:03}", self.total())?;
        writeln!(f, "Members with card:    {:03}", self.with_card)?;
        write!(f, "Members without card: {:03}", self.without_card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deactivated_users_are_not_counted() {
        let mut report = CardReport::new();
        report.record(MemberStatus::Active, true);
        report.record(MemberStatus::Deactivated, true);
        report.record(MemberStatus::Deactivated, false);

        assert_eq!(report.total(), 1);
        assert_eq!(report.with_card, 1);
    }

    #[test]
    fn users_pending_activation_are_counted() {
        let mut report = CardReport::new();
        report.record(MemberStatus::NotActive, false);
        report.record(MemberStatus::Active, false);

        assert_eq!(report.without_card, 2);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn display_pads_counts() {
        let report = CardReport {
            with_card: 7,
            without_card: 12,
        };

        assert_eq!(
            report.to_string(),
            "Total members:        019\nMembers with card:    007\nMembers without card: 012"
        );
    }
}
