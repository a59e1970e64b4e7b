//! Member aggregate entity.
//!
//! A member is tracked both by the membership source (keyed by
//! [`MemberId`]) and by the access-control directory (keyed by
//! [`ExternalId`]). The external id is the join key between the two and,
//! once assigned, never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    CustomerId, ExternalId, MemberId, StateMachine, ValidationError,
};

use super::MemberStatus;

/// Display name split into the directory's first/last fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

impl PersonName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Splits a single full name at the first space.
    ///
    /// `"Ada King Lovelace"` becomes first `"Ada"`, last `"King Lovelace"`.
    pub fn from_full_name(full_name: &str) -> Self {
        let full_name = full_name.trim();
        match full_name.split_once(' ') {
            Some((first, last)) => Self::new(first, last.trim_start()),
            None => Self::new(full_name, ""),
        }
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// The fields reconciliation compares: who the member is and whether
/// they currently hold access. Directory ids are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberIdentity {
    pub id: MemberId,
    pub name: PersonName,
    pub status: MemberStatus,
}

/// Member aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: PersonName,
    pub status: MemberStatus,
    pub external_id: Option<ExternalId>,

    /// Billing provider key, present for members created from webhooks.
    pub customer_id: Option<CustomerId>,
    pub email: Option<String>,
}

impl Member {
    /// Creates a member that is known but holds no access yet.
    pub fn new(id: MemberId, name: PersonName) -> Self {
        Self {
            id,
            name,
            status: MemberStatus::NotActive,
            external_id: None,
            customer_id: None,
            email: None,
        }
    }

    /// Creates a member as reported by the membership source, which only
    /// ever reports active members.
    pub fn active(id: MemberId, name: PersonName) -> Self {
        Self {
            status: MemberStatus::Active,
            ..Self::new(id, name)
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_external_id(mut self, external_id: ExternalId) -> Self {
        self.external_id = Some(external_id);
        self
    }

    pub fn with_customer(mut self, customer_id: CustomerId, email: Option<String>) -> Self {
        self.customer_id = Some(customer_id);
        self.email = email;
        self
    }

    pub fn identity(&self) -> MemberIdentity {
        MemberIdentity {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// True when the member is active and mirrored in the directory.
    pub fn is_mirrored(&self) -> bool {
        self.is_active() && self.external_id.is_some()
    }

    pub fn activate(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MemberStatus::Active)?;
        Ok(())
    }

    pub fn deactivate(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MemberStatus::Deactivated)?;
        Ok(())
    }

    /// Records the directory id. Assigning the same id again is a no-op;
    /// assigning a different one is rejected.
    pub fn assign_external_id(&mut self, external_id: ExternalId) -> Result<(), ValidationError> {
        match &self.external_id {
            Some(existing) if existing == &external_id => Ok(()),
            Some(existing) => Err(ValidationError::invalid_format(
                "external_id",
                format!(
                    "member {} already mirrored as {}, refusing {}",
                    self.id, existing, external_id
                ),
            )),
            None => {
                self.external_id = Some(external_id);
                Ok(())
            }
        }
    }
}
