//! Billing customer fields as persisted on the member record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CustomerId;

use super::{Member, PersonName};

/// Name and contact fields copied from the billing provider's customer
/// object. Upserting these creates the member if the customer is new.
///
/// An absent email leaves any stored email untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub customer_id: CustomerId,
    pub name: PersonName,
    pub email: Option<String>,
}

impl CustomerFields {
    pub fn new(customer_id: CustomerId, full_name: &str, email: Option<String>) -> Self {
        Self {
            customer_id,
            name: PersonName::from_full_name(full_name),
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Refreshes an existing member with these fields.
    pub fn apply_to(&self, member: &mut Member) {
        member.name = self.name.clone();
        if let Some(email) = &self.email {
            member.email = Some(email.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;

    fn existing() -> Member {
        Member::new(MemberId::new(1), PersonName::new("Ada", "Lovelace")).with_customer(
            CustomerId::new("cus_1").unwrap(),
            Some("ada@example.com".to_string()),
        )
    }

    #[test]
    fn blank_email_is_treated_as_absent() {
        let fields = CustomerFields::new(
            CustomerId::new("cus_1").unwrap(),
            "Ada",
            Some("  ".to_string()),
        );
        assert_eq!(fields.email, None);
    }

    #[test]
    fn apply_without_email_keeps_stored_email() {
        let mut member = existing();
        let fields = CustomerFields::new(CustomerId::new("cus_1").unwrap(), "Ada King", None);

        fields.apply_to(&mut member);

        assert_eq!(member.name, PersonName::new("Ada", "King"));
        assert_eq!(member.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn apply_with_email_replaces_stored_email() {
        let mut member = existing();
        let fields = CustomerFields::new(
            CustomerId::new("cus_1").unwrap(),
            "Ada King",
            Some("king@example.com".to_string()),
        );

        fields.apply_to(&mut member);

        assert_eq!(member.email.as_deref(), Some("king@example.com"));
    }
}
