//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Source-of-truth identifier of a member.
///
/// Stable and unique in the membership source. Mirrored into the
/// access-control directory as the user's employee number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Creates a MemberId from its numeric value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("member_id", e.to_string()))
    }
}

/// Billing provider customer identifier (`cus_...`).
///
/// Webhook events address members through this key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a CustomerId, rejecting empty values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("customer_id"));
        }
        Ok(Self(id))
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned by the access-control directory.
///
/// Assigned once, when the member's directory entry is first created,
/// and never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates an ExternalId, rejecting empty values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("external_id"));
        }
        Ok(Self(id))
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_id_parses_from_employee_number() {
        let id: MemberId = " 42 ".parse().unwrap();
        assert_eq!(id, MemberId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn member_id_rejects_non_numeric() {
        let result = "abc".parse::<MemberId>();
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn member_ids_order_numerically() {
        assert!(MemberId::new(2) < MemberId::new(10));
    }

    #[test]
    fn customer_id_rejects_empty() {
        assert!(CustomerId::new("").is_err());
        assert!(CustomerId::new("   ").is_err());
    }

    #[test]
    fn customer_id_accepts_stripe_format() {
        let id = CustomerId::new("cus_123").unwrap();
        assert_eq!(id.as_str(), "cus_123");
    }

    #[test]
    fn external_id_rejects_empty() {
        assert!(ExternalId::new("").is_err());
    }

    #[test]
    fn external_id_serializes_transparently() {
        let id = ExternalId::new("ua-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ua-1\"");
    }
}
