//! Billing provider webhook event types.
//!
//! Only the fields member sync acts on are captured. Everything else in
//! the provider's schema is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CustomerId;
use crate::domain::member::CustomerFields;

use super::webhook_errors::WebhookError;

/// Webhook envelope: `{ "type": ..., "data": { "object": ... } }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEvent {
    /// Event type, e.g. `customer.subscription.created`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Missing data decodes as a null object so unhandled events still
    /// parse.
    #[serde(default)]
    pub data: BillingEventData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BillingEventData {
    /// Raw object, decoded per event type.
    #[serde(default)]
    pub object: serde_json::Value,
}

impl BillingEvent {
    pub fn new(event_type: impl Into<String>, object: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data: BillingEventData { object },
        }
    }

    /// Decodes the envelope from a raw request body.
    pub fn from_slice(payload: &[u8]) -> Result<Self, WebhookError> {
        Ok(serde_json::from_slice(payload)?)
    }

    pub fn parsed_type(&self) -> BillingEventType {
        BillingEventType::parse(&self.event_type)
    }

    /// Decodes the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(&self) -> Result<T, WebhookError> {
        Ok(serde_json::from_value(self.data.object.clone())?)
    }
}

/// Event types that drive the member lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingEventType {
    CustomerCreated,
    CustomerUpdated,
    SubscriptionCreated,
    SubscriptionDeleted,
    /// Anything else. Accepted and ignored.
    Unknown,
}

impl BillingEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "customer.created" => Self::CustomerCreated,
            "customer.updated" => Self::CustomerUpdated,
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerCreated => "customer.created",
            Self::CustomerUpdated => "customer.updated",
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
            Self::Unknown => "unknown",
        }
    }
}

/// Customer object carried by `customer.*` events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerPayload {
    /// Validates the payload and converts it to persisted fields.
    ///
    /// A payload with no id, name, or email carries nothing to act on.
    pub fn into_fields(self) -> Result<CustomerFields, WebhookError> {
        let name = self.name.unwrap_or_default();
        let email = self.email.filter(|e| !e.trim().is_empty());

        if self.id.trim().is_empty() && name.trim().is_empty() && email.is_none() {
            return Err(WebhookError::Decode(
                "no relevant data in customer event".to_string(),
            ));
        }

        let customer_id = CustomerId::new(self.id)
            .map_err(|_| WebhookError::Decode("customer event has no id".to_string()))?;

        Ok(CustomerFields::new(customer_id, &name, email))
    }
}

/// Subscription object carried by `customer.subscription.*` events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionPayload {
    #[serde(default)]
    pub id: Option<String>,

    /// Owning customer id.
    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub cancel_at: Option<i64>,

    #[serde(default)]
    pub canceled_at: Option<i64>,
}

impl SubscriptionPayload {
    /// Returns the owning customer, which every subscription must name.
    pub fn customer_id(&self) -> Result<CustomerId, WebhookError> {
        self.customer
            .as_deref()
            .and_then(|c| CustomerId::new(c).ok())
            .ok_or_else(|| WebhookError::Decode("no customer id in subscription event".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ══════════════════════════════════════════════════════════════
    // Envelope Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn envelope_decodes_type_and_object() {
        let payload = br#"{"type":"customer.created","data":{"object":{"id":"cus_1"}}}"#;
        let event = BillingEvent::from_slice(payload).unwrap();

        assert_eq!(event.parsed_type(), BillingEventType::CustomerCreated);
        assert_eq!(event.data.object["id"], "cus_1");
    }

    #[test]
    fn envelope_without_data_still_decodes() {
        let event = BillingEvent::from_slice(br#"{"type":"invoice.paid"}"#).unwrap();
        assert_eq!(event.parsed_type(), BillingEventType::Unknown);
        assert!(event.data.object.is_null());
    }

    #[test]
    fn envelope_without_type_is_decode_error() {
        let err = BillingEvent::from_slice(br#"{"data":{"object":{}}}"#).unwrap_err();
        assert!(matches!(err, WebhookError::Decode(_)));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = BillingEvent::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, WebhookError::Decode(_)));
    }

    #[test]
    fn event_types_round_trip() {
        for t in [
            BillingEventType::CustomerCreated,
            BillingEventType::CustomerUpdated,
            BillingEventType::SubscriptionCreated,
            BillingEventType::SubscriptionDeleted,
        ] {
            assert_eq!(BillingEventType::parse(t.as_str()), t);
        }
        assert_eq!(
            BillingEventType::parse("customer.subscription.updated"),
            BillingEventType::Unknown
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Customer Payload Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn customer_payload_converts_to_fields() {
        let event = BillingEvent::new(
            "customer.created",
            json!({"id": "cus_1", "name": "Ada King Lovelace", "email": "ada@example.com"}),
        );
        let fields = event
            .deserialize_object::<CustomerPayload>()
            .unwrap()
            .into_fields()
            .unwrap();

        assert_eq!(fields.customer_id.as_str(), "cus_1");
        assert_eq!(fields.name.first_name, "Ada");
        assert_eq!(fields.name.last_name, "King Lovelace");
        assert_eq!(fields.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn customer_without_email_has_no_email() {
        let event = BillingEvent::new(
            "customer.updated",
            json!({"id": "cus_1", "name": "Ada King", "email": null}),
        );
        let fields = event
            .deserialize_object::<CustomerPayload>()
            .unwrap()
            .into_fields()
            .unwrap();

        assert_eq!(fields.email, None);
    }

    #[test]
    fn empty_customer_object_is_rejected() {
        let err = CustomerPayload::default().into_fields().unwrap_err();
        assert!(err.to_string().contains("no relevant data"));
    }

    #[test]
    fn customer_without_id_is_rejected() {
        let payload = CustomerPayload {
            name: Some("Ada".into()),
            ..Default::default()
        };
        assert!(matches!(payload.into_fields(), Err(WebhookError::Decode(_))));
    }

    #[test]
    fn null_customer_object_is_decode_error() {
        let event = BillingEvent::new("customer.created", serde_json::Value::Null);
        assert!(matches!(
            event.deserialize_object::<CustomerPayload>(),
            Err(WebhookError::Decode(_))
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Subscription Payload Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn subscription_payload_exposes_customer() {
        let event = BillingEvent::new(
            "customer.subscription.created",
            json!({"id": "sub_1", "customer": "cus_1", "status": "active"}),
        );
        let sub: SubscriptionPayload = event.deserialize_object().unwrap();
        assert_eq!(sub.customer_id().unwrap().as_str(), "cus_1");
    }

    #[test]
    fn subscription_without_customer_is_rejected() {
        let sub = SubscriptionPayload::default();
        assert!(matches!(sub.customer_id(), Err(WebhookError::Decode(_))));
    }

    #[test]
    fn subscription_with_blank_customer_is_rejected() {
        let sub = SubscriptionPayload {
            customer: Some("  ".into()),
            ..Default::default()
        };
        assert!(sub.customer_id().is_err());
    }
}
