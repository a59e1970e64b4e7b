//! WebhookProcessor - Drives member lifecycle from billing webhooks.
//!
//! Each request is handled on its own: verify the signature, decode the
//! envelope, dispatch on event type, call the store and directory, and
//! respond. Nothing is rolled back on failure. Every transition is guarded
//! so that a redelivered event converges instead of duplicating work.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::billing::{
    BillingEvent, BillingEventType, CustomerPayload, SubscriptionPayload, WebhookError,
    WebhookVerifier,
};
use crate::domain::foundation::{CustomerId, ExternalId};
use crate::domain::member::{Member, MemberStatus};
use crate::ports::{AccessControlUpdater, MembershipStore};

/// Result of processing one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Customer fields upserted. `mirrored` is set when the directory entry
    /// was updated to match.
    CustomerSynced {
        customer_id: CustomerId,
        mirrored: bool,
    },
    /// Member activated and given a new directory entry.
    MemberActivated {
        customer_id: CustomerId,
        external_id: ExternalId,
    },
    /// Previously deactivated member activated again on its existing entry.
    MemberReactivated {
        customer_id: CustomerId,
        external_id: ExternalId,
    },
    /// Member was already active and mirrored. Nothing done.
    AlreadyActive { customer_id: CustomerId },
    /// Member deactivated. `disabled` is set when a directory entry existed.
    MemberDeactivated {
        customer_id: CustomerId,
        disabled: bool,
    },
    /// Member was already deactivated. Nothing done.
    AlreadyDeactivated { customer_id: CustomerId },
    /// Event type not handled.
    Ignored { event_type: String },
}

/// Processes verified billing events against the store and directory.
pub struct WebhookProcessor {
    verifier: WebhookVerifier,
    store: Arc<dyn MembershipStore>,
    updater: Arc<dyn AccessControlUpdater>,
}

impl WebhookProcessor {
    pub fn new(
        verifier: WebhookVerifier,
        store: Arc<dyn MembershipStore>,
        updater: Arc<dyn AccessControlUpdater>,
    ) -> Self {
        Self {
            verifier,
            store,
            updater,
        }
    }

    /// Verifies, decodes, and dispatches a raw webhook request body.
    pub async fn handle(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookOutcome, WebhookError> {
        self.verifier.verify(payload, signature_header)?;
        let event = BillingEvent::from_slice(payload)?;
        self.dispatch(&event).await
    }

    /// Dispatches an already verified event.
    pub async fn dispatch(&self, event: &BillingEvent) -> Result<WebhookOutcome, WebhookError> {
        match event.parsed_type() {
            BillingEventType::CustomerCreated | BillingEventType::CustomerUpdated => {
                self.handle_customer_event(event).await
            }
            BillingEventType::SubscriptionCreated => self.handle_subscription_created(event).await,
            BillingEventType::SubscriptionDeleted => self.handle_subscription_deleted(event).await,
            BillingEventType::Unknown => {
                info!(event_type = %event.event_type, "ignoring unhandled event type");
                Ok(WebhookOutcome::Ignored {
                    event_type: event.event_type.clone(),
                })
            }
        }
    }

    async fn handle_customer_event(
        &self,
        event: &BillingEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let fields = event.deserialize_object::<CustomerPayload>()?.into_fields()?;
        info!(
            event_type = %event.event_type,
            customer_id = %fields.customer_id,
            name = %fields.name,
            "upserting customer"
        );

        self.store.create_or_update_customer_fields(&fields).await?;

        let member = self.find_member(&fields.customer_id).await?;

        // Deactivated entries stay disabled; updating one would re-enable it
        let mirrored = match (&member.status, &member.external_id) {
            (MemberStatus::Active, Some(external_id)) => {
                self.updater.update_member(external_id, &member).await?;
                info!(customer_id = %fields.customer_id, external_id = %external_id, "mirrored customer update");
                true
            }
            _ => false,
        };

        Ok(WebhookOutcome::CustomerSynced {
            customer_id: fields.customer_id,
            mirrored,
        })
    }

    async fn handle_subscription_created(
        &self,
        event: &BillingEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let subscription = event.deserialize_object::<SubscriptionPayload>()?;
        let customer_id = subscription.customer_id()?;

        let mut member = self.find_member(&customer_id).await?;

        if member.is_mirrored() {
            debug!(customer_id = %customer_id, "member already active, skipping");
            return Ok(WebhookOutcome::AlreadyActive { customer_id });
        }

        info!(customer_id = %customer_id, member_id = %member.id, name = %member.name, "activating member");
        self.store.activate(&customer_id).await?;
        member.status = MemberStatus::Active;

        match member.external_id.clone() {
            // Returning member keeps its entry; the join key is never reassigned
            Some(external_id) => {
                self.updater.update_member(&external_id, &member).await?;
                info!(customer_id = %customer_id, external_id = %external_id, "re-enabled directory entry");
                Ok(WebhookOutcome::MemberReactivated {
                    customer_id,
                    external_id,
                })
            }
            None => {
                let external_id = self.updater.add_member(&member).await?;
                info!(customer_id = %customer_id, external_id = %external_id, "created directory entry");
                self.store.set_external_id(&customer_id, &external_id).await?;
                Ok(WebhookOutcome::MemberActivated {
                    customer_id,
                    external_id,
                })
            }
        }
    }

    async fn handle_subscription_deleted(
        &self,
        event: &BillingEvent,
    ) -> Result<WebhookOutcome, WebhookError> {
        let subscription = event.deserialize_object::<SubscriptionPayload>()?;
        let customer_id = subscription.customer_id()?;

        let member = self.find_member(&customer_id).await?;

        if member.status == MemberStatus::Deactivated {
            debug!(customer_id = %customer_id, "member already deactivated, skipping");
            return Ok(WebhookOutcome::AlreadyDeactivated { customer_id });
        }

        let disabled = match &member.external_id {
            Some(external_id) => {
                self.updater.disable_member(external_id, &member).await?;
                info!(customer_id = %customer_id, external_id = %external_id, "disabled directory entry");
                true
            }
            None => {
                warn!(customer_id = %customer_id, "member has no directory entry to disable");
                false
            }
        };

        self.store.deactivate(&customer_id).await?;
        info!(customer_id = %customer_id, member_id = %member.id, "deactivated member");

        Ok(WebhookOutcome::MemberDeactivated {
            customer_id,
            disabled,
        })
    }

    async fn find_member(&self, customer_id: &CustomerId) -> Result<Member, WebhookError> {
        self.store
            .find_by_source_id(customer_id)
            .await?
            .ok_or_else(|| WebhookError::NotFound(customer_id.clone()))
    }
}
