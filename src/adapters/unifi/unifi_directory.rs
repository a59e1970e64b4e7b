//! UniFi Access directory adapter.
//!
//! Implements `AccessControlUpdater` and `MemberSnapshotSource` against the
//! UniFi Access developer API (`/api/v1/developer/users`).
//!
//! Directory users are matched to members through their employee number,
//! which holds the member's source id. Users whose employee number does not
//! parse are not managed by this service and are left out of snapshots.
//!
//! # Configuration
//!
//! ```ignore
//! let config = DirectoryConfig::new("https://10.0.0.2:12445", token);
//! let directory = UnifiDirectory::new(&config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::DirectoryConfig;
use crate::domain::directory::CardReport;
use crate::domain::foundation::{DomainError, ExternalId, MemberId};
use crate::domain::member::{Member, MemberStatus, PersonName};
use crate::domain::reconciliation::LocalMemberSnapshot;
use crate::ports::{AccessControlUpdater, MemberSnapshotSource};

use super::api_types::{
    ApiResponse, UserRecord, UserRequest, STATUS_ACTIVE, STATUS_DEACTIVATED, SUCCESS_CODE,
};

const USERS_PATH: &str = "/api/v1/developer/users";

/// UniFi Access directory client.
pub struct UnifiDirectory {
    base_url: String,
    api_token: SecretString,
    page_size: u32,
    http_client: reqwest::Client,
}

impl UnifiDirectory {
    /// Create a new directory client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError` if the HTTP client cannot be built.
    pub fn new(config: &DirectoryConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| DomainError::directory(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            page_size: config.page_size.max(1),
            http_client,
        })
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    fn user_url(&self, external_id: &ExternalId) -> String {
        format!("{}{}/{}", self.base_url, USERS_PATH, external_id)
    }

    /// Sends a request and unwraps the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<ApiResponse<T>, DomainError> {
        let response = request
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| DomainError::directory(format!("Directory {} failed: {}", operation, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                operation,
                status = %status,
                error = %error_text,
                "Directory request failed"
            );
            return Err(DomainError::directory(format!(
                "Directory {} returned {}: {}",
                operation, status, error_text
            ))
            .with_detail("status", status.as_u16().to_string()));
        }

        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            DomainError::directory(format!(
                "Failed to parse directory {} response: {}",
                operation, e
            ))
        })?;

        if body.code != SUCCESS_CODE {
            tracing::error!(operation, code = %body.code, msg = %body.msg, "Directory rejected request");
            return Err(DomainError::directory(format!(
                "Directory {} rejected: {} ({})",
                operation, body.msg, body.code
            ))
            .with_detail("code", body.code));
        }

        Ok(body)
    }

    /// Fetches every directory user, following pagination.
    async fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        let mut users = Vec::new();
        let mut page_num: u32 = 1;

        loop {
            let request = self
                .http_client
                .get(self.users_url())
                .query(&[("page_num", page_num), ("page_size", self.page_size)]);
            let response: ApiResponse<Vec<UserRecord>> =
                self.execute(request, "list_users").await?;

            let page = response.data.unwrap_or_default();
            let fetched = page.len();
            users.extend(page);

            let done = match response.pagination {
                Some(p) if p.total > 0 => users.len() >= p.total as usize,
                _ => fetched < self.page_size as usize,
            };
            if done || fetched == 0 {
                break;
            }
            page_num += 1;
        }

        tracing::debug!(count = users.len(), pages = page_num, "Listed directory users");
        Ok(users)
    }

    /// Counts non-deactivated users with and without an NFC card.
    ///
    /// Covers every directory user, managed or not.
    pub async fn card_report(&self) -> Result<CardReport, DomainError> {
        let mut report = CardReport::new();
        for user in self.list_users().await? {
            report.record(parse_directory_status(&user.status), user.has_nfc_card());
        }
        Ok(report)
    }
}

fn user_request(member: &Member, employee_number: bool, status: Option<&str>) -> UserRequest {
    UserRequest {
        first_name: member.name.first_name.clone(),
        last_name: member.name.last_name.clone(),
        employee_number: employee_number.then(|| member.id.to_string()),
        status: status.map(str::to_string),
    }
}

fn parse_directory_status(status: &str) -> MemberStatus {
    match status {
        STATUS_ACTIVE => MemberStatus::Active,
        STATUS_DEACTIVATED => MemberStatus::Deactivated,
        _ => MemberStatus::NotActive,
    }
}

/// Converts a directory user into a snapshot entry.
///
/// Returns `None` for users this service does not manage.
fn user_to_member(user: UserRecord) -> Option<(ExternalId, Member)> {
    let member_id = match user.employee_number.trim().parse::<i64>() {
        Ok(id) => MemberId::new(id),
        Err(_) => {
            tracing::info!(
                user = %user.full_name,
                employee_number = %user.employee_number,
                "Skipping directory user without a numeric employee number"
            );
            return None;
        }
    };

    let external_id = match ExternalId::new(user.id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(member_id = %member_id, error = %e, "Skipping directory user without an id");
            return None;
        }
    };

    let member = Member::new(member_id, PersonName::new(user.first_name, user.last_name))
        .with_status(parse_directory_status(&user.status));
    Some((external_id, member))
}

#[async_trait]
impl AccessControlUpdater for UnifiDirectory {
    async fn add_member(&self, member: &Member) -> Result<ExternalId, DomainError> {
        tracing::info!(member_id = %member.id, name = %member.name, "Adding member to directory");

        let request = self
            .http_client
            .post(self.users_url())
            .json(&user_request(member, true, None));
        let response: ApiResponse<UserRecord> = self.execute(request, "create_user").await?;

        let user = response
            .data
            .ok_or_else(|| DomainError::directory("Directory create_user returned no user"))?;
        ExternalId::new(user.id).map_err(|e| {
            DomainError::directory(format!("Directory returned an invalid user id: {}", e))
        })
    }

    async fn update_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        tracing::info!(
            member_id = %member.id,
            external_id = %external_id,
            name = %member.name,
            "Updating member in directory"
        );

        let request = self
            .http_client
            .put(self.user_url(external_id))
            .json(&user_request(member, true, Some(STATUS_ACTIVE)));
        self.execute::<serde_json::Value>(request, "update_user")
            .await?;
        Ok(())
    }

    async fn disable_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        tracing::info!(
            member_id = %member.id,
            external_id = %external_id,
            "Disabling member in directory"
        );

        let request = self
            .http_client
            .put(self.user_url(external_id))
            .json(&user_request(member, false, Some(STATUS_DEACTIVATED)));
        self.execute::<serde_json::Value>(request, "update_user")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MemberSnapshotSource for UnifiDirectory {
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError> {
        let mut snapshot = LocalMemberSnapshot::new();
        for (external_id, member) in self.list_users().await?.into_iter().filter_map(user_to_member)
        {
            snapshot.insert(external_id, member);
        }
        Ok(snapshot)
    }
}
