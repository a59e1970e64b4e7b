//! HTTP member source.
//!
//! Fetches the authoritative member list as JSON. Both a bare array and an
//! object with a `members` array are accepted:
//!
//! ```json
//! [{"id": 1, "first_name": "Alice", "last_name": "Smith"}]
//! {"members": [{"id": 1, "first_name": "Alice", "last_name": "Smith"}]}
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::member::PersonName;
use crate::domain::reconciliation::RemoteMemberSet;
use crate::ports::RemoteMemberSource;

#[derive(Debug, Deserialize)]
struct RemoteMember {
    id: i64,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MemberList {
    Bare(Vec<RemoteMember>),
    Wrapped { members: Vec<RemoteMember> },
}

impl MemberList {
    fn into_members(self) -> Vec<RemoteMember> {
        match self {
            MemberList::Bare(members) | MemberList::Wrapped { members } => members,
        }
    }
}

/// `RemoteMemberSource` backed by a JSON endpoint.
pub struct HttpMemberSource {
    url: String,
    token: Option<SecretString>,
    http_client: reqwest::Client,
}

impl HttpMemberSource {
    /// # Errors
    ///
    /// Returns `RemoteSourceError` if no URL is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, DomainError> {
        let url = config
            .url()
            .ok_or_else(|| DomainError::remote_source("No member source URL configured"))?
            .to_string();
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                DomainError::remote_source(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            url,
            token: config.token.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl RemoteMemberSource for HttpMemberSource {
    async fn list_members(&self) -> Result<RemoteMemberSet, DomainError> {
        let mut request = self.http_client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::remote_source(format!("Member list request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Member source request failed");
            return Err(DomainError::remote_source(format!(
                "Member source returned {}: {}",
                status, error_text
            ))
            .with_detail("status", status.as_u16().to_string()));
        }

        let list: MemberList = response.json().await.map_err(|e| {
            DomainError::remote_source(format!("Failed to parse member list: {}", e))
        })?;

        let mut members = RemoteMemberSet::new();
        for member in list.into_members() {
            let id = MemberId::new(member.id);
            if members.contains(id) {
                tracing::warn!(member_id = %id, "Duplicate member in source list, keeping the last");
            }
            members.insert(
                id,
                PersonName::new(
                    member.first_name.unwrap_or_default(),
                    member.last_name.unwrap_or_default(),
                ),
            );
        }

        tracing::debug!(count = members.len(), "Fetched remote member list");
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(url: String, token: Option<&str>) -> HttpMemberSource {
        let config = RemoteConfig {
            url: Some(url),
            token: token.map(|t| SecretString::new(t.to_string())),
            ..Default::default()
        };
        HttpMemberSource::new(&config).unwrap()
    }

    #[test]
    fn missing_url_is_rejected() {
        let result = HttpMemberSource::new(&RemoteConfig::default());
        assert_eq!(result.err().unwrap().code, ErrorCode::RemoteSourceError);
    }

    #[tokio::test]
    async fn parses_bare_array() {
        let app = Router::new().route(
            "/members",
            get(|| async {
                Json(json!([
                    {"id": 1, "first_name": "Alice", "last_name": "Smith"},
                    {"id": 2, "first_name": "Bob"}
                ]))
            }),
        );
        let base = spawn(app).await;

        let members = source(format!("{}/members", base), None)
            .list_members()
            .await
            .unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(
            members.get(MemberId::new(1)).unwrap().name,
            PersonName::new("Alice", "Smith")
        );
        assert_eq!(
            members.get(MemberId::new(2)).unwrap().name,
            PersonName::new("Bob", "")
        );
    }

    #[tokio::test]
    async fn parses_wrapped_list_and_sends_token() {
        let app = Router::new().route(
            "/members",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "Bearer crm-token" {
                    return (StatusCode::UNAUTHORIZED, "denied").into_response();
                }
                Json(json!({"members": [{"id": 7, "first_name": "Gail", "last_name": "Lee"}]}))
                    .into_response()
            }),
        );
        let base = spawn(app).await;

        let members = source(format!("{}/members", base), Some("crm-token"))
            .list_members()
            .await
            .unwrap();

        assert!(members.contains(MemberId::new(7)));
    }

    #[tokio::test]
    async fn error_status_is_remote_source_error() {
        let app = Router::new().route(
            "/members",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let base = spawn(app).await;

        let err = source(format!("{}/members", base), None)
            .list_members()
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteSourceError);
        assert_eq!(err.details.get("status").map(String::as_str), Some("503"));
    }

    #[tokio::test]
    async fn malformed_body_is_remote_source_error() {
        let app = Router::new().route("/members", get(|| async { "not json" }));
        let base = spawn(app).await;

        let err = source(format!("{}/members", base), None)
            .list_members()
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteSourceError);
    }
}
