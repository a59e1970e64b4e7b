//! PostgreSQL implementation of MembershipStore.
//!
//! Provides persistent storage for members using PostgreSQL. The schema
//! lives in `migrations/`.

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, ExternalId, MemberId};
use crate::domain::member::{CustomerFields, Member, MemberStatus, PersonName};
use crate::domain::reconciliation::LocalMemberSnapshot;
use crate::ports::{MemberSnapshotSource, MembershipStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the MembershipStore port.
///
/// Uses sqlx for database operations with connection pooling.
pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    /// Creates a new PostgresMemberStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    member_id: i64,
    customer_id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    status: String,
    external_id: Option<String>,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    #[allow(dead_code)]
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let customer_id = CustomerId::new(row.customer_id).map_err(|e| {
            DomainError::database(format!("Invalid customer_id: {}", e))
        })?;
        let external_id = row
            .external_id
            .map(ExternalId::new)
            .transpose()
            .map_err(|e| {
                DomainError::database(format!("Invalid external_id: {}", e))
            })?;

        Ok(Member {
            id: MemberId::new(row.member_id),
            name: PersonName::new(row.first_name, row.last_name),
            status,
            external_id,
            customer_id: Some(customer_id),
            email: row.email,
        })
    }
}

fn parse_status(s: &str) -> Result<MemberStatus, DomainError> {
    MemberStatus::parse(s)
        .ok_or_else(|| DomainError::database(format!("Invalid status value: {}", s)))
}

fn not_found(customer_id: &CustomerId) -> DomainError {
    DomainError::new(
        ErrorCode::MemberNotFound,
        format!("No member for customer {}", customer_id),
    )
    .with_detail("customer_id", customer_id.as_str())
}

const SELECT_MEMBER: &str = r#"
    SELECT member_id, customer_id, first_name, last_name, email, status,
           external_id, created_at, updated_at
    FROM members
"#;

impl PostgresMemberStore {
    async fn set_status(
        &self,
        customer_id: &CustomerId,
        status: MemberStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET status = $2, updated_at = NOW()
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to set member status to {}: {}", status, e))
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(customer_id));
        }

        Ok(())
    }
}

#[async_trait]
impl MembershipStore for PostgresMemberStore {
    async fn create_or_update_customer_fields(
        &self,
        fields: &CustomerFields,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (customer_id, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (customer_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = COALESCE(EXCLUDED.email, members.email),
                updated_at = NOW()
            "#,
        )
        .bind(fields.customer_id.as_str())
        .bind(&fields.name.first_name)
        .bind(&fields.name.last_name)
        .bind(&fields.email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to upsert customer: {}", e))
        })?;

        Ok(())
    }

    async fn activate(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        self.set_status(customer_id, MemberStatus::Active).await
    }

    async fn set_external_id(
        &self,
        customer_id: &CustomerId,
        external_id: &ExternalId,
    ) -> Result<(), DomainError> {
        // Only fills an empty slot, so an existing id is never overwritten
        let result = sqlx::query(
            r#"
            UPDATE members SET external_id = $2, updated_at = NOW()
            WHERE customer_id = $1 AND (external_id IS NULL OR external_id = $2)
            "#,
        )
        .bind(customer_id.as_str())
        .bind(external_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to set external id: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return match self.find_by_source_id(customer_id).await? {
                Some(existing) => Err(DomainError::validation(
                    "external_id",
                    format!(
                        "Member {} already has external id {}",
                        existing.id,
                        existing
                            .external_id
                            .map(|id| id.to_string())
                            .unwrap_or_default()
                    ),
                )),
                None => Err(not_found(customer_id)),
            };
        }

        Ok(())
    }

    async fn deactivate(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        self.set_status(customer_id, MemberStatus::Deactivated).await
    }

    async fn find_by_source_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> =
            sqlx::query_as(&format!("{} WHERE customer_id = $1", SELECT_MEMBER))
                .bind(customer_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to find member: {}", e))
                })?;

        row.map(Member::try_from).transpose()
    }
}

#[async_trait]
impl MemberSnapshotSource for PostgresMemberStore {
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "{} WHERE external_id IS NOT NULL ORDER BY member_id",
            SELECT_MEMBER
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to list members: {}", e))
        })?;

        rows.into_iter()
            .map(Member::try_from)
            .collect::<Result<LocalMemberSnapshot, DomainError>>()
    }
}
