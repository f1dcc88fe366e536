//! PostgreSQL implementation of MembershipRepository and MemberRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use gym_core::traits::{MemberRepository, MembershipRepository, RepoResult};
use gym_core::{Member, MemberId, Membership};

use crate::models::{MemberModel, MembershipModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find_current(
        &self,
        member_id: MemberId,
        on: NaiveDate,
    ) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, member_id, plan_name, status, start_date, expiration_date
            FROM memberships
            WHERE member_id = $1 AND status = 'current' AND expiration_date >= $2
            ORDER BY expiration_date DESC
            LIMIT 1
            "#,
        )
        .bind(member_id.into_inner())
        .bind(on)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Membership::try_from).transpose()
    }
}

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, first_name, last_name, email, active
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }
}
