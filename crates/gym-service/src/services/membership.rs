//! Membership lookups
//!
//! A member is eligible on a date when a `Current` membership expiring on or
//! after that date exists. Booking checks this inside its transaction; these
//! lookups serve self-service and the front desk.

use chrono::{NaiveDate, Utc};
use gym_core::{DomainError, MemberId, Operator, Role};
use tracing::instrument;

use crate::dto::MembershipResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::require_member;

pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The authenticated member's membership valid on `on` (today by default)
    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn my_membership(
        &self,
        operator: Operator,
        on: Option<NaiveDate>,
    ) -> ServiceResult<MembershipResponse> {
        let member_id = require_member(operator, "view own membership")?;
        self.current(member_id, on).await
    }

    /// Staff lookup of any member; members may only look themselves up
    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn member_membership(
        &self,
        operator: Operator,
        member_id: MemberId,
        on: Option<NaiveDate>,
    ) -> ServiceResult<MembershipResponse> {
        if operator.role == Role::Member && operator.as_member() != Some(member_id) {
            return Err(ServiceError::permission_denied(
                "view another member's membership",
            ));
        }
        self.current(member_id, on).await
    }

    /// Whether the member may book an occurrence on `on`
    pub async fn is_eligible(&self, member_id: MemberId, on: NaiveDate) -> ServiceResult<bool> {
        let membership = self.ctx.membership_repo().find_current(member_id, on).await?;
        Ok(membership.is_some_and(|m| m.is_valid_on(on)))
    }

    async fn current(
        &self,
        member_id: MemberId,
        on: Option<NaiveDate>,
    ) -> ServiceResult<MembershipResponse> {
        let on = on.unwrap_or_else(|| Utc::now().date_naive());
        let membership = self
            .ctx
            .membership_repo()
            .find_current(member_id, on)
            .await?
            .ok_or(DomainError::MembershipNotFound(member_id))?;
        Ok(MembershipResponse::new(&membership, on))
    }
}
