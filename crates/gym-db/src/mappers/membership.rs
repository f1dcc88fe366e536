//! Membership entity <-> model mapper

use gym_core::{DomainError, MemberId, Membership, MembershipId, MembershipStatus};

use crate::models::MembershipModel;

use super::corrupt_row;

impl TryFrom<MembershipModel> for Membership {
    type Error = DomainError;

    fn try_from(model: MembershipModel) -> Result<Self, Self::Error> {
        let status = MembershipStatus::parse(&model.status)
            .ok_or_else(|| corrupt_row("memberships", "status", &model.status))?;

        Ok(Membership {
            id: MembershipId::new(model.id),
            member_id: MemberId::new(model.member_id),
            plan_name: model.plan_name,
            status,
            start_date: model.start_date,
            expiration_date: model.expiration_date,
        })
    }
}
