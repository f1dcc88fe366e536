//! Member entity <-> model mapper

use gym_core::{Member, MemberId};

use crate::models::MemberModel;

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: MemberId::new(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            active: model.active,
        }
    }
}
