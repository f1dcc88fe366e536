//! Reservation entity <-> model mapper

use gym_core::{ClassId, DomainError, MemberId, Reservation, ReservationId, ReservationStatus};

use crate::models::ReservationModel;

use super::corrupt_row;

impl TryFrom<ReservationModel> for Reservation {
    type Error = DomainError;

    fn try_from(model: ReservationModel) -> Result<Self, Self::Error> {
        let status = ReservationStatus::parse(&model.status)
            .ok_or_else(|| corrupt_row("reservations", "status", &model.status))?;

        Ok(Reservation {
            id: ReservationId::new(model.id),
            class_id: ClassId::new(model.class_id),
            member_id: MemberId::new(model.member_id),
            occurrence_date: model.occurrence_date,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
