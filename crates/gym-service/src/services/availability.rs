//! Capacity accounting for a class occurrence

use chrono::NaiveDate;
use gym_core::{ClassId, DomainError, Operator, SlotAvailability};
use tracing::instrument;

use crate::dto::AvailabilityResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

pub struct AvailabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Seats taken and left on `date`.
    ///
    /// A read outside the booking transaction: the numbers can be stale by
    /// the time a booking is attempted.
    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn availability(
        &self,
        operator: Operator,
        class_id: ClassId,
        date: NaiveDate,
    ) -> ServiceResult<AvailabilityResponse> {
        let class = PermissionService::new(self.ctx)
            .visible_class(operator, class_id)
            .await?;
        if !class.covers(date) {
            return Err(DomainError::ClassUnavailableOnDate { class_id, date }.into());
        }

        let occupied = self
            .ctx
            .reservation_repo()
            .count_occupied(class_id, date)
            .await?;

        Ok(AvailabilityResponse::new(
            &class,
            date,
            SlotAvailability::new(class.capacity, occupied),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_core::{MemberId, ReservationStatus, TrainerId};

    use crate::services::testing::{class_schedule, date, MemoryStore};

    #[tokio::test]
    async fn test_counts_only_seat_holding_statuses() {
        let store = MemoryStore::new();
        let class_id = ClassId::new(1);
        store
            .add_class(class_schedule(class_id, TrainerId::new(10), 4))
            .await;
        let day = date(2025, 3, 10);
        for (member, status) in [
            (1, ReservationStatus::Reserved),
            (2, ReservationStatus::Attended),
            (3, ReservationStatus::Rescheduled),
            (4, ReservationStatus::Cancelled),
            (5, ReservationStatus::NoShow),
        ] {
            store
                .add_reservation(class_id, MemberId::new(member), day, status)
                .await;
        }
        let ctx = store.context(Vec::new());

        let availability = AvailabilityService::new(&ctx)
            .availability(Operator::member(MemberId::new(9)), class_id, day)
            .await
            .unwrap();

        assert_eq!(
            availability,
            AvailabilityResponse {
                class_id: 1,
                date: day,
                capacity: 4,
                occupied: 3,
                available: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_out_of_range_date() {
        let store = MemoryStore::new();
        store
            .add_class(class_schedule(ClassId::new(1), TrainerId::new(10), 4))
            .await;
        let ctx = store.context(Vec::new());

        let err = AvailabilityService::new(&ctx)
            .availability(Operator::admin(1), ClassId::new(1), date(2025, 7, 1))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
