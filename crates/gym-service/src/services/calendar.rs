//! Weekly calendar for the timetable view

use gym_core::{Operator, Role};
use tracing::instrument;

use crate::dto::CalendarResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CalendarService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CalendarService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Week grid of the operator's classes: a trainer's own, or every active
    /// class for an admin
    #[instrument(skip(self), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn weekly(&self, operator: Operator) -> ServiceResult<CalendarResponse> {
        let classes = match operator.role {
            Role::Trainer => {
                self.ctx
                    .class_repo()
                    .find_by_trainer(gym_core::TrainerId::new(operator.id))
                    .await?
            }
            Role::Admin => self.ctx.class_repo().find_active().await?,
            Role::Member => return Err(ServiceError::permission_denied("view trainer calendar")),
        };

        Ok(CalendarResponse::new(self.ctx.calendar_grid(), &classes))
    }
}
