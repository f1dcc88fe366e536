//! Class schedule management

use gym_core::{ClassId, DomainError, NewClassSchedule, Operator, Role, TrainerId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{weekday_from_index, ClassResponse, CreateClassRequest, UpdateClassRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::{require_trainer, PermissionService};

pub struct ClassScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClassScheduleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a class. Trainers create their own; admins name the trainer.
    #[instrument(skip(self, request), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn create_class(
        &self,
        operator: Operator,
        request: CreateClassRequest,
    ) -> ServiceResult<ClassResponse> {
        request.validate()?;

        let trainer_id = match (operator.role, request.trainer_id) {
            (Role::Trainer, None) => TrainerId::new(operator.id),
            (Role::Trainer, Some(id)) if id == operator.id => TrainerId::new(id),
            (Role::Trainer, Some(_)) => {
                return Err(ServiceError::permission_denied(
                    "create classes for another trainer",
                ))
            }
            (Role::Admin, Some(id)) => TrainerId::new(id),
            (Role::Admin, None) => {
                return Err(ServiceError::validation("trainer_id is required"));
            }
            (Role::Member, _) => return Err(ServiceError::permission_denied("create classes")),
        };

        let day_of_week = weekday_from_index(request.day_of_week)
            .ok_or_else(|| ServiceError::validation("day_of_week must be 0-6"))?;

        let new_class = NewClassSchedule {
            trainer_id,
            name: request.name.trim().to_string(),
            description: request.description,
            capacity: request.capacity,
            day_of_week,
            start_time: request.start_time,
            end_time: request.end_time,
            start_date: request.start_date,
            end_date: request.end_date,
        };
        new_class.validate()?;

        let class = self.ctx.class_repo().create(&new_class).await?;
        info!(class_id = %class.id, trainer_id = %trainer_id, "Class created");

        Ok(ClassResponse::from(class))
    }

    /// Apply a partial update; only the owner or an admin may edit
    #[instrument(skip(self, request), fields(operator_id = operator.id, role = %operator.role))]
    pub async fn update_class(
        &self,
        operator: Operator,
        class_id: ClassId,
        request: UpdateClassRequest,
    ) -> ServiceResult<ClassResponse> {
        request.validate()?;

        let mut class = PermissionService::new(self.ctx)
            .managed_class(operator, class_id)
            .await?;
        let read_at = class.updated_at;

        if let Some(name) = request.name {
            class.name = name.trim().to_string();
            if class.name.is_empty() {
                return Err(DomainError::ValidationError(
                    "Class name must not be empty".to_string(),
                )
                .into());
            }
        }
        if let Some(description) = request.description {
            class.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(capacity) = request.capacity {
            class.capacity = capacity;
        }
        if let Some(index) = request.day_of_week {
            class.day_of_week = weekday_from_index(index)
                .ok_or_else(|| ServiceError::validation("day_of_week must be 0-6"))?;
        }
        if let Some(start_time) = request.start_time {
            class.start_time = start_time;
        }
        if let Some(end_time) = request.end_time {
            class.end_time = end_time;
        }
        if let Some(start_date) = request.start_date {
            class.start_date = start_date;
        }
        if request.clear_end_date {
            class.end_date = None;
        } else if let Some(end_date) = request.end_date {
            class.end_date = Some(end_date);
        }
        if let Some(active) = request.active {
            class.set_active(active);
        }

        class.validate()?;
        let class = self.ctx.class_repo().update(&class, read_at).await?;
        info!(class_id = %class_id, active = class.active, "Class updated");

        Ok(ClassResponse::from(class))
    }

    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn get_class(&self, operator: Operator, class_id: ClassId) -> ServiceResult<ClassResponse> {
        let class = PermissionService::new(self.ctx)
            .visible_class(operator, class_id)
            .await?;
        Ok(ClassResponse::from(class))
    }

    /// Active classes, ordered by weekday and start time
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<ClassResponse>> {
        let classes = self.ctx.class_repo().find_active().await?;
        Ok(classes.iter().map(ClassResponse::from).collect())
    }

    /// Every class of the authenticated trainer, inactive ones included
    #[instrument(skip(self), fields(operator_id = operator.id))]
    pub async fn my_classes(&self, operator: Operator) -> ServiceResult<Vec<ClassResponse>> {
        let trainer_id = require_trainer(operator, "list trainer classes")?;
        let classes = self.ctx.class_repo().find_by_trainer(trainer_id).await?;
        Ok(classes.iter().map(ClassResponse::from).collect())
    }
}
