//! Access checks shared by the services
//!
//! Trainers manage their own classes, admins manage every class, members act
//! only on their own behalf. A class the operator may not see is reported the
//! same way as a missing one.

use gym_core::{ClassId, ClassSchedule, DomainError, MemberId, Operator, Role, TrainerId};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a class the operator manages
    #[instrument(skip(self))]
    pub async fn managed_class(
        &self,
        operator: Operator,
        class_id: ClassId,
    ) -> ServiceResult<ClassSchedule> {
        let class = self
            .ctx
            .class_repo()
            .find_by_id(class_id)
            .await?
            .ok_or(DomainError::ClassNotAccessible(class_id))?;
        require_manager(operator, &class)?;
        Ok(class)
    }

    /// Load a class the operator may look at: active ones, or any it manages
    #[instrument(skip(self))]
    pub async fn visible_class(
        &self,
        operator: Operator,
        class_id: ClassId,
    ) -> ServiceResult<ClassSchedule> {
        let class = self
            .ctx
            .class_repo()
            .find_by_id(class_id)
            .await?
            .ok_or(DomainError::ClassNotAccessible(class_id))?;
        if !class.active && !operator.manages_classes_of(class.trainer_id) {
            return Err(DomainError::ClassNotAccessible(class_id).into());
        }
        Ok(class)
    }
}

/// Owner trainer or admin
pub fn require_manager(operator: Operator, class: &ClassSchedule) -> Result<(), DomainError> {
    if operator.manages_classes_of(class.trainer_id) {
        Ok(())
    } else {
        Err(DomainError::ClassNotAccessible(class.id))
    }
}

pub fn require_member(operator: Operator, action: &str) -> ServiceResult<MemberId> {
    operator
        .as_member()
        .ok_or_else(|| ServiceError::permission_denied(action))
}

pub fn require_trainer(operator: Operator, action: &str) -> ServiceResult<TrainerId> {
    operator
        .as_trainer()
        .ok_or_else(|| ServiceError::permission_denied(action))
}

/// Trainers and admins
pub fn require_staff(operator: Operator, action: &str) -> ServiceResult<()> {
    match operator.role {
        Role::Admin | Role::Trainer => Ok(()),
        Role::Member => Err(ServiceError::permission_denied(action)),
    }
}
