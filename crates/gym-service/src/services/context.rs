//! Service context - dependency container for services
//!
//! Holds the repository and booking store ports, the notification
//! dispatcher and the calendar grid.

use std::sync::Arc;

use gym_core::traits::{
    BookingStore, ClassScheduleRepository, MemberRepository, MembershipRepository,
    NotificationRepository, ReservationRepository,
};
use gym_core::WeeklyGrid;

use super::dispatcher::NotificationDispatcher;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    class_repo: Arc<dyn ClassScheduleRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    member_repo: Arc<dyn MemberRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Transactional admission store
    booking_store: Arc<dyn BookingStore>,

    notifier: NotificationDispatcher,
    calendar_grid: WeeklyGrid,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn class_repo(&self) -> &dyn ClassScheduleRepository {
        self.class_repo.as_ref()
    }

    pub fn reservation_repo(&self) -> &dyn ReservationRepository {
        self.reservation_repo.as_ref()
    }

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn booking_store(&self) -> &dyn BookingStore {
        self.booking_store.as_ref()
    }

    // === Notifications & calendar ===

    pub fn notifier(&self) -> &NotificationDispatcher {
        &self.notifier
    }

    pub fn calendar_grid(&self) -> WeeklyGrid {
        self.calendar_grid
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &self.notifier)
            .field("calendar_grid", &self.calendar_grid)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    class_repo: Option<Arc<dyn ClassScheduleRepository>>,
    reservation_repo: Option<Arc<dyn ReservationRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    booking_store: Option<Arc<dyn BookingStore>>,
    notifier: Option<NotificationDispatcher>,
    calendar_grid: Option<WeeklyGrid>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_repo(mut self, repo: Arc<dyn ClassScheduleRepository>) -> Self {
        self.class_repo = Some(repo);
        self
    }

    pub fn reservation_repo(mut self, repo: Arc<dyn ReservationRepository>) -> Self {
        self.reservation_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn booking_store(mut self, store: Arc<dyn BookingStore>) -> Self {
        self.booking_store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: NotificationDispatcher) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Defaults to `WeeklyGrid::default()` when unset
    pub fn calendar_grid(mut self, grid: WeeklyGrid) -> Self {
        self.calendar_grid = Some(grid);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            class_repo: required(self.class_repo, "class_repo")?,
            reservation_repo: required(self.reservation_repo, "reservation_repo")?,
            membership_repo: required(self.membership_repo, "membership_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            booking_store: required(self.booking_store, "booking_store")?,
            notifier: required(self.notifier, "notifier")?,
            calendar_grid: self.calendar_grid.unwrap_or_default(),
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
}
