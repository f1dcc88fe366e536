//! In-memory store and sinks for service tests

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use tokio::sync::{Mutex, OwnedMutexGuard};

use gym_core::traits::{
    BookingStore, BookingTx, ClassScheduleRepository, MemberRepository, MembershipRepository,
    NotificationRepository, NotificationSink, RepoResult, ReservationRepository,
};
use gym_core::{
    ClassId, ClassSchedule, DomainError, Member, MemberId, Membership, MembershipId,
    MembershipStatus, NewClassSchedule, NewNotification, NewReservation, Notification,
    NotificationId, Reservation, ReservationId, ReservationStatus, Role, TrainerId,
};

use super::context::ServiceContext;
use super::dispatcher::NotificationDispatcher;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday 07:00-08:00 class running 2025-01-01..=2025-06-30
pub fn class_schedule(id: ClassId, trainer_id: TrainerId, capacity: i32) -> ClassSchedule {
    let now = Utc::now();
    ClassSchedule {
        id,
        trainer_id,
        name: "Spinning".to_string(),
        description: None,
        capacity,
        day_of_week: Weekday::Mon,
        start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        start_date: date(2025, 1, 1),
        end_date: Some(date(2025, 6, 30)),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn reservation(
    id: i64,
    class_id: ClassId,
    member_id: MemberId,
    occurrence_date: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    let now = Utc::now();
    Reservation {
        id: ReservationId::new(id),
        class_id,
        member_id,
        occurrence_date,
        status,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Debug, Clone, Default)]
struct State {
    classes: BTreeMap<ClassId, ClassSchedule>,
    reservations: BTreeMap<ReservationId, Reservation>,
    memberships: Vec<Membership>,
    members: HashMap<MemberId, Member>,
    notifications: Vec<Notification>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn count_occupied(&self, class_id: ClassId, date: NaiveDate) -> i64 {
        let occupied = self
            .reservations
            .values()
            .filter(|r| r.class_id == class_id && r.occurrence_date == date)
            .filter(|r| r.status.occupies_slot())
            .count();
        i64::try_from(occupied).unwrap_or(i64::MAX)
    }

    fn find_current(&self, member_id: MemberId, on: NaiveDate) -> Option<Membership> {
        self.memberships
            .iter()
            .filter(|m| m.member_id == member_id && m.is_valid_on(on))
            .max_by_key(|m| m.expiration_date)
            .cloned()
    }
}

/// Every port backed by one mutex-guarded state.
///
/// A booking transaction holds the mutex until commit or drop, which is a
/// coarser stand-in for the class row lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context over this store, delivering notifications to `sinks`
    pub fn context(&self, sinks: Vec<Arc<dyn NotificationSink>>) -> ServiceContext {
        let (notifier, _worker) = NotificationDispatcher::spawn(sinks, 64);
        let store = Arc::new(self.clone());
        ServiceContext::builder()
            .class_repo(store.clone())
            .reservation_repo(store.clone())
            .membership_repo(store.clone())
            .member_repo(store.clone())
            .notification_repo(store.clone())
            .booking_store(store)
            .notifier(notifier)
            .build()
            .unwrap()
    }

    /// Make new booking transactions fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn add_class(&self, class: ClassSchedule) {
        self.state.lock().await.classes.insert(class.id, class);
    }

    pub async fn add_member(&self, id: i64, first_name: &str, last_name: &str) -> MemberId {
        let member_id = MemberId::new(id);
        self.state.lock().await.members.insert(
            member_id,
            Member {
                id: member_id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: format!("member{id}@example.com"),
                active: true,
            },
        );
        member_id
    }

    pub async fn add_membership(
        &self,
        member_id: MemberId,
        status: MembershipStatus,
        expiration_date: NaiveDate,
    ) {
        let mut state = self.state.lock().await;
        let id = MembershipId::new(state.next_id());
        state.memberships.push(Membership {
            id,
            member_id,
            plan_name: "Monthly".to_string(),
            status,
            start_date: date(2024, 1, 1),
            expiration_date,
        });
    }

    pub async fn add_reservation(
        &self,
        class_id: ClassId,
        member_id: MemberId,
        occurrence_date: NaiveDate,
        status: ReservationStatus,
    ) -> ReservationId {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        let reservation = reservation(id, class_id, member_id, occurrence_date, status);
        state.reservations.insert(reservation.id, reservation);
        ReservationId::new(id)
    }

    pub async fn reservations(&self) -> Vec<Reservation> {
        self.state.lock().await.reservations.values().cloned().collect()
    }

    pub async fn reservation(&self, id: ReservationId) -> Option<Reservation> {
        self.state.lock().await.reservations.get(&id).cloned()
    }

    pub async fn class(&self, id: ClassId) -> Option<ClassSchedule> {
        self.state.lock().await.classes.get(&id).cloned()
    }
}

// ============================================================================
// Booking store
// ============================================================================

/// Works on a copy of the state; commit publishes the copy
pub struct MemoryTx {
    guard: OwnedMutexGuard<State>,
    staged: State,
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn BookingTx>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTx { guard, staged }))
    }
}

#[async_trait]
impl BookingTx for MemoryTx {
    async fn lock_class(&mut self, class_id: ClassId) -> RepoResult<Option<ClassSchedule>> {
        Ok(self.staged.classes.get(&class_id).cloned())
    }

    async fn lock_reservation(&mut self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        Ok(self.staged.reservations.get(&id).cloned())
    }

    async fn count_occupied(&mut self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64> {
        // Let racing admissions run up to the lock
        tokio::task::yield_now().await;
        Ok(self.staged.count_occupied(class_id, date))
    }

    async fn has_active_reservation(
        &mut self,
        class_id: ClassId,
        member_id: MemberId,
        date: NaiveDate,
    ) -> RepoResult<bool> {
        Ok(self.staged.reservations.values().any(|r| {
            r.class_id == class_id
                && r.member_id == member_id
                && r.occurrence_date == date
                && r.status.blocks_duplicate()
        }))
    }

    async fn has_current_membership(
        &mut self,
        member_id: MemberId,
        on: NaiveDate,
    ) -> RepoResult<bool> {
        Ok(self.staged.find_current(member_id, on).is_some())
    }

    async fn insert_reservation(
        &mut self,
        new: &NewReservation,
    ) -> RepoResult<Reservation> {
        let duplicate = self.staged.reservations.values().any(|r| {
            r.class_id == new.class_id
                && r.member_id == new.member_id
                && r.occurrence_date == new.occurrence_date
                && r.status.blocks_duplicate()
        });
        if duplicate {
            return Err(DomainError::DuplicateReservation);
        }

        let id = self.staged.next_id();
        let created = reservation(id, new.class_id, new.member_id, new.occurrence_date, new.status);
        self.staged.reservations.insert(created.id, created.clone());
        Ok(created)
    }

    async fn move_reservation(
        &mut self,
        id: ReservationId,
        date: NaiveDate,
    ) -> RepoResult<Reservation> {
        let reservation = self
            .staged
            .reservations
            .get_mut(&id)
            .ok_or(DomainError::ReservationNotFound(id))?;
        reservation.occurrence_date = date;
        reservation.status = ReservationStatus::Rescheduled;
        reservation.updated_at = Utc::now();
        Ok(reservation.clone())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let MemoryTx { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[async_trait]
impl ClassScheduleRepository for MemoryStore {
    async fn find_by_id(&self, id: ClassId) -> RepoResult<Option<ClassSchedule>> {
        Ok(self.state.lock().await.classes.get(&id).cloned())
    }

    async fn find_by_trainer(&self, trainer_id: TrainerId) -> RepoResult<Vec<ClassSchedule>> {
        let state = self.state.lock().await;
        Ok(state
            .classes
            .values()
            .filter(|c| c.trainer_id == trainer_id)
            .cloned()
            .collect())
    }

    async fn find_active(&self) -> RepoResult<Vec<ClassSchedule>> {
        let state = self.state.lock().await;
        let mut classes: Vec<_> = state.classes.values().filter(|c| c.active).cloned().collect();
        classes.sort_by_key(|c| (c.day_of_week.num_days_from_monday(), c.start_time));
        Ok(classes)
    }

    async fn create(&self, new: &NewClassSchedule) -> RepoResult<ClassSchedule> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let class = ClassSchedule {
            id: ClassId::new(state.next_id()),
            trainer_id: new.trainer_id,
            name: new.name.clone(),
            description: new.description.clone(),
            capacity: new.capacity,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            start_date: new.start_date,
            end_date: new.end_date,
            active: true,
            created_at: now,
            updated_at: now,
        };
        state.classes.insert(class.id, class.clone());
        Ok(class)
    }

    async fn update(
        &self,
        class: &ClassSchedule,
        read_at: DateTime<Utc>,
    ) -> RepoResult<ClassSchedule> {
        let mut state = self.state.lock().await;
        match state.classes.get_mut(&class.id) {
            Some(existing) if existing.updated_at != read_at => {
                Err(DomainError::ClassModified(class.id))
            }
            Some(existing) => {
                let updated_at = (existing.updated_at + chrono::Duration::microseconds(1))
                    .max(Utc::now());
                *existing = ClassSchedule {
                    updated_at,
                    ..class.clone()
                };
                Ok(existing.clone())
            }
            None => Err(DomainError::ClassNotFound(class.id)),
        }
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn find_by_id(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        Ok(self.reservation(id).await)
    }

    async fn find_by_occurrence(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        let state = self.state.lock().await;
        Ok(state
            .reservations
            .values()
            .filter(|r| r.class_id == class_id && r.occurrence_date == date)
            .cloned()
            .collect())
    }

    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reservation>> {
        let state = self.state.lock().await;
        let mut reservations: Vec<_> = state
            .reservations
            .values()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.occurrence_date.cmp(&a.occurrence_date));
        Ok(reservations)
    }

    async fn count_occupied(&self, class_id: ClassId, date: NaiveDate) -> RepoResult<i64> {
        Ok(self.state.lock().await.count_occupied(class_id, date))
    }

    async fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> RepoResult<Option<Reservation>> {
        let mut state = self.state.lock().await;
        Ok(state
            .reservations
            .get_mut(&id)
            .filter(|r| r.status == expected)
            .map(|r| {
                r.status = next;
                r.updated_at = Utc::now();
                r.clone()
            }))
    }

    async fn delete(&self, id: ReservationId) -> RepoResult<bool> {
        Ok(self.state.lock().await.reservations.remove(&id).is_some())
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn find_current(
        &self,
        member_id: MemberId,
        on: NaiveDate,
    ) -> RepoResult<Option<Membership>> {
        Ok(self.state.lock().await.find_current(member_id, on))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.state.lock().await.members.get(&id).cloned())
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, new: &NewNotification) -> RepoResult<Notification> {
        let mut state = self.state.lock().await;
        let notification = Notification {
            id: NotificationId::new(state.next_id()),
            recipient_role: new.recipient_role,
            recipient_id: new.recipient_id,
            event_type: new.event_type.clone(),
            title: new.title.clone(),
            message: new.message.clone(),
            read_at: None,
            created_at: Utc::now(),
        };
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn find_for_recipient(
        &self,
        role: Role,
        recipient_id: i64,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_role == role && n.recipient_id == recipient_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        role: Role,
        recipient_id: i64,
    ) -> RepoResult<Option<Notification>> {
        let mut state = self.state.lock().await;
        Ok(state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient_role == role && n.recipient_id == recipient_id)
            .map(|n| {
                n.read_at.get_or_insert_with(Utc::now);
                n.clone()
            }))
    }
}

#[async_trait]
impl NotificationSink for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn deliver(&self, notification: &NewNotification) -> RepoResult<()> {
        NotificationRepository::create(self, notification).await.map(|_| ())
    }
}

// ============================================================================
// Sinks
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<std::sync::Mutex<Vec<NewNotification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<NewNotification> {
        self.delivered.lock().unwrap().clone()
    }

    /// Wait until at least `count` notifications arrived, or give up after a second
    pub async fn wait_for(&self, count: usize) -> Vec<NewNotification> {
        for _ in 0..100 {
            let delivered = self.delivered();
            if delivered.len() >= count {
                return delivered;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.delivered()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, notification: &NewNotification) -> RepoResult<()> {
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Sink whose transport is always down
pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn deliver(&self, _notification: &NewNotification) -> RepoResult<()> {
        Err(DomainError::CacheError("publish failed".to_string()))
    }
}
