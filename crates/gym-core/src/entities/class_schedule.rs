//! ClassSchedule entity - a recurring class offered on one weekday

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};

use crate::error::DomainError;
use crate::value_objects::{ClassId, TrainerId};

/// Recurring class owned by a trainer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchedule {
    pub id: ClassId,
    pub trainer_id: TrainerId,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassSchedule {
    /// Whether an occurrence on `date` can be booked.
    ///
    /// The class must be active and `date` must fall inside
    /// `[start_date, end_date]`, with an open end when no end date is set.
    pub fn is_bookable_on(&self, date: NaiveDate) -> bool {
        self.active && self.covers(date)
    }

    /// Whether `date` lies inside the configured date range
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    /// Class length in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    /// Check the structural invariants shared by create and update
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_schedule_fields(
            self.capacity,
            self.start_time,
            self.end_time,
            self.start_date,
            self.end_date,
        )
    }
}

/// Values needed to create a class; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClassSchedule {
    pub trainer_id: TrainerId,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewClassSchedule {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Class name must not be empty".to_string(),
            ));
        }
        validate_schedule_fields(
            self.capacity,
            self.start_time,
            self.end_time,
            self.start_date,
            self.end_date,
        )
    }
}

fn validate_schedule_fields(
    capacity: i32,
    start_time: NaiveTime,
    end_time: NaiveTime,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), DomainError> {
    if capacity < 1 {
        return Err(DomainError::InvalidCapacity(capacity));
    }
    if end_time <= start_time {
        return Err(DomainError::ValidationError(
            "Class end time must be after its start time".to_string(),
        ));
    }
    if let Some(end) = end_date {
        if end < start_date {
            return Err(DomainError::ValidationError(
                "Class end date must not precede its start date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_class(id: i64, trainer: i64, capacity: i32) -> ClassSchedule {
    let now = Utc::now();
    ClassSchedule {
        id: ClassId::new(id),
        trainer_id: TrainerId::new(trainer),
        name: "Spinning".to_string(),
        description: None,
        capacity,
        day_of_week: Weekday::Mon,
        start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bookable_inside_range() {
        let class = sample_class(1, 1, 10);
        assert!(class.is_bookable_on(date(2025, 1, 1)));
        assert!(class.is_bookable_on(date(2025, 3, 10)));
        assert!(class.is_bookable_on(date(2025, 6, 30)));
    }

    #[test]
    fn test_not_bookable_outside_range() {
        let class = sample_class(1, 1, 10);
        assert!(!class.is_bookable_on(date(2024, 12, 31)));
        assert!(!class.is_bookable_on(date(2025, 7, 1)));
    }

    #[test]
    fn test_open_ended_range() {
        let mut class = sample_class(1, 1, 10);
        class.end_date = None;
        assert!(class.is_bookable_on(date(2030, 1, 1)));
    }

    #[test]
    fn test_inactive_never_bookable() {
        let mut class = sample_class(1, 1, 10);
        class.set_active(false);
        assert!(!class.is_bookable_on(date(2025, 3, 10)));
        assert!(class.covers(date(2025, 3, 10)));
    }

    #[test]
    fn test_validate() {
        let mut class = sample_class(1, 1, 10);
        assert!(class.validate().is_ok());
        assert_eq!(class.duration_minutes(), 60);

        class.capacity = 0;
        assert!(matches!(class.validate(), Err(DomainError::InvalidCapacity(0))));

        class.capacity = 5;
        class.end_time = class.start_time;
        assert!(matches!(class.validate(), Err(DomainError::ValidationError(_))));

        class.end_time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        class.end_date = Some(date(2024, 1, 1));
        assert!(matches!(class.validate(), Err(DomainError::ValidationError(_))));
    }
}
