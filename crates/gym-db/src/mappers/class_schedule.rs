//! ClassSchedule entity <-> model mapper

use chrono::Weekday;
use gym_core::{ClassId, ClassSchedule, DomainError, TrainerId};

use crate::models::ClassScheduleModel;

use super::corrupt_row;

/// Weekday stored as 0 = Monday .. 6 = Sunday
pub fn weekday_from_index(index: i16) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_to_index(day: Weekday) -> i16 {
    day.num_days_from_monday() as i16
}

impl TryFrom<ClassScheduleModel> for ClassSchedule {
    type Error = DomainError;

    fn try_from(model: ClassScheduleModel) -> Result<Self, Self::Error> {
        let day_of_week = weekday_from_index(model.day_of_week)
            .ok_or_else(|| corrupt_row("class_schedules", "day_of_week", model.day_of_week))?;

        Ok(ClassSchedule {
            id: ClassId::new(model.id),
            trainer_id: TrainerId::new(model.trainer_id),
            name: model.name,
            description: model.description,
            capacity: model.capacity,
            day_of_week,
            start_time: model.start_time,
            end_time: model.end_time,
            start_date: model.start_date,
            end_date: model.end_date,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
