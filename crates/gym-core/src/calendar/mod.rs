//! Weekly calendar layout
//!
//! Places recurring classes on a week grid: one column per weekday
//! (Monday = 0) and one row per time slot starting at the grid's start time.
//! Classes that overlap on the same day are spread over side-by-side lanes.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::entities::ClassSchedule;
use crate::error::DomainError;
use crate::value_objects::ClassId;

/// One class positioned on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarBlock {
    pub class_id: ClassId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub column: u8,
    pub row_start: u32,
    pub row_span: u32,
    pub lane: u32,
    pub lanes: u32,
}

impl CalendarBlock {
    /// First row after the block
    #[inline]
    pub fn row_end(&self) -> u32 {
        self.row_start + self.row_span
    }
}

/// Time window and resolution of the week grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyGrid {
    start: NaiveTime,
    end: NaiveTime,
    slot_minutes: u32,
}

impl Default for WeeklyGrid {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
        }
    }
}

impl WeeklyGrid {
    pub fn new(start: NaiveTime, end: NaiveTime, slot_minutes: u32) -> Result<Self, DomainError> {
        if slot_minutes == 0 {
            return Err(DomainError::ValidationError(
                "Calendar slot length must be positive".to_string(),
            ));
        }
        if end <= start {
            return Err(DomainError::ValidationError(
                "Calendar must end after it starts".to_string(),
            ));
        }
        Ok(Self {
            start,
            end,
            slot_minutes,
        })
    }

    /// Grid spanning whole hours, e.g. `from_hours(6, 22, 30)`
    pub fn from_hours(start_hour: u32, end_hour: u32, slot_minutes: u32) -> Result<Self, DomainError> {
        let start = NaiveTime::from_hms_opt(start_hour, 0, 0);
        // 24 means "until midnight"
        let end = if end_hour == 24 {
            NaiveTime::from_hms_opt(23, 59, 59)
        } else {
            NaiveTime::from_hms_opt(end_hour, 0, 0)
        };
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end, slot_minutes),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid calendar hours {start_hour}..{end_hour}"
            ))),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Number of rows in the grid
    pub fn rows(&self) -> u32 {
        let minutes = minutes_between(self.start, self.end);
        minutes.div_ceil(self.slot_minutes)
    }

    /// Row start and span for a time range, clamped to the grid.
    ///
    /// `None` when the range lies entirely outside the grid.
    pub fn place(&self, start: NaiveTime, end: NaiveTime) -> Option<(u32, u32)> {
        let start = start.max(self.start);
        let end = end.min(self.end);
        if end <= start {
            return None;
        }

        let row_start = minutes_between(self.start, start) / self.slot_minutes;
        let row_end = minutes_between(self.start, end).div_ceil(self.slot_minutes);
        Some((row_start, row_end.saturating_sub(row_start).max(1)))
    }

    /// Lay out the active classes on the week grid
    pub fn layout(&self, classes: &[ClassSchedule]) -> Vec<CalendarBlock> {
        let mut blocks: Vec<CalendarBlock> = classes
            .iter()
            .filter(|class| class.active)
            .filter_map(|class| {
                let (row_start, row_span) = self.place(class.start_time, class.end_time)?;
                Some(CalendarBlock {
                    class_id: class.id,
                    name: class.name.clone(),
                    start_time: class.start_time,
                    end_time: class.end_time,
                    column: class.day_of_week.num_days_from_monday() as u8,
                    row_start,
                    row_span,
                    lane: 0,
                    lanes: 1,
                })
            })
            .collect();

        assign_lanes(&mut blocks);
        blocks
    }
}

fn minutes_between(from: NaiveTime, to: NaiveTime) -> u32 {
    let from = from.num_seconds_from_midnight() / 60;
    let to = to.num_seconds_from_midnight() / 60;
    to.saturating_sub(from)
}

/// Greedy interval partitioning per day. Blocks of one overlap cluster share
/// the cluster's lane count.
fn assign_lanes(blocks: &mut [CalendarBlock]) {
    blocks.sort_by_key(|b| (b.column, b.row_start, b.row_end(), b.class_id));

    let mut cluster_start = 0;
    let mut cluster_end = 0;
    let mut column = None;
    let mut lane_ends: Vec<u32> = Vec::new();

    for i in 0..blocks.len() {
        let (block_column, row_start, row_end) =
            (blocks[i].column, blocks[i].row_start, blocks[i].row_end());

        if column != Some(block_column) || row_start >= cluster_end {
            close_cluster(&mut blocks[cluster_start..i], lane_ends.len());
            cluster_start = i;
            cluster_end = 0;
            column = Some(block_column);
            lane_ends.clear();
        }

        let lane = match lane_ends.iter().position(|&end| end <= row_start) {
            Some(free) => {
                lane_ends[free] = row_end;
                free
            }
            None => {
                lane_ends.push(row_end);
                lane_ends.len() - 1
            }
        };
        blocks[i].lane = lane as u32;
        cluster_end = cluster_end.max(row_end);
    }

    close_cluster(&mut blocks[cluster_start..], lane_ends.len());
}

fn close_cluster(cluster: &mut [CalendarBlock], lanes: usize) {
    for block in cluster {
        block.lanes = lanes.max(1) as u32;
    }
}
