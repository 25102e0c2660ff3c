//! Manual rescheduling: move hours of one block to another day.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{round_hours, CapacityTable, Schedule, HOURS_EPSILON};

/// A target day needs at least this much free capacity to accept a move.
const MIN_TARGET_FREE: f64 = 0.01;

/// Errors from a manual reschedule request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RescheduleError {
    #[error("No blocks on {0}")]
    NoBlocksOnDay(NaiveDate),
    #[error("Block index {index} out of range on {day}")]
    BlockOutOfRange { day: NaiveDate, index: usize },
    #[error("No free capacity on {0}")]
    NoFreeCapacity(NaiveDate),
}

/// Move up to `hours` from the block at `block_index` on `from_day` to a
/// new block on `to_day`.
///
/// The amount actually moved is capped by the source block's hours and by
/// the target day's free capacity, and is returned on success. The source
/// block shrinks (and is removed once at or below the pruning tolerance);
/// the target day gains a block with the same task identity, its entry
/// being created if `to_day` lies outside the schedule's span.
///
/// This operation does not re-run the redistributor: a move can leave other
/// days over capacity exactly as they were, and callers wanting the
/// capacity invariant restored must invoke
/// [`crate::redistributor::redistribute`] afterwards.
pub fn move_hours(
    schedule: &mut Schedule,
    from_day: NaiveDate,
    block_index: usize,
    hours: f64,
    to_day: NaiveDate,
    capacity: &CapacityTable,
) -> Result<f64, RescheduleError> {
    let source = schedule.blocks(from_day);
    if source.is_empty() {
        return Err(RescheduleError::NoBlocksOnDay(from_day));
    }
    if block_index >= source.len() {
        return Err(RescheduleError::BlockOutOfRange {
            day: from_day,
            index: block_index,
        });
    }

    let free = schedule.free_hours(to_day, capacity);
    if free < MIN_TARGET_FREE {
        return Err(RescheduleError::NoFreeCapacity(to_day));
    }

    let (task, block_hours) = {
        let block = &schedule.blocks(from_day)[block_index];
        (block.task.clone(), block.hours)
    };
    let moved = hours.min(block_hours).min(free);

    let blocks = schedule
        .blocks_mut(from_day)
        .expect("source day checked above");
    blocks[block_index].hours = round_hours(block_hours - moved);
    if blocks[block_index].hours <= HOURS_EPSILON {
        blocks.remove(block_index);
    }
    schedule.push_block(to_day, &task, moved);

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn schedule_with_block() -> Schedule {
        let mut schedule = Schedule::spanning(d(2025, 1, 1), d(2025, 1, 3));
        schedule.push_block(d(2025, 1, 1), "math", 3.0);
        schedule
    }

    #[test]
    fn test_move_whole_block() {
        let capacity = CapacityTable::uniform(4.0);
        let mut schedule = schedule_with_block();

        let moved =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 3.0, d(2025, 1, 2), &capacity).unwrap();

        assert_eq!(moved, 3.0);
        assert!(schedule.blocks(d(2025, 1, 1)).is_empty());
        let target = schedule.blocks(d(2025, 1, 2));
        assert_eq!(target.len(), 1);
        assert_eq!(target[0].task, "math");
        assert_eq!(target[0].hours, 3.0);
    }

    #[test]
    fn test_partial_move_shrinks_source() {
        let capacity = CapacityTable::uniform(4.0);
        let mut schedule = schedule_with_block();

        let moved =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 1.5, d(2025, 1, 2), &capacity).unwrap();

        assert_eq!(moved, 1.5);
        assert_eq!(schedule.blocks(d(2025, 1, 1))[0].hours, 1.5);
        assert_eq!(schedule.blocks(d(2025, 1, 2))[0].hours, 1.5);
    }

    #[test]
    fn test_move_clamped_by_target_free_capacity() {
        let capacity = CapacityTable::uniform(4.0);
        let mut schedule = schedule_with_block();
        schedule.push_block(d(2025, 1, 2), "physics", 3.0);

        let moved =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 3.0, d(2025, 1, 2), &capacity).unwrap();

        assert_eq!(moved, 1.0);
        assert_eq!(schedule.blocks(d(2025, 1, 1))[0].hours, 2.0);
        assert!((schedule.used_hours(d(2025, 1, 2)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_clamped_by_block_hours() {
        let capacity = CapacityTable::uniform(10.0);
        let mut schedule = schedule_with_block();

        let moved =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 99.0, d(2025, 1, 2), &capacity).unwrap();

        assert_eq!(moved, 3.0);
    }

    #[test]
    fn test_full_target_rejected() {
        let capacity = CapacityTable::uniform(3.0);
        let mut schedule = schedule_with_block();
        schedule.push_block(d(2025, 1, 2), "physics", 3.0);

        let err =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 1.0, d(2025, 1, 2), &capacity).unwrap_err();
        assert_eq!(err, RescheduleError::NoFreeCapacity(d(2025, 1, 2)));
    }

    #[test]
    fn test_empty_source_day_rejected() {
        let capacity = CapacityTable::uniform(3.0);
        let mut schedule = schedule_with_block();

        let err =
            move_hours(&mut schedule, d(2025, 1, 3), 0, 1.0, d(2025, 1, 2), &capacity).unwrap_err();
        assert_eq!(err, RescheduleError::NoBlocksOnDay(d(2025, 1, 3)));
    }

    #[test]
    fn test_bad_block_index_rejected() {
        let capacity = CapacityTable::uniform(3.0);
        let mut schedule = schedule_with_block();

        let err =
            move_hours(&mut schedule, d(2025, 1, 1), 5, 1.0, d(2025, 1, 2), &capacity).unwrap_err();
        assert_eq!(
            err,
            RescheduleError::BlockOutOfRange {
                day: d(2025, 1, 1),
                index: 5
            }
        );
    }

    #[test]
    fn test_move_to_day_outside_span() {
        let capacity = CapacityTable::uniform(4.0);
        let mut schedule = schedule_with_block();

        let moved =
            move_hours(&mut schedule, d(2025, 1, 1), 0, 2.0, d(2025, 1, 10), &capacity).unwrap();

        assert_eq!(moved, 2.0);
        assert!(schedule.contains_day(d(2025, 1, 10)));
        assert_eq!(schedule.blocks(d(2025, 1, 10))[0].task, "math");
    }

    #[test]
    fn test_move_does_not_repair_overloads() {
        // An overload elsewhere in the schedule is none of this operation's
        // business; the caller re-runs the redistributor if it wants the
        // invariant back.
        let capacity = CapacityTable::uniform(4.0);
        let mut schedule = schedule_with_block();
        schedule.push_block(d(2025, 1, 3), "late", 9.0);

        move_hours(&mut schedule, d(2025, 1, 1), 0, 1.0, d(2025, 1, 2), &capacity).unwrap();

        assert!((schedule.used_hours(d(2025, 1, 3)) - 9.0).abs() < 1e-9);
    }
}
