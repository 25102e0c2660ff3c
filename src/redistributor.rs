//! Backward redistribution of over-allocated days.
//!
//! A day can end up holding more hours than its capacity: the allocator
//! recomputes free capacity per task rather than against one shared running
//! total, and manual reschedules append blocks with no capacity check at
//! all. This pass walks the span chronologically and pushes each day's
//! excess onto earlier days that still have room, nearest day first, so
//! effort stays as close to its originally intended date as possible.
//!
//! Best-effort only: when the earlier days cannot absorb an overload, the
//! day is left over capacity and no error is reported. Overflow is never
//! pushed forward to later days.

use crate::config::PlannerConfig;
use crate::models::{round_hours, CapacityTable, Schedule, HOURS_EPSILON, OVERLOAD_EPSILON};
use crate::{log_changes, log_checks};

/// Repair overloaded days in place.
///
/// For every day whose block hours exceed its weekday capacity by more than
/// the overload tolerance, block hours are moved (keeping their task
/// identity) to the nearest earlier days with free capacity until the
/// overload is gone or the earlier days are exhausted. A final cleanup
/// prunes blocks at or below [`HOURS_EPSILON`] and rounds the rest to
/// 2 decimal places.
///
/// Running the pass again on an already-repaired schedule is a no-op.
pub fn redistribute(schedule: &mut Schedule, capacity: &CapacityTable, config: &PlannerConfig) {
    let verbosity = config.verbosity;
    let dates = schedule.dates();

    for (day_idx, &day) in dates.iter().enumerate() {
        let mut overload = schedule.used_hours(day) - capacity.hours_on(day);
        if overload <= OVERLOAD_EPSILON {
            continue;
        }
        log_checks!(verbosity, "{} overloaded by {:.2}h", day, overload);

        let block_count = schedule.blocks(day).len();
        for block_idx in 0..block_count {
            if overload <= 0.0 {
                break;
            }
            let (task, hours) = {
                let block = &schedule.blocks(day)[block_idx];
                (block.task.clone(), block.hours)
            };
            // Blocks emptied earlier in this pass are swept up by the
            // cleanup below, not revisited here.
            if hours <= HOURS_EPSILON {
                continue;
            }
            let mut move_amount = hours.min(overload);

            // Nearest earlier day first.
            for &earlier in dates[..day_idx].iter().rev() {
                let free = schedule.free_hours(earlier, capacity);
                if free <= OVERLOAD_EPSILON {
                    continue;
                }
                let take = free.min(move_amount);
                if take <= 0.0 {
                    continue;
                }
                schedule.push_block(earlier, &task, take);
                if let Some(blocks) = schedule.blocks_mut(day) {
                    blocks[block_idx].hours = round_hours(blocks[block_idx].hours - take);
                }
                move_amount = round_hours(move_amount - take);
                overload = round_hours(overload - take);
                log_changes!(
                    verbosity,
                    "moved {:.2}h of {} from {} to {}",
                    take,
                    task,
                    day,
                    earlier
                );
                if move_amount <= 0.0 || overload <= 0.0 {
                    break;
                }
            }
        }
    }

    schedule.prune_and_round();
}
