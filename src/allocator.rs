//! Two-pass greedy allocation of task hours onto the capacity calendar.
//!
//! Each task's required hours are spread across the days from the start
//! date through the task's deadline, taking whatever free capacity each day
//! still has. This is a heuristic, not an optimal bin-packer: it places
//! tasks in a fixed urgency order and never revisits a placement, so a task
//! can end with a nonzero remainder even though a different packing would
//! have fit it.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::config::PlannerConfig;
use crate::models::{round_hours, CapacityTable, RemainderMap, Schedule, Task, HOURS_EPSILON};
use crate::sorting::allocation_order;
use crate::{log_changes, log_checks, log_debug};

/// Output of one allocation run: the draft schedule and the per-task
/// leftover hours. Both are derived fresh on every run.
#[derive(Clone, Debug)]
pub struct AllocationResult {
    pub schedule: Schedule,
    pub remainders: RemainderMap,
}

impl AllocationResult {
    /// True if any task could not be fully placed within its deadline.
    pub fn has_unplaced(&self) -> bool {
        self.remainders.values().any(|&rem| rem > HOURS_EPSILON)
    }
}

/// Greedy allocator. Consumes the task list and capacity table read-only
/// and produces a fresh [`Schedule`] spanning the start date through the
/// latest deadline.
///
/// No error paths: input is assumed sanitized (non-negative hours and
/// capacities). Insufficient capacity shows up as a nonzero remainder,
/// never as a failure. A task whose deadline precedes the start date gets
/// no capacity at all; its full requirement lands in the remainder.
pub struct Allocator<'a> {
    tasks: &'a [Task],
    capacity: &'a CapacityTable,
    start_date: NaiveDate,
    config: PlannerConfig,
}

impl<'a> Allocator<'a> {
    pub fn new(tasks: &'a [Task], capacity: &'a CapacityTable, start_date: NaiveDate) -> Self {
        Self {
            tasks,
            capacity,
            start_date,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run both allocation passes.
    ///
    /// Pass 1 walks tasks in urgency order (deadline ascending, priority
    /// descending) and gives each one whatever free capacity its deadline
    /// window still holds. Pass 2 re-walks every task that kept a nonzero
    /// remainder, recomputing free capacity from the schedule as it now
    /// stands. An empty task set yields an empty schedule and remainder map.
    pub fn allocate(&self) -> AllocationResult {
        if self.tasks.is_empty() {
            return AllocationResult {
                schedule: Schedule::new(),
                remainders: FxHashMap::default(),
            };
        }

        let verbosity = self.config.verbosity;
        let max_deadline = self
            .tasks
            .iter()
            .map(|t| t.deadline)
            .max()
            .unwrap_or(self.start_date);
        let mut schedule = Schedule::spanning(self.start_date, max_deadline);
        let dates = schedule.dates();

        let mut remainders: RemainderMap = self
            .tasks
            .iter()
            .map(|t| (t.name.clone(), t.required_hours))
            .collect();

        let order = allocation_order(self.tasks);

        // First pass: urgency order, each task takes what its window holds.
        for task in &order {
            let before = remainders[&task.name];
            let after = self.place(task, before, &dates, &mut schedule);
            log_debug!(
                verbosity,
                "pass 1: {} remainder {:.2} -> {:.2}",
                task.name,
                before,
                after
            );
            remainders.insert(task.name.clone(), after);
        }

        // Second pass: re-walk leftovers against the current schedule state,
        // claiming any capacity freed up since the task was first placed.
        for task in &order {
            let before = remainders[&task.name];
            if before <= HOURS_EPSILON {
                continue;
            }
            let after = self.place(task, before, &dates, &mut schedule);
            log_debug!(
                verbosity,
                "pass 2: {} remainder {:.2} -> {:.2}",
                task.name,
                before,
                after
            );
            remainders.insert(task.name.clone(), after);
        }

        AllocationResult {
            schedule,
            remainders,
        }
    }

    /// Walk the span chronologically, placing up to `remaining` hours of
    /// `task` on days with free capacity, stopping past the deadline.
    /// Returns the final remainder, zero-clamped at the tolerance.
    fn place(
        &self,
        task: &Task,
        mut remaining: f64,
        dates: &[NaiveDate],
        schedule: &mut Schedule,
    ) -> f64 {
        let verbosity = self.config.verbosity;
        if remaining <= HOURS_EPSILON {
            return 0.0;
        }

        for &date in dates {
            // Days beyond the deadline are never eligible for this task.
            if date > task.deadline {
                log_checks!(verbosity, "{}: past deadline at {}, stopping", task.name, date);
                break;
            }
            let free = schedule.free_hours(date, self.capacity);
            if free <= 0.0 {
                log_checks!(verbosity, "{}: {} is full, skipping", task.name, date);
                continue;
            }
            let alloc = free.min(remaining);
            schedule.push_block(date, &task.name, alloc);
            log_changes!(
                verbosity,
                "placed {:.2}h of {} on {}",
                alloc,
                task.name,
                date
            );
            remaining = round_hours(remaining - alloc);
            if remaining <= HOURS_EPSILON {
                return 0.0;
            }
        }

        remaining
    }
}
