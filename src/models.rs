//! Core data types for the allocation and redistribution engine.

use chrono::{Datelike, NaiveDate, Weekday};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Tolerance below which an hour quantity is treated as zero.
///
/// Used for remainder clamping and block pruning. Hour sums are never
/// compared to exact zero.
pub const HOURS_EPSILON: f64 = 0.001;

/// Tolerance for capacity-overload comparisons in the redistributor.
pub const OVERLOAD_EPSILON: f64 = 0.0001;

/// Round an hour quantity to 2 decimal places, the storage precision for
/// block hours. Idempotent: rounding an already-rounded value is a no-op.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// A unit of work to be placed on the calendar.
///
/// The allocator consumes tasks read-only; it assumes the caller has already
/// sanitized them (non-negative hours, valid deadline). `difficulty` seeds
/// the default priority and drives the close-deadline priority bump; the
/// allocator itself never reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Inclusive upper bound for placement. Days after this date never
    /// receive hours for this task.
    pub deadline: NaiveDate,
    /// Difficulty rating, 1-5.
    pub difficulty: i32,
    /// Total effort to place, in hours (non-negative).
    pub required_hours: f64,
    /// Higher priority wins on deadline ties.
    pub priority: i32,
}

impl Task {
    /// Create a task. Priority starts equal to difficulty; a pre-pass such
    /// as [`crate::priority::adjust_close_deadline_priorities`] may bump it
    /// before allocation.
    pub fn new(
        name: impl Into<String>,
        deadline: NaiveDate,
        difficulty: i32,
        required_hours: f64,
    ) -> Self {
        Self {
            name: name.into(),
            deadline,
            difficulty,
            required_hours,
            priority: difficulty,
        }
    }

    /// Override the priority (builder style).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Hours of one task allocated to one calendar day.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Name of the task this block belongs to.
    pub task: String,
    /// Allocated hours, rounded to 2 decimal places.
    pub hours: f64,
}

/// Leftover unscheduled hours per task after allocation. Zero means fully
/// placed.
pub type RemainderMap = FxHashMap<String, f64>;

/// Per-weekday capacity in hours. A weekday with no entry has zero capacity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapacityTable {
    hours: FxHashMap<Weekday, f64>,
}

impl CapacityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with the same capacity on all seven weekdays.
    pub fn uniform(hours: f64) -> Self {
        use Weekday::*;
        [Mon, Tue, Wed, Thu, Fri, Sat, Sun]
            .into_iter()
            .map(|wd| (wd, hours))
            .collect()
    }

    pub fn set(&mut self, weekday: Weekday, hours: f64) {
        self.hours.insert(weekday, hours);
    }

    /// Capacity for a weekday; 0.0 if the weekday has no entry.
    pub fn hours_for(&self, weekday: Weekday) -> f64 {
        self.hours.get(&weekday).copied().unwrap_or(0.0)
    }

    /// Capacity for the weekday a date falls on.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.hours_for(date.weekday())
    }
}

impl FromIterator<(Weekday, f64)> for CapacityTable {
    fn from_iter<T: IntoIterator<Item = (Weekday, f64)>>(iter: T) -> Self {
        Self {
            hours: iter.into_iter().collect(),
        }
    }
}

/// Day-ordered allocation: one entry per calendar day of the planning span,
/// each holding the blocks placed on that day in placement order.
///
/// The block lists are the single source of truth for a day's used hours;
/// free capacity is always derived from them on demand rather than tracked
/// in a shadow counter that could drift.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, Vec<Block>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// A schedule with one empty entry per day from `start` through `end`
    /// inclusive. Empty if `end` precedes `start`.
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        let mut days = BTreeMap::new();
        let mut cur = start;
        while cur <= end {
            days.insert(cur, Vec::new());
            match cur.succ_opt() {
                Some(next) => cur = next,
                None => break,
            }
        }
        Self { days }
    }

    /// All days of the span in chronological order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    pub fn contains_day(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Blocks on a day, in placement order. Empty slice for days outside
    /// the span.
    pub fn blocks(&self, date: NaiveDate) -> &[Block] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn blocks_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<Block>> {
        self.days.get_mut(&date)
    }

    /// Append a block for `task`, rounding the hours to 2 decimal places.
    /// Creates the day entry if the date lies outside the current span.
    pub fn push_block(&mut self, date: NaiveDate, task: &str, hours: f64) {
        self.days.entry(date).or_default().push(Block {
            task: task.to_string(),
            hours: round_hours(hours),
        });
    }

    /// Total hours allocated on a day, summed from the live block list.
    pub fn used_hours(&self, date: NaiveDate) -> f64 {
        self.blocks(date).iter().map(|b| b.hours).sum()
    }

    /// Capacity minus used hours for a day. Negative when overloaded.
    pub fn free_hours(&self, date: NaiveDate, capacity: &CapacityTable) -> f64 {
        capacity.hours_on(date) - self.used_hours(date)
    }

    /// Total hours placed for one task across the whole span.
    pub fn task_hours(&self, task: &str) -> f64 {
        self.days
            .values()
            .flatten()
            .filter(|b| b.task == task)
            .map(|b| b.hours)
            .sum()
    }

    /// Iterate `(date, blocks)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Block])> {
        self.days.iter().map(|(d, b)| (*d, b.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days in the span.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Drop blocks at or below [`HOURS_EPSILON`] and round the survivors to
    /// 2 decimal places.
    pub fn prune_and_round(&mut self) {
        for blocks in self.days.values_mut() {
            blocks.retain(|b| b.hours > HOURS_EPSILON);
            for block in blocks.iter_mut() {
                block.hours = round_hours(block.hours);
            }
        }
    }
}
