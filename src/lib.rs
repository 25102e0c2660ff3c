//! Allocation and redistribution core for a study planner.
//!
//! Given a task list (name, deadline, priority, required hours), a
//! per-weekday capacity table, and a start date, this crate produces a
//! day-by-day schedule of (task, hours) blocks, reports any effort that
//! could not be placed before its deadline, and repairs days that ended up
//! over capacity by shifting the excess to earlier days with spare room.
//!
//! The usual flow is allocate, then redistribute:
//!
//! ```
//! use chrono::NaiveDate;
//! use studyplan::{redistribute, Allocator, CapacityTable, PlannerConfig, Task};
//!
//! let capacity = CapacityTable::uniform(2.0);
//! let tasks = vec![Task::new(
//!     "algebra",
//!     NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
//!     3,
//!     6.0,
//! )];
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! let mut result = Allocator::new(&tasks, &capacity, start).allocate();
//! redistribute(&mut result.schedule, &capacity, &PlannerConfig::default());
//!
//! assert!(!result.has_unplaced());
//! ```
//!
//! Task records, capacity entry, effort estimation, persistence, and
//! display are all external collaborators; this crate consumes and produces
//! plain data structures and performs no I/O.

pub mod allocator;
pub mod config;
pub mod logging;
pub mod models;
pub mod priority;
pub mod redistributor;
pub mod reschedule;
pub mod sorting;

pub use allocator::{AllocationResult, Allocator};
pub use config::PlannerConfig;
pub use models::{
    round_hours, Block, CapacityTable, RemainderMap, Schedule, Task, HOURS_EPSILON,
    OVERLOAD_EPSILON,
};
pub use priority::adjust_close_deadline_priorities;
pub use redistributor::redistribute;
pub use reschedule::{move_hours, RescheduleError};
pub use sorting::allocation_order;
