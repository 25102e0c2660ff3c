//! Allocation ordering for tasks.
//!
//! Tasks are placed in order of (deadline ascending, priority descending):
//! urgency dominates, and on deadline ties the higher-priority task claims
//! capacity first. The task name breaks remaining ties so that equal
//! (deadline, priority) pairs allocate deterministically.

use chrono::NaiveDate;

use crate::models::Task;

/// Sort key for allocation order. Lower sorts first, i.e. is placed first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AllocationKey {
    pub deadline: NaiveDate,
    /// Negated so the derived ordering places higher priorities first.
    neg_priority: i64,
    pub name: String,
}

impl AllocationKey {
    pub fn for_task(task: &Task) -> Self {
        Self {
            deadline: task.deadline,
            neg_priority: -i64::from(task.priority),
            name: task.name.clone(),
        }
    }
}

/// Tasks in the order the allocator should place them.
pub fn allocation_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| AllocationKey::for_task(task));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(name: &str, deadline: NaiveDate, priority: i32) -> Task {
        Task::new(name, deadline, 3, 2.0).with_priority(priority)
    }

    #[test]
    fn test_earlier_deadline_first() {
        let tasks = vec![
            task("late", d(2025, 3, 1), 5),
            task("early", d(2025, 2, 1), 1),
        ];
        let order = allocation_order(&tasks);
        assert_eq!(order[0].name, "early");
        assert_eq!(order[1].name, "late");
    }

    #[test]
    fn test_priority_breaks_deadline_ties() {
        let tasks = vec![
            task("low", d(2025, 2, 1), 1),
            task("high", d(2025, 2, 1), 5),
        ];
        let order = allocation_order(&tasks);
        assert_eq!(order[0].name, "high");
        assert_eq!(order[1].name, "low");
    }

    #[test]
    fn test_name_breaks_full_ties() {
        let tasks = vec![
            task("b", d(2025, 2, 1), 3),
            task("a", d(2025, 2, 1), 3),
        ];
        let order = allocation_order(&tasks);
        assert_eq!(order[0].name, "a");
        assert_eq!(order[1].name, "b");
    }

    #[test]
    fn test_extreme_priority_values() {
        let tasks = vec![
            task("min", d(2025, 2, 1), i32::MIN),
            task("max", d(2025, 2, 1), i32::MAX),
        ];
        let order = allocation_order(&tasks);
        assert_eq!(order[0].name, "max");
    }
}
