//! Rule-based priority adjustment for tasks with crowded deadlines.

use crate::models::Task;

/// How close two deadlines must be (in days) for the bump to apply.
const CLOSE_DEADLINE_DAYS: i64 = 2;

/// Bump priorities where deadlines crowd each other.
///
/// Tasks are considered in deadline order; for each adjacent pair whose
/// deadlines fall within 2 days of each other, the harder task of the pair
/// gets a one-point priority bump (on a difficulty tie, the earlier task).
/// Runs before allocation; the allocator only sees the resulting priority
/// values.
pub fn adjust_close_deadline_priorities(tasks: &mut [Task]) {
    let mut by_deadline: Vec<usize> = (0..tasks.len()).collect();
    // Stable sort: equal deadlines keep their input order, as the pairwise
    // comparison below depends on it.
    by_deadline.sort_by_key(|&i| tasks[i].deadline);

    for pair in by_deadline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let gap = (tasks[b].deadline - tasks[a].deadline).num_days().abs();
        if gap > CLOSE_DEADLINE_DAYS {
            continue;
        }
        if tasks[a].difficulty < tasks[b].difficulty {
            tasks[b].priority += 1;
        } else {
            tasks[a].priority += 1;
        }
    }
}
