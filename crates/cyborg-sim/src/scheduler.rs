//! Cancellable delayed tasks on the game clock.
//!
//! Timed follow-ups (bullet self-removal, highlight revert) are scheduled
//! here instead of living as engine-side action sequences. Entities that own
//! a task store its `TaskHandle`, so removing the entity early can cancel it.

use hecs::Entity;

use cyborg_core::types::TaskHandle;

/// What to do when a task comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedAction {
    /// Remove the node from the scene.
    Despawn(Entity),
    /// Reset the node's material emission.
    ClearHighlight(Entity),
}

/// Slack when comparing clock readings. A task due `d` seconds after a
/// frame time `t` is compared against later frame times, and `t + d` can
/// round just above the frame time that should trigger it.
pub const DUE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    due: f64,
    action: TimedAction,
}

/// Pending tasks, kept sorted by due time (ties in schedule order).
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run once the game clock reaches `due`.
    pub fn schedule(&mut self, due: f64, action: TimedAction) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        // Insert after every task due at or before `due` to keep FIFO ties.
        let index = self.tasks.partition_point(|task| task.due <= due);
        self.tasks.insert(
            index,
            ScheduledTask {
                handle,
                due,
                action,
            },
        );
        handle
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.tasks.iter().position(|task| task.handle == handle) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return every action due at `now` (within
    /// `DUE_TOLERANCE`), in due order.
    pub fn drain_due(&mut self, now: f64) -> Vec<TimedAction> {
        let ready = self
            .tasks
            .partition_point(|task| task.due <= now + DUE_TOLERANCE);
        self.tasks.drain(..ready).map(|task| task.action).collect()
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Due time of a pending task.
    pub fn due_time(&self, handle: TaskHandle) -> Option<f64> {
        self.tasks
            .iter()
            .find(|task| task.handle == handle)
            .map(|task| task.due)
    }
}
