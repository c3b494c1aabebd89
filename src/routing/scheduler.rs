use std::thread;
use std::time::Duration;

use crate::traits::scheduler::{ScheduledTask, TaskScheduler};

/// `TaskScheduler` backed by a short-lived named thread.
///
/// For hosts without a cooperative message queue to post onto. Spawn
/// failure is logged and the task dropped, matching the fire-and-forget
/// contract.
pub struct ThreadScheduler;

impl TaskScheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        let spawned = thread::Builder::new().name("overlay-patch".into()).spawn(move || {
            thread::sleep(delay);
            task();
        });
        if let Err(e) = spawned {
            log::error!("failed to spawn scheduler thread: {}", e);
        }
    }
}
