use std::time::Duration;

/// One-shot task to run after a delay.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Fire-and-forget delayed scheduling.
///
/// Hosts with a cooperative message queue post the task onto it; hosts
/// without one can use `routing::ThreadScheduler`. There is no cancellation
/// hook and no result channel: once scheduled, the task runs to completion
/// or failure and reports nothing back.
pub trait TaskScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ScheduledTask);
}
