//! Delayed UI effects (banner auto-clear, post-payment redirect).

use gloo_timers::callback::Timeout;

/// A scheduled task that has not fired yet.
pub trait TaskHandle {
    /// Prevent the task from running. No-op once it has fired.
    fn cancel(self);
}

/// Runs a task once after a delay on the UI thread.
pub trait Scheduler {
    type Handle: TaskHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout`-backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

impl TaskHandle for Timeout {
    fn cancel(self) {
        // Discard the task that never ran.
        drop(Timeout::cancel(self));
    }
}
