use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep};

/// Per-connection inactivity timer.
///
/// Disarmed until the first `rearm`. While disarmed, `expired` never
/// completes, so it can sit in a `select!` next to a read without firing.
#[derive(Debug)]
pub struct InactivityTimer {
    period: Duration,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl InactivityTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Pushes the deadline to `now + period`, arming the timer if needed.
    pub fn rearm(&mut self) {
        let at = Instant::now() + self.period;
        match self.deadline.as_mut() {
            Some(deadline) => deadline.as_mut().reset(at),
            None => self.deadline = Some(Box::pin(sleep(self.period))),
        }
    }

    /// Disarms the timer. Returns whether it was armed; cancelling a
    /// disarmed timer does nothing.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Completes when the armed deadline passes.
    pub async fn expired(&mut self) {
        match self.deadline.as_mut() {
            Some(deadline) => deadline.as_mut().await,
            None => future::pending::<()>().await,
        }
    }
}
