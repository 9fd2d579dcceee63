use std::time::Duration;

use quiz_core::TimerGeneration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// One elapsed second, addressed to the countdown it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: TimerGeneration,
}

/// Background task that emits one `Tick` per period for the active question.
///
/// At most one task is alive at a time. `restart` and `stop` abort the running
/// task and discard ticks it already queued.
#[derive(Debug)]
pub struct QuestionTicker {
    period: Duration,
    sender: mpsc::UnboundedSender<Tick>,
    receiver: mpsc::UnboundedReceiver<Tick>,
    task: Option<JoinHandle<()>>,
}

impl QuestionTicker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            period,
            sender,
            receiver,
            task: None,
        }
    }

    /// Schedule ticks for `generation`, replacing any previous schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn restart(&mut self, generation: TimerGeneration) {
        self.stop();

        let sender = self.sender.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(generation = generation.value(), "ticker restarted");
    }

    /// Cancel the schedule and drop queued ticks.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        while self.receiver.try_recv().is_ok() {}
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the next tick. Pending forever while stopped.
    pub async fn next(&mut self) -> Tick {
        match self.receiver.recv().await {
            Some(tick) => tick,
            // `self.sender` keeps the channel open.
            None => std::future::pending().await,
        }
    }
}

impl Drop for QuestionTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
