//! Background clock
//!
//! Emits the current local time on a fixed interval over a tokio channel so
//! the header's date and time stay current. The task is aborted when the
//! handle is shut down or dropped.

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Interval between ticks in the running application
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle owning the clock task
pub struct ClockHandle {
    /// Channel for receiving ticks
    pub receiver: mpsc::Receiver<DateTime<Local>>,
    task: Option<JoinHandle<()>>,
}

impl ClockHandle {
    /// Spawns the clock task
    ///
    /// # Arguments
    /// * `interval` - Time between ticks
    ///
    /// # Returns
    /// A ClockHandle that receives ticks via the `receiver` channel
    pub fn spawn(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Skip the first tick (immediate)
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(Local::now()).await.is_err() {
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            task: Some(task),
        }
    }

    /// Returns the most recent pending tick, if any, without blocking
    pub fn latest(&mut self) -> Option<DateTime<Local>> {
        let mut latest = None;
        while let Ok(now) = self.receiver.try_recv() {
            latest = Some(now);
        }
        latest
    }

    /// Stops the clock task
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
