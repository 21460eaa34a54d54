//! Periodic execution of the reminder worker.

use std::{sync::Arc, time::Duration};

use {
    async_channel::{Receiver, Sender, bounded},
    tokio::{
        select,
        task::{JoinHandle, spawn_blocking},
        time::{Instant, MissedTickBehavior, interval_at},
    },
    tracing::{debug, error, info},
};

use crate::notification::worker::{NotificationWorker, WorkResult};

/// How often a reminder is attempted.
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);

/// Runs a worker on a fixed period.
pub struct NotificationScheduler;

impl NotificationScheduler {
    /// Starts running `worker` every `period`, the first run one period from now.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// A handle that stops the schedule when shut down or dropped.
    pub fn start(worker: Arc<NotificationWorker>, period: Duration) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let task = tokio::spawn(Self::run(worker, period, shutdown_rx));
        info!("Scheduled reminders every {period:?}");

        SchedulerHandle {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Ticks until the shutdown channel fires or closes.
    async fn run(worker: Arc<NotificationWorker>, period: Duration, shutdown_rx: Receiver<()>) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                _ = ticker.tick() => {
                    let worker = Arc::clone(&worker);
                    match spawn_blocking(move || worker.do_work()).await {
                        Ok(WorkResult::Success) => debug!("Reminder run succeeded"),
                        Ok(WorkResult::Failure) => debug!("Reminder run failed"),
                        Err(e) => error!("Reminder run panicked: {e}"),
                    }
                }
                _ = shutdown_rx.recv() => {
                    debug!("Reminder schedule received shutdown signal");
                    break;
                }
            }
        }
    }
}

/// Stops the reminder schedule.
pub struct SchedulerHandle {
    shutdown_tx: Option<Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the schedule and waits for the task to finish.
    pub async fn shutdown(mut self) {
        self.signal();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            error!("Reminder schedule ended abnormally: {e}");
        }
    }

    /// Closes the shutdown channel, which the task observes on its next poll.
    fn signal(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
            tx.close();
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.signal();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::time::sleep;

    use crate::{
        config::NotificationPermission,
        notification::{
            scheduler::NotificationScheduler,
            testing::{FakeNotifier, FixedPermission},
            worker::NotificationWorker,
        },
    };

    fn granted_worker(notifier: Arc<FakeNotifier>) -> Arc<NotificationWorker> {
        Arc::new(NotificationWorker::new(
            notifier,
            Arc::new(FixedPermission(NotificationPermission::Granted)),
        ))
    }

    #[tokio::test]
    async fn test_first_run_waits_one_period() {
        let notifier = Arc::new(FakeNotifier::default());
        let handle =
            NotificationScheduler::start(granted_worker(notifier.clone()), Duration::from_secs(60));

        sleep(Duration::from_millis(50)).await;
        assert!(notifier.posted().is_empty());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_runs_periodically_until_shutdown() {
        let notifier = Arc::new(FakeNotifier::default());
        let handle = NotificationScheduler::start(
            granted_worker(notifier.clone()),
            Duration::from_millis(20),
        );

        sleep(Duration::from_millis(150)).await;
        handle.shutdown().await;
        let runs = notifier.posted().len();
        assert!(runs >= 2, "expected at least two runs, got {runs}");

        sleep(Duration::from_millis(100)).await;
        assert_eq!(notifier.posted().len(), runs);
    }
}
