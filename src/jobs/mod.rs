use std::{future::Future, sync::Arc, time::Duration};
use tokio::{sync::Notify, task::JoinHandle, time::interval};

use crate::constants::*;
use crate::database::AppDatabase;

pub mod birthday_notification;
pub mod dispatch;
pub mod recover_unsent;

/// Handle to a running scheduler job. Stopping prevents further ticks without
/// cancelling a cycle already in flight.
pub struct JobHandle {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl JobHandle {
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Runs `work` every `period` on a spawned task until the handle is stopped
pub fn spawn_recurring<F, Fut>(name: &'static str, period: Duration, work: F) -> JobHandle
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let shutdown = Arc::new(Notify::new());
    let handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tracing::debug!("initializing {name} scheduler job");
            let mut interval = interval(period);
            loop {
                tokio::select! {
                    _ = interval.tick() => work().await,
                    _ = shutdown.notified() => {
                        tracing::debug!("stopping {name} scheduler job");
                        break;
                    }
                }
            }
        })
    };
    JobHandle { shutdown, handle }
}

/// Spawns the two scheduler jobs and returns their handles
pub fn spawn_all_jobs(db_client: Arc<AppDatabase>) -> Vec<JobHandle> {
    // job to periodically send out due birthday messages
    let notification_job = {
        let db = db_client.clone();
        spawn_recurring(
            "birthday notification",
            Duration::from_secs(NOTIFICATION_JOB_INTERVAL),
            move || {
                let db = db.clone();
                async move { birthday_notification::send_due_messages(&db).await }
            },
        )
    };

    // job to retry failed or missed messages from the last day
    let recovery_job = spawn_recurring(
        "unsent message recovery",
        Duration::from_secs(RECOVERY_JOB_INTERVAL),
        move || {
            let db = db_client.clone();
            async move { recover_unsent::recover_unsent_messages(&db).await }
        },
    );

    vec![notification_job, recovery_job]
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_spawn_recurring_ticks_and_stops() {
        let count = Arc::new(AtomicUsize::new(0));
        let job = {
            let count = count.clone();
            spawn_recurring("test", Duration::from_secs(5), move || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                }
            })
        };
        // first tick fires immediately, then every 5s of virtual time
        tokio::time::sleep(Duration::from_secs(12)).await;
        assert!(count.load(Ordering::SeqCst) >= 3);

        job.stop();
        job.join().await;
        let after_stop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let job = spawn_recurring("noop", Duration::from_secs(60), || async {});
        job.stop();
        job.stop();
        job.join().await;
    }
}
