use std::collections::HashMap;
use std::future::Future;
use streamdata_auth::{AuthSession, BrowserLauncher};
use tokio::task::JoinHandle;

/// Session driven by the system browser
pub type Session = AuthSession<BrowserLauncher>;

/// Tracks the session operations running in the background
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a task unless one with the same ID is still running.
    ///
    /// Session operations must run to completion, so a running task is never
    /// replaced. Returns false when the spawn was skipped.
    pub fn spawn_task<F>(&mut self, task_id: &str, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, handle| !handle.is_finished());

        if self.tasks.contains_key(task_id) {
            tracing::debug!(task_id, "Task already running, not spawning another");
            return false;
        }

        self.tasks.insert(task_id.to_string(), tokio::spawn(future));
        true
    }

    pub fn is_running(&self, task_id: &str) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_running_task_is_not_replaced() {
        let mut manager = BackgroundTaskManager::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        assert!(manager.spawn_task("sign_in", async move {
            let _ = release_rx.await;
            let _ = done_tx.send(());
        }));
        assert!(manager.is_running("sign_in"));
        assert!(!manager.spawn_task("sign_in", async {}));

        release_tx.send(()).unwrap();
        done_rx.await.unwrap();
        tokio::task::yield_now().await;

        // The first task finished on its own rather than being aborted
        while manager.is_running("sign_in") {
            tokio::task::yield_now().await;
        }
        assert!(manager.spawn_task("sign_in", async {}));
    }
}
