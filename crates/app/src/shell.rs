//! Async driver for delayed navigation.
//!
//! Every call that requests a navigation schedules its commit after the
//! configured transition delay. A newer request aborts the older timer, and
//! the controller's generation check discards anything that still slips through.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::AppController;
use crate::routes::Page;

pub struct AppShell {
    controller: Arc<Mutex<AppController>>,
    delay: Duration,
    timer: Option<JoinHandle<Option<Page>>>,
}

impl AppShell {
    pub fn new(controller: AppController) -> Self {
        let delay = controller.config().transition_delay();
        Self {
            controller: Arc::new(Mutex::new(controller)),
            delay,
            timer: None,
        }
    }

    pub fn controller(&self) -> Arc<Mutex<AppController>> {
        Arc::clone(&self.controller)
    }

    pub async fn lock(&self) -> MutexGuard<'_, AppController> {
        self.controller.lock().await
    }

    /// Runs `action` against the controller and schedules any navigation it requested.
    pub async fn dispatch<R>(&mut self, action: impl FnOnce(&mut AppController) -> R) -> R {
        let (result, scheduled) = {
            let mut controller = self.controller.lock().await;
            let before = controller.pending_generation();
            let result = action(&mut controller);
            let after = controller.pending_generation();
            (result, after.filter(|g| Some(*g) != before))
        };

        if let Some(generation) = scheduled {
            self.schedule(generation);
        }
        result
    }

    /// Restores state for a back/forward navigation, cancelling any pending one.
    pub async fn pop_state(&mut self, path: &str) -> Page {
        self.cancel_timer();
        self.controller.lock().await.restore_from_path(path)
    }

    fn schedule(&mut self, generation: u64) {
        self.cancel_timer();
        let controller = Arc::clone(&self.controller);
        let delay = self.delay;
        debug!(generation, delay_ms = delay.as_millis() as u64, "Scheduling navigation");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.lock().await.commit_navigation(generation)
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Waits for the scheduled navigation, returning the page it showed.
    ///
    /// `None` when nothing was scheduled or the navigation was superseded.
    pub fn settle(&mut self) -> impl Future<Output = Option<Page>> + 'static {
        let timer = self.timer.take();
        async move {
            match timer {
                Some(timer) => timer.await.ok().flatten(),
                None => None,
            }
        }
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
