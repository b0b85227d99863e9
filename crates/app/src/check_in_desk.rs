//! Gate check-in desk with a timed scan.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domain::services::{AttendeeRoster, ScanOutcome};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct CheckInDesk {
    roster: Arc<Mutex<AttendeeRoster>>,
    scan_delay: Duration,
    scan: Option<JoinHandle<()>>,
}

impl CheckInDesk {
    pub fn new(roster: AttendeeRoster, scan_delay: Duration) -> Self {
        Self {
            roster: Arc::new(Mutex::new(roster)),
            scan_delay,
            scan: None,
        }
    }

    pub fn roster(&self) -> Arc<Mutex<AttendeeRoster>> {
        Arc::clone(&self.roster)
    }

    /// Starts a scan that reads `ticket_id` once the camera delay has passed.
    ///
    /// A new scan replaces the one in progress. The receiver errors if the
    /// scan is cancelled.
    pub fn scan(&mut self, ticket_id: impl Into<String>) -> oneshot::Receiver<ScanOutcome> {
        self.cancel_scan();

        let (tx, rx) = oneshot::channel();
        let roster = Arc::clone(&self.roster);
        let delay = self.scan_delay;
        let ticket_id = ticket_id.into();
        debug!(ticket_id = %ticket_id, "Scan started");

        self.scan = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = roster.lock().await.check_in(&ticket_id, Utc::now());
            // Receiver gone means the caller stopped waiting.
            let _ = tx.send(outcome);
        }));
        rx
    }

    /// Checks in a typed ticket id right away.
    pub async fn manual_entry(&self, ticket_id: &str) -> ScanOutcome {
        self.roster.lock().await.check_in(ticket_id, Utc::now())
    }

    pub fn is_scanning(&self) -> bool {
        self.scan.as_ref().is_some_and(|s| !s.is_finished())
    }

    /// Closes the scanner, abandoning a scan in progress.
    pub fn close(&mut self) {
        if self.cancel_scan() {
            info!("Scan cancelled");
        }
    }

    fn cancel_scan(&mut self) -> bool {
        match self.scan.take() {
            Some(scan) if !scan.is_finished() => {
                scan.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for CheckInDesk {
    fn drop(&mut self) {
        self.cancel_scan();
    }
}
