//! Self-rearming pollers for the two device read paths.
//!
//! Each poller owns its interval and cancellation handle and re-arms a
//! fixed delay after the *completion* of the previous request, so a slow
//! link can never pile requests up. Success and failure reschedule alike;
//! the loops run until shut down.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::device::{DeviceClient, DeviceError};
use crate::types::{StatusReport, UsbLinkState};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// A spawned poll loop. Dropping the handle does not stop the loop; call
/// [`Poller::shutdown`] for a clean stop.
pub struct Poller {
    cancel: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Run `tick` to completion, wait `interval` from its completion, run
    /// it again. `tick` threads its own state through each call, so poll
    /// loops can accumulate without shared mutability.
    pub fn spawn<S, F, Fut>(interval: Duration, mut state: S, mut tick: F) -> Self
    where
        S: Send + 'static,
        F: FnMut(S) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let stop = cancel.clone();
        let handle = tokio::spawn(async move {
            loop {
                state = tick(state).await;
                tokio::select! {
                    _ = stop.notified() => break,
                    _ = sleep(interval) => {}
                }
            }
        });
        Self { cancel, handle }
    }

    /// Stop the loop once any in-flight tick completes.
    pub async fn shutdown(self) {
        self.cancel.notify_one();
        let _ = self.handle.await;
    }
}

/// What the telemetry poller publishes: the accumulated report plus the
/// operator-visible status line.
#[derive(Debug, Clone, Default)]
pub struct ReportView {
    pub report: StatusReport,
    pub status: String,
    /// Local wall-clock stamp of the last successful poll, so a stale
    /// display is recognizable as stale.
    pub last_success: Option<String>,
}

/// Poll `/usbstate`. The slot holds `None` until the first poll lands.
pub fn spawn_usb_poller(
    client: DeviceClient,
    interval: Duration,
) -> (Poller, watch::Receiver<Option<UsbLinkState>>) {
    let (tx, rx) = watch::channel(None);
    let poller = Poller::spawn(interval, (), move |()| {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            let state = match client.usb_state().await {
                Ok(state) => state,
                Err(e) => {
                    debug!("usb state poll failed: {e}");
                    UsbLinkState::Error
                }
            };
            let _ = tx.send(Some(state));
        }
    });
    (poller, rx)
}

/// Poll `/report`, merging each decoded patch into the accumulated report.
/// Failures surface as a status line and leave the report untouched.
pub fn spawn_report_poller(
    client: DeviceClient,
    interval: Duration,
) -> (Poller, watch::Receiver<ReportView>) {
    let (tx, rx) = watch::channel(ReportView {
        status: "Loading...".into(),
        ..ReportView::default()
    });
    let poller = Poller::spawn(interval, StatusReport::default(), move |mut report| {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            match client.report().await {
                Ok(patch) => {
                    let status = match patch.timestamp.as_deref() {
                        Some(t) => format!("Last update: {t}"),
                        None => "No update timestamp!".to_string(),
                    };
                    report.apply(patch);
                    let _ = tx.send(ReportView {
                        report: report.clone(),
                        status,
                        last_success: Some(Local::now().format("%H:%M:%S").to_string()),
                    });
                }
                Err(e) => {
                    warn!("report poll failed: {e}");
                    let status = match e {
                        DeviceError::Malformed(_) => "Invalid response from the device!",
                        _ => "Error in the response from the device!",
                    };
                    // keep the prior report and last_success visible
                    tx.send_modify(|view| view.status = status.to_string());
                }
            }
            report
        }
    });
    (poller, rx)
}
