//! Section tracker service
//!
//! Runs a [`SectionTracker`] against a shared [`LayoutSource`]. Scroll
//! notifications only mark an evaluation as pending; the evaluation itself
//! runs one frame later, so a burst of scroll events costs one layout pass.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use super::error::{Result, RuntimeError};
use crate::sections::{LayoutSource, SectionId, SectionTracker, TrackerConfig, TrackerStats};

const SERVICE: &str = "Section tracker";

/// Layout handle shared with the host
pub type SharedLayout = Arc<dyn LayoutSource + Send + Sync>;

struct TrackerTask {
    tracker: SectionTracker,
    layout: SharedLayout,
    scrolls: mpsc::Receiver<()>,
    active: watch::Sender<SectionId>,
}

impl TrackerTask {
    async fn run(mut self, mut shutdown_rx: mpsc::Receiver<()>, frame_interval: Duration) -> Self {
        let frame = sleep(frame_interval);
        tokio::pin!(frame);

        loop {
            let pending = self.tracker.is_pending();

            tokio::select! {
                maybe_scroll = self.scrolls.recv() => {
                    if maybe_scroll.is_none() {
                        debug!("Scroll channel closed");
                        break;
                    }
                    if self.tracker.on_scroll() {
                        frame.as_mut().reset(Instant::now() + frame_interval);
                    }
                }

                () = &mut frame, if pending => {
                    if let Some(id) = self.tracker.on_frame(&*self.layout) {
                        self.publish(id);
                    }
                }

                _ = shutdown_rx.recv() => {
                    debug!("Section tracker shutting down");
                    break;
                }
            }
        }

        self.tracker.teardown();
        self
    }

    fn publish(&self, id: SectionId) {
        self.active.send_if_modified(|current| {
            if *current == id {
                return false;
            }
            *current = id;
            true
        });
    }
}

struct Running {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<TrackerTask>,
}

/// Handle to the section tracker task
pub struct SectionTrackerService {
    frame_interval: Duration,
    scroll_tx: mpsc::Sender<()>,
    active_rx: watch::Receiver<SectionId>,
    parked: Option<TrackerTask>,
    running: Option<Running>,
    stats: TrackerStats,
}

impl SectionTrackerService {
    /// Create a stopped service over `layout`
    pub fn new(config: TrackerConfig, layout: SharedLayout, frame_interval_ms: u64) -> Self {
        let tracker = SectionTracker::new(config);
        let (scroll_tx, scrolls) = mpsc::channel(256);
        let (active, active_rx) = watch::channel(tracker.active());

        Self {
            frame_interval: Duration::from_millis(frame_interval_ms),
            scroll_tx,
            active_rx,
            parked: Some(TrackerTask {
                tracker,
                layout,
                scrolls,
                active,
            }),
            running: None,
            stats: TrackerStats::default(),
        }
    }

    /// Evaluate once against the current layout, then spawn the task
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Err(RuntimeError::AlreadyRunning(SERVICE));
        }
        let mut task = self
            .parked
            .take()
            .ok_or_else(|| RuntimeError::TaskFailed(SERVICE, "state lost".to_string()))?;

        let active = task.tracker.mount(&*task.layout);
        task.publish(active);

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let handle = tokio::spawn(task.run(shutdown_rx, self.frame_interval));

        info!("Section tracker started, active={}", active);
        self.running = Some(Running {
            shutdown_tx,
            handle,
        });
        Ok(())
    }

    /// Stop the task and wait for it; a pending evaluation is dropped
    pub async fn stop(&mut self) -> Result<()> {
        let running = self.running.take().ok_or(RuntimeError::NotRunning(SERVICE))?;

        if let Err(e) = running.shutdown_tx.send(()).await {
            debug!("Section tracker shutdown signal not delivered: {}", e);
        }
        let task = running
            .handle
            .await
            .map_err(|e| RuntimeError::TaskFailed(SERVICE, e.to_string()))?;

        self.stats = task.tracker.stats();
        info!(
            "Section tracker stopped ({} scroll events, {} evaluations)",
            self.stats.scroll_events, self.stats.evaluations
        );
        self.parked = Some(task);
        Ok(())
    }

    /// Whether the task is running
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Channel for raw scroll notifications
    pub fn scroll_sender(&self) -> mpsc::Sender<()> {
        self.scroll_tx.clone()
    }

    /// Receive the active section whenever it changes
    pub fn subscribe(&self) -> watch::Receiver<SectionId> {
        self.active_rx.clone()
    }

    /// Current active section
    pub fn active(&self) -> SectionId {
        *self.active_rx.borrow()
    }

    /// Tracker statistics as of the last stop
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::DocumentLayout;
    use std::sync::RwLock;

    fn layout() -> Arc<RwLock<DocumentLayout>> {
        Arc::new(RwLock::new(DocumentLayout::stacked(
            1000.0,
            &[
                (SectionId::Home, 800.0),
                (SectionId::About, 600.0),
                (SectionId::Projects, 1000.0),
            ],
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_evaluates_before_scroll() {
        let shared = layout();
        shared.write().unwrap().scroll_to(1000.0);

        let mut svc = SectionTrackerService::new(TrackerConfig::default(), shared, 16);
        assert_eq!(svc.active(), SectionId::Home);

        svc.start().unwrap();
        assert_eq!(svc.active(), SectionId::About);
        svc.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesced() {
        let shared = layout();
        let mut svc = SectionTrackerService::new(TrackerConfig::default(), shared.clone(), 16);
        svc.start().unwrap();

        shared.write().unwrap().scroll_to(1000.0);
        let scroll = svc.scroll_sender();
        for _ in 0..5 {
            scroll.send(()).await.unwrap();
        }
        sleep(Duration::from_millis(50)).await;
        assert_eq!(svc.active(), SectionId::About);

        svc.stop().await.unwrap();
        let stats = svc.stats();
        assert_eq!(stats.scroll_events, 5);
        // mount + one coalesced pass
        assert_eq!(stats.evaluations, 2);
    }
}
