//! Pointer follower service
//!
//! Runs a [`PointerFollower`] on a tokio task and publishes a
//! [`CursorFrame`] every frame.
//!
//! # Task Loop
//!
//! ```text
//! ┌──────────────────────── select! ────────────────────────┐
//! │ pointer event   ──> stamp with Clock, update follower   │
//! │ frame interval  ──> on_frame_tick, publish CursorFrame  │
//! │ idle deadline   ──> poll_idle, publish on transition    │
//! │ shutdown        ──> teardown, hand state back to stop() │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The idle deadline is a single `Sleep` that is reset on every move, so at
//! most one idle timer is ever outstanding.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, trace};

use super::clock::Clock;
use super::error::{Result, RuntimeError};
use crate::cursor::{
    CursorFrame, ElementInfo, FollowerConfig, HoverConfig, PointerFollower, PointerSample,
};

const SERVICE: &str = "Pointer follower";

/// Pointer notifications delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to viewport coordinates
    Move {
        /// Viewport x
        x: f64,
        /// Viewport y
        y: f64,
    },
    /// Pointer entered an element (ancestry, target first)
    Over(Vec<ElementInfo>),
    /// Pointer left its element for the related target (`None` = left the document)
    Out(Option<Vec<ElementInfo>>),
}

/// State owned by the task while running and by the service while stopped
struct FollowerTask {
    follower: PointerFollower,
    events: mpsc::Receiver<PointerEvent>,
    frames: watch::Sender<CursorFrame>,
}

impl FollowerTask {
    async fn run(mut self, mut shutdown_rx: mpsc::Receiver<()>, frame_interval: Duration) -> Self {
        let clock = Clock::start();

        let mut ticker = interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let idle = sleep(Duration::ZERO);
        tokio::pin!(idle);

        loop {
            let idle_armed = self.follower.idle_deadline().is_some();

            tokio::select! {
                maybe_event = self.events.recv() => {
                    let Some(event) = maybe_event else {
                        debug!("Pointer event channel closed");
                        break;
                    };
                    match event {
                        PointerEvent::Move { x, y } => {
                            let now = clock.now_ms();
                            self.follower.on_pointer_move(PointerSample::new(x, y, now));
                            if let Some(deadline) = self.follower.idle_deadline() {
                                idle.as_mut().reset(clock.instant_at(deadline));
                            }
                        }
                        PointerEvent::Over(ancestry) => {
                            self.follower.on_pointer_over(&ancestry);
                            self.publish();
                        }
                        PointerEvent::Out(related) => {
                            self.follower.on_pointer_out(related.as_deref());
                            self.publish();
                        }
                    }
                }

                _ = ticker.tick() => {
                    self.follower.on_frame_tick();
                    self.publish();
                }

                () = &mut idle, if idle_armed => {
                    if self.follower.poll_idle(clock.now_ms()) {
                        self.publish();
                    }
                }

                _ = shutdown_rx.recv() => {
                    debug!("Pointer follower shutting down");
                    break;
                }
            }
        }

        self.follower.teardown();
        self
    }

    fn publish(&self) {
        let frame = CursorFrame::capture(&self.follower);
        trace!("Publishing cursor frame: {:?}", frame);
        self.frames.send_replace(frame);
    }
}

struct Running {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<FollowerTask>,
}

/// Handle to the pointer follower task
pub struct PointerFollowerService {
    frame_interval: Duration,
    event_tx: mpsc::Sender<PointerEvent>,
    frame_rx: watch::Receiver<CursorFrame>,
    parked: Option<FollowerTask>,
    running: Option<Running>,
}

impl PointerFollowerService {
    /// Create a stopped service
    pub fn new(config: FollowerConfig, hover: &HoverConfig) -> Self {
        let (event_tx, events) = mpsc::channel(256);
        let (frames, frame_rx) = watch::channel(CursorFrame::default());

        Self {
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            event_tx,
            frame_rx,
            parked: Some(FollowerTask {
                follower: PointerFollower::with_hover(config, hover),
                events,
                frames,
            }),
            running: None,
        }
    }

    /// Spawn the follower task
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Err(RuntimeError::AlreadyRunning(SERVICE));
        }
        let task = self
            .parked
            .take()
            .ok_or_else(|| RuntimeError::TaskFailed(SERVICE, "state lost".to_string()))?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let handle = tokio::spawn(task.run(shutdown_rx, self.frame_interval));

        info!(
            "Pointer follower started ({}ms frames)",
            self.frame_interval.as_millis()
        );
        self.running = Some(Running {
            shutdown_tx,
            handle,
        });
        Ok(())
    }

    /// Stop the task and wait for it to finish.
    ///
    /// No frame tick or idle timer fires after this returns.
    pub async fn stop(&mut self) -> Result<()> {
        let running = self.running.take().ok_or(RuntimeError::NotRunning(SERVICE))?;

        if let Err(e) = running.shutdown_tx.send(()).await {
            debug!("Pointer follower shutdown signal not delivered: {}", e);
        }
        let task = running
            .handle
            .await
            .map_err(|e| RuntimeError::TaskFailed(SERVICE, e.to_string()))?;

        info!(
            "Pointer follower stopped after {} frames",
            task.follower.frame_count()
        );
        self.parked = Some(task);
        Ok(())
    }

    /// Whether the task is running
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Channel for host pointer events
    pub fn event_sender(&self) -> mpsc::Sender<PointerEvent> {
        self.event_tx.clone()
    }

    /// Receive cursor frames as they are published
    pub fn subscribe(&self) -> watch::Receiver<CursorFrame> {
        self.frame_rx.clone()
    }

    /// Most recently published frame
    pub fn latest(&self) -> CursorFrame {
        *self.frame_rx.borrow()
    }
}
