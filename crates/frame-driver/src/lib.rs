//! floatfx Frame Driver
//!
//! Runs the float engine against a surface, one frame per tick:
//!
//! - **Live:** an async loop ticking at the configured frame rate until its
//!   [`StopHandle`] fires
//! - **Replay:** a deterministic loop where frame `k` happens at
//!   `k * interval` on the event timeline
//!
//! Before every frame the loop drains all events due from its
//! [`InputBackend`] into the shared state, so each frame sees one
//! consistent input snapshot.

pub mod backends;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use floatfx_common::clock::{frame_interval, frame_interval_ns, FrameClock};
use floatfx_common::config::FloatOptions;
use floatfx_common::error::FloatResult;
use floatfx_core::{EventOutcome, FloatEngine, FloatState, Surface};
use floatfx_scene_model::event::{InputEvent, TimestampNs};
use serde::Serialize;

use writer::{FrameStreamHeader, FrameWriter};

/// Trait for input backends.
pub trait InputBackend: Send {
    /// Next event due at or before `now_ns`, if any.
    fn poll(&mut self, now_ns: TimestampNs) -> FloatResult<Option<InputEvent>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether the backend will never produce another event.
    fn is_exhausted(&self) -> bool;
}

/// Cancellation handle for a running loop. Clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after its current tick.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Counters reported when a loop finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopSummary {
    /// Ticks processed, rendered or not.
    pub ticks: u64,
    /// Frames actually rendered (ticks while running).
    pub frames_rendered: u64,
    /// Events that changed state.
    pub events_applied: u64,
    /// Events that arrived but had no effect.
    pub events_ignored: u64,
}

/// Couples an engine, its state, a surface, and an input backend.
pub struct FloatLoop<S: Surface> {
    engine: FloatEngine,
    state: FloatState,
    surface: S,
    backend: Box<dyn InputBackend>,
    writer: Option<FrameWriter>,
    clock: FrameClock,
    stop: StopHandle,
    fps: u32,
    summary: LoopSummary,
}

impl<S: Surface> FloatLoop<S> {
    /// Discover elements on `surface` and prepare a loop at `fps`.
    pub fn new(
        options: FloatOptions,
        surface: S,
        backend: Box<dyn InputBackend>,
        fps: u32,
    ) -> FloatResult<Self> {
        let engine = FloatEngine::attach(options, &surface)?;
        let state = FloatState::new(surface.viewport());
        Ok(Self {
            engine,
            state,
            surface,
            backend,
            writer: None,
            clock: FrameClock::start(),
            stop: StopHandle::new(),
            fps: fps.max(1),
            summary: LoopSummary::default(),
        })
    }

    /// Record every rendered frame to `path` as JSONL.
    pub fn record_to(&mut self, path: std::path::PathBuf) -> FloatResult<()> {
        let header = FrameStreamHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: self.clock.epoch_wall().to_string(),
            attribute: self.engine.options().attribute.clone(),
            precision: self.engine.options().precision,
            fps: self.fps,
            elements: self.engine.elements().iter().map(|e| e.id.clone()).collect(),
        };
        self.writer = Some(FrameWriter::new(path, &header)?);
        Ok(())
    }

    /// A handle that stops [`FloatLoop::run`] from another task.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Apply every due event, then render one frame if running.
    ///
    /// Returns the number of elements written this tick.
    pub fn tick(&mut self, now_ns: TimestampNs) -> FloatResult<usize> {
        while let Some(event) = self.backend.poll(now_ns)? {
            match self.state.apply(&event.kind) {
                EventOutcome::Ignored => self.summary.events_ignored += 1,
                outcome => {
                    tracing::trace!(kind = event.kind_name(), ?outcome, "Event applied");
                    self.summary.events_applied += 1;
                }
            }
        }

        self.summary.ticks += 1;
        let transforms = self.engine.render(&self.state, &mut self.surface)?;
        if transforms.is_empty() && !self.state.is_running() {
            return Ok(0);
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.write_frame(self.summary.frames_rendered, now_ns, &transforms)?;
        }
        self.summary.frames_rendered += 1;
        Ok(transforms.len())
    }

    /// Run `frames` ticks on the event timeline without sleeping.
    pub fn run_frames(&mut self, frames: u64) -> FloatResult<LoopSummary> {
        let interval_ns = frame_interval_ns(self.fps);
        tracing::info!(
            backend = %self.backend.name(),
            surface = %self.surface.name(),
            frames,
            fps = self.fps,
            "Replaying float loop"
        );
        for k in 0..frames {
            if self.stop.is_stopped() {
                break;
            }
            self.tick(k * interval_ns)?;
        }
        self.finish()
    }

    /// Tick in real time at the configured rate until stopped.
    pub async fn run(&mut self) -> FloatResult<LoopSummary> {
        tracing::info!(
            backend = %self.backend.name(),
            surface = %self.surface.name(),
            fps = self.fps,
            "Float loop running"
        );

        let mut ticker = tokio::time::interval(frame_interval(self.fps));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.stop.is_stopped() {
            ticker.tick().await;
            if self.stop.is_stopped() {
                break;
            }
            let now = self.clock.elapsed_ns();
            self.tick(now)?;
        }

        self.finish()
    }

    fn finish(&mut self) -> FloatResult<LoopSummary> {
        if self.stop.is_stopped() {
            self.state.stop();
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        tracing::info!(
            ticks = self.summary.ticks,
            frames = self.summary.frames_rendered,
            events = self.summary.events_applied,
            "Float loop finished"
        );
        Ok(self.summary)
    }

    pub fn engine(&self) -> &FloatEngine {
        &self.engine
    }

    pub fn state(&self) -> &FloatState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn summary(&self) -> LoopSummary {
        self.summary
    }

    /// Whether the backend has nothing left to deliver.
    pub fn input_exhausted(&self) -> bool {
        self.backend.is_exhausted()
    }
}
