//! Game session controller
//!
//! Owns one play session end to end: lifecycle (`NotStarted → Running →
//! Ended`), the latest conditioned signal, fire debouncing, and the three
//! cadences that drive the game:
//! - frame cadence: `on_frame`, whenever capture delivers a sample
//! - tick cadence: fixed 60 Hz steps accumulated in `advance`
//! - spawn cadence: level-dependent enemy timer, also driven by `advance`
//!
//! The controller is the single writer of all of this state. Collaborators
//! read snapshots through shared borrows or copies.

pub mod cadence;
pub mod debounce;

pub use cadence::FixedStep;
pub use debounce::FireDebouncer;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_FRAME_DELTA;
use crate::settings::Settings;
use crate::signal::{AimSignal, FaceLandmarks, SignalConditioner};
use crate::sim::{GameEvent, GameState, SpawnScheduler, StepOutcome, TickInput, Viewport, step};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Ended,
}

/// Failure reported by the capture/inference collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("video capture failed: {0}")]
    Capture(String),
    #[error("landmark inference failed: {0}")]
    Inference(String),
}

/// Why the last session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    Stopped,
    GameOver,
    Failed(SessionError),
}

pub struct SessionController {
    settings: Settings,
    viewport: Viewport,
    phase: SessionPhase,
    end_reason: Option<EndReason>,
    state: GameState,
    conditioner: SignalConditioner,
    /// Latest conditioned signal (last write wins)
    signal: AimSignal,
    debouncer: FireDebouncer,
    clock: FixedStep,
    spawner: SpawnScheduler,
    events: Vec<GameEvent>,
    runs: u64,
}

impl SessionController {
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        Self {
            state: GameState::new(&viewport),
            conditioner: SignalConditioner::new(&settings),
            signal: AimSignal::default(),
            debouncer: FireDebouncer::new(settings.fire_frames),
            clock: FixedStep::default(),
            spawner: SpawnScheduler::new(settings.spawn_table(), settings.seed),
            events: Vec::new(),
            phase: SessionPhase::NotStarted,
            end_reason: None,
            settings,
            viewport,
            runs: 0,
        }
    }

    /// Begin a fresh run (also valid from `Ended`)
    pub fn start(&mut self) {
        let seed = self.settings.seed.wrapping_add(self.runs);
        self.runs += 1;

        self.state = GameState::new(&self.viewport);
        self.state.running = true;
        self.conditioner.reset();
        self.signal = AimSignal::default();
        self.debouncer.reset();
        self.clock.reset();
        self.events.clear();
        self.spawner = SpawnScheduler::new(self.settings.spawn_table(), seed);
        self.spawner.restart(self.state.level());

        self.phase = SessionPhase::Running;
        self.end_reason = None;
        log::info!("Session {} started (seed {})", self.runs, seed);
    }

    /// Stop the run; no tick, frame or spawn applies afterwards
    pub fn end(&mut self) {
        self.finish(EndReason::Stopped);
    }

    /// Capture/inference collaborator failed: halt gameplay, no retry
    pub fn on_capture_error(&mut self, error: SessionError) {
        log::error!("{}", error);
        self.finish(EndReason::Failed(error));
    }

    fn finish(&mut self, reason: EndReason) {
        if self.phase != SessionPhase::Running {
            log::debug!("Ignoring {:?}: session is {:?}", reason, self.phase);
            return;
        }
        self.spawner.cancel();
        self.clock.reset();
        self.debouncer.reset();
        self.state.running = false;
        self.phase = SessionPhase::Ended;
        log::info!(
            "Session ended ({:?}) with score {} at level {}",
            reason,
            self.state.score,
            self.state.level()
        );
        self.end_reason = Some(reason);
    }

    /// Frame cadence: condition a new capture sample (`None` = no face)
    pub fn on_frame(&mut self, frame: Option<&FaceLandmarks>) -> Option<AimSignal> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        self.signal = self.conditioner.condition(frame);
        Some(self.signal)
    }

    /// Tick and spawn cadences: account for `elapsed` seconds of wall time.
    /// Returns the number of simulation ticks applied.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if self.phase != SessionPhase::Running {
            return 0;
        }

        let due = self.clock.accumulate(elapsed);
        let mut ticks = 0;
        for _ in 0..due {
            ticks += 1;
            if self.tick() == Some(StepOutcome::GameOver) {
                return ticks;
            }
        }

        let spawns = self.spawner.poll(elapsed.clamp(0.0, MAX_FRAME_DELTA) * 1000.0);
        for _ in 0..spawns {
            self.spawner.spawn_into(&mut self.state, &self.viewport);
        }
        ticks
    }

    /// Run exactly one simulation tick against the latest signal
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.phase != SessionPhase::Running {
            return None;
        }

        let signal = self.signal;
        let fire = self.debouncer.update(signal.detected, signal.fire_intent);
        let input = TickInput {
            target: self.viewport.to_pixels(signal.aim),
            fire,
        };

        let (next, outcome) = step(&self.state, &input, &self.viewport, &mut self.events);
        self.state = next;

        match outcome {
            StepOutcome::GameOver => self.finish(EndReason::GameOver),
            StepOutcome::Continue => {
                let level = self.state.level();
                if level != self.spawner.level() {
                    log::info!("Level {} (score {})", level, self.state.score);
                    self.spawner.sync_level(level);
                }
            }
        }
        Some(outcome)
    }

    /// Spawn one enemy immediately (outside the cadence)
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        Some(self.spawner.spawn_into(&mut self.state, &self.viewport))
    }

    /// Viewport collaborator: new size, player re-centered
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.state.recenter(&self.viewport);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Re-anchor the aim on the next detected face
    pub fn recalibrate(&mut self) {
        self.conditioner.recalibrate();
        log::info!("Aim recalibration requested");
    }

    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.settings.set_sensitivity(sensitivity);
        self.conditioner.set_sensitivity(self.settings.sensitivity);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn end_reason(&self) -> Option<&EndReason> {
        self.end_reason.as_ref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn aim_signal(&self) -> AimSignal {
        self.signal
    }

    /// Aim reticle in viewport pixels
    pub fn reticle(&self) -> Vec2 {
        self.viewport.to_pixels(self.signal.aim)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }
}
