use std::fmt;
use std::time::Duration;

use handreel_engine::snapshot::{materialize, TableSnapshot};
use handreel_engine::steps::ReplayStep;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback state of a [`ReplayEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayState {
    Idle,
    Playing,
    Paused,
    Complete,
}

/// Supported playback speed multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Speed {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Half, Speed::Normal, Speed::OneAndHalf, Speed::Double];

    pub fn multiplier(self) -> f64 {
        match self {
            Speed::Half => 0.5,
            Speed::Normal => 1.0,
            Speed::OneAndHalf => 1.5,
            Speed::Double => 2.0,
        }
    }

    /// Wall-clock wait for a step paced at `delay_ms` at normal speed.
    pub fn scale(self, delay_ms: u64) -> Duration {
        Duration::from_millis(delay_ms).div_f64(self.multiplier())
    }
}

impl TryFrom<f64> for Speed {
    type Error = ReplayError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Speed::ALL
            .into_iter()
            .find(|s| (s.multiplier() - value).abs() < f64::EPSILON)
            .ok_or(ReplayError::UnsupportedSpeed(value))
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReplayError {
    #[error("Cannot {action} while {from:?}")]
    InvalidTransition {
        from: ReplayState,
        action: &'static str,
    },
    #[error("Unsupported speed {0}; expected one of 0.5, 1, 1.5, 2")]
    UnsupportedSpeed(f64),
    #[error("Seek position must be a finite fraction, got {0}")]
    InvalidSeek(f64),
}

/// The single outstanding timer: fire `ticket` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub ticket: u64,
    pub delay: Duration,
}

type CompletionCallback = Box<dyn FnMut() + Send>;

/// Cooperative replay state machine over a fixed step sequence.
///
/// The engine never sleeps. Whenever it wants the next step applied it hands
/// out a [`Schedule`]; the driver waits `delay` and calls [`ReplayEngine::fire`]
/// with the ticket. Pausing, seeking and resetting drop the pending ticket,
/// so a late fire is ignored and no step is ever applied twice.
pub struct ReplayEngine {
    steps: Vec<ReplayStep>,
    cursor: usize,
    snapshot: TableSnapshot,
    state: ReplayState,
    speed: Speed,
    pending: Option<Schedule>,
    next_ticket: u64,
    on_complete: Vec<CompletionCallback>,
    completions: usize,
}

impl fmt::Debug for ReplayEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayEngine")
            .field("len", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("pending", &self.pending)
            .field("completions", &self.completions)
            .finish()
    }
}

impl ReplayEngine {
    /// An empty sequence starts out complete.
    pub fn new(steps: Vec<ReplayStep>) -> Self {
        let state = if steps.is_empty() {
            ReplayState::Complete
        } else {
            ReplayState::Idle
        };
        Self {
            steps,
            cursor: 0,
            snapshot: TableSnapshot::default(),
            state,
            speed: Speed::Normal,
            pending: None,
            next_ticket: 0,
            on_complete: Vec::new(),
            completions: 0,
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Number of steps applied so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.steps.len() as f64
        }
    }

    pub fn pending(&self) -> Option<Schedule> {
        self.pending
    }

    /// How many times completion has been signalled.
    pub fn completions(&self) -> usize {
        self.completions
    }

    pub fn current_snapshot(&self) -> &TableSnapshot {
        &self.snapshot
    }

    /// Registers a callback run each time playback reaches the end.
    pub fn on_complete(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_complete.push(Box::new(callback));
    }

    /// Starts or resumes playback. Restarts from step 0 when complete.
    /// Returns the timer the driver must arm; `None` while already playing,
    /// since the pending timer stays armed.
    pub fn play(&mut self) -> Option<Schedule> {
        match self.state {
            ReplayState::Playing => return None,
            ReplayState::Complete => self.reset(),
            ReplayState::Idle | ReplayState::Paused => {}
        }
        self.state = ReplayState::Playing;
        tracing::debug!(
            position = self.cursor,
            len = self.steps.len(),
            speed = %self.speed,
            "replay playing"
        );
        if self.cursor >= self.steps.len() {
            self.complete();
            return None;
        }
        Some(self.schedule())
    }

    pub fn pause(&mut self) -> Result<(), ReplayError> {
        if self.state != ReplayState::Playing {
            return Err(ReplayError::InvalidTransition {
                from: self.state,
                action: "pause",
            });
        }
        self.pending = None;
        self.state = ReplayState::Paused;
        tracing::debug!(position = self.cursor, "replay paused");
        Ok(())
    }

    /// Applies to the next scheduled step; a pending timer keeps its delay.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Jumps to `fraction` of the sequence by re-folding every step from the
    /// start. A playing engine keeps playing from the new position.
    ///
    /// Seeking a complete engine to an earlier position acts as a reset: the
    /// engine leaves `Complete` for `Paused` and signals completion again
    /// when it next reaches the end.
    pub fn seek(&mut self, fraction: f64) -> Result<Option<Schedule>, ReplayError> {
        if !fraction.is_finite() {
            return Err(ReplayError::InvalidSeek(fraction));
        }
        let len = self.steps.len();
        let target = ((fraction.clamp(0.0, 1.0) * len as f64).round() as usize).min(len);
        self.jump_to(target);
        tracing::debug!(fraction, position = target, len, "replay seek");

        if target == len {
            if self.state != ReplayState::Complete {
                self.complete();
            }
            return Ok(None);
        }
        match self.state {
            ReplayState::Playing => Ok(Some(self.schedule())),
            ReplayState::Idle | ReplayState::Paused | ReplayState::Complete => {
                self.state = ReplayState::Paused;
                Ok(None)
            }
        }
    }

    /// Applies exactly one step while stopped.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        if !matches!(self.state, ReplayState::Idle | ReplayState::Paused) {
            return Err(ReplayError::InvalidTransition {
                from: self.state,
                action: "step forward",
            });
        }
        self.state = ReplayState::Paused;
        self.advance();
        Ok(())
    }

    /// Moves back one step while stopped, re-folding from the start.
    ///
    /// From `Complete` this is a reset to the second-to-last position, like
    /// [`seek`](Self::seek): the engine becomes `Paused` and completion is
    /// signalled again once the last step is re-applied.
    pub fn step_back(&mut self) -> Result<(), ReplayError> {
        if self.state == ReplayState::Playing {
            return Err(ReplayError::InvalidTransition {
                from: self.state,
                action: "step back",
            });
        }
        self.jump_to(self.cursor.saturating_sub(1));
        self.state = if self.cursor == self.steps.len() {
            ReplayState::Complete
        } else {
            ReplayState::Paused
        };
        Ok(())
    }

    /// Timer callback. Applies the next step only if `ticket` is still the
    /// pending one; returns the follow-up timer to arm.
    pub fn fire(&mut self, ticket: u64) -> Option<Schedule> {
        match self.pending {
            Some(p) if p.ticket == ticket && self.state == ReplayState::Playing => {}
            _ => {
                tracing::trace!(ticket, "ignoring stale replay timer");
                return None;
            }
        }
        self.pending = None;
        self.advance();
        if self.state == ReplayState::Playing {
            Some(self.schedule())
        } else {
            None
        }
    }

    /// Drops the pending timer without changing state. Used when the driver
    /// goes away.
    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            tracing::debug!(ticket = p.ticket, "replay timer cancelled");
        }
    }

    fn advance(&mut self) {
        if let Some(step) = self.steps.get(self.cursor) {
            self.snapshot.apply(step);
            self.cursor += 1;
        }
        if self.cursor >= self.steps.len() {
            self.complete();
        }
    }

    fn jump_to(&mut self, target: usize) {
        self.pending = None;
        self.snapshot = materialize(&self.steps, target);
        self.cursor = target;
    }

    fn schedule(&mut self) -> Schedule {
        let delay_ms = self.steps.get(self.cursor).map_or(0, |s| s.delay_ms);
        let schedule = Schedule {
            ticket: self.next_ticket,
            delay: self.speed.scale(delay_ms),
        };
        self.next_ticket += 1;
        self.pending = Some(schedule);
        schedule
    }

    fn reset(&mut self) {
        self.jump_to(0);
        self.state = ReplayState::Idle;
        tracing::debug!(len = self.steps.len(), "replay reset");
    }

    fn complete(&mut self) {
        self.pending = None;
        self.state = ReplayState::Complete;
        self.completions += 1;
        tracing::info!(len = self.steps.len(), "replay complete");
        for callback in &mut self.on_complete {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_parses_supported_multipliers_only() {
        assert_eq!(Speed::try_from(1.5), Ok(Speed::OneAndHalf));
        assert_eq!(Speed::try_from(0.5), Ok(Speed::Half));
        assert_eq!(
            Speed::try_from(3.0),
            Err(ReplayError::UnsupportedSpeed(3.0))
        );
    }

    #[test]
    fn speed_scales_delay() {
        assert_eq!(Speed::Double.scale(1000), Duration::from_millis(500));
        assert_eq!(Speed::Half.scale(1000), Duration::from_millis(2000));
        assert_eq!(Speed::Normal.to_string(), "1x");
    }

    #[test]
    fn empty_engine_starts_complete() {
        let engine = ReplayEngine::new(Vec::new());
        assert_eq!(engine.state(), ReplayState::Complete);
        assert_eq!(engine.completions(), 0);
        assert_eq!(engine.progress(), 1.0);
    }
}
