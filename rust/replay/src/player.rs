use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use handreel_engine::hand::Hand;
use handreel_engine::snapshot::TableSnapshot;
use handreel_engine::steps::{generate_steps, ReplayStep};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::engine::{ReplayEngine, ReplayError, ReplayState, Schedule, Speed};

/// What subscribers see after every change to the replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playback {
    pub state: ReplayState,
    pub position: usize,
    pub len: usize,
    pub speed: Speed,
    pub snapshot: TableSnapshot,
}

impl Playback {
    fn of(engine: &ReplayEngine) -> Self {
        Self {
            state: engine.state(),
            position: engine.position(),
            len: engine.len(),
            speed: engine.speed(),
            snapshot: engine.current_snapshot().clone(),
        }
    }
}

struct Inner {
    engine: ReplayEngine,
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    inner: Mutex<Inner>,
    tx: watch::Sender<Playback>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(Playback::of(&inner.engine));
    }

    /// Runs on the timer task once its sleep has elapsed.
    fn tick(self: &Arc<Self>, ticket: u64) {
        let mut inner = self.lock();
        if inner.engine.pending().map(|p| p.ticket) != Some(ticket) {
            tracing::trace!(ticket, "replay timer lost the race");
            return;
        }
        // The handle belongs to this task; detach it instead of aborting.
        inner.timer = None;
        if let Some(next) = inner.engine.fire(ticket) {
            arm(self, &mut inner, next);
        }
        self.publish(&inner);
    }
}

fn disarm(inner: &mut Inner) {
    if let Some(handle) = inner.timer.take() {
        handle.abort();
    }
}

fn arm(shared: &Arc<Shared>, inner: &mut Inner, schedule: Schedule) {
    disarm(inner);
    let weak: Weak<Shared> = Arc::downgrade(shared);
    tracing::trace!(
        ticket = schedule.ticket,
        delay_ms = schedule.delay.as_millis() as u64,
        "arming replay timer"
    );
    inner.timer = Some(tokio::spawn(async move {
        tokio::time::sleep(schedule.delay).await;
        if let Some(shared) = weak.upgrade() {
            shared.tick(schedule.ticket);
        }
    }));
}

/// Drives a [`ReplayEngine`] in real time on the tokio runtime.
///
/// At most one timer task exists per player. Every control call locks the
/// engine, so once it returns no stale timer can apply a step. Must be used
/// from within a tokio runtime.
pub struct ReplayPlayer {
    shared: Arc<Shared>,
}

impl ReplayPlayer {
    pub fn spawn(steps: Vec<ReplayStep>) -> Self {
        let engine = ReplayEngine::new(steps);
        let (tx, _) = watch::channel(Playback::of(&engine));
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    engine,
                    timer: None,
                }),
                tx,
            }),
        }
    }

    pub fn from_hand(hand: &Hand) -> Self {
        Self::spawn(generate_steps(hand))
    }

    pub fn play(&self) {
        let mut inner = self.shared.lock();
        if let Some(schedule) = inner.engine.play() {
            arm(&self.shared, &mut inner, schedule);
        }
        self.shared.publish(&inner);
    }

    pub fn pause(&self) -> Result<(), ReplayError> {
        let mut inner = self.shared.lock();
        inner.engine.pause()?;
        disarm(&mut inner);
        self.shared.publish(&inner);
        Ok(())
    }

    pub fn seek(&self, fraction: f64) -> Result<(), ReplayError> {
        let mut inner = self.shared.lock();
        let next = inner.engine.seek(fraction)?;
        disarm(&mut inner);
        if let Some(schedule) = next {
            arm(&self.shared, &mut inner, schedule);
        }
        self.shared.publish(&inner);
        Ok(())
    }

    pub fn set_speed(&self, speed: Speed) {
        let mut inner = self.shared.lock();
        inner.engine.set_speed(speed);
        self.shared.publish(&inner);
    }

    pub fn step_forward(&self) -> Result<(), ReplayError> {
        let mut inner = self.shared.lock();
        inner.engine.step_forward()?;
        self.shared.publish(&inner);
        Ok(())
    }

    pub fn step_back(&self) -> Result<(), ReplayError> {
        let mut inner = self.shared.lock();
        inner.engine.step_back()?;
        self.shared.publish(&inner);
        Ok(())
    }

    /// Callbacks run on the timer task while the engine is locked and must
    /// not call back into the player.
    pub fn on_complete(&self, callback: impl FnMut() + Send + 'static) {
        self.shared.lock().engine.on_complete(callback);
    }

    pub fn state(&self) -> ReplayState {
        self.shared.lock().engine.state()
    }

    pub fn position(&self) -> usize {
        self.shared.lock().engine.position()
    }

    pub fn current_snapshot(&self) -> TableSnapshot {
        self.shared.lock().engine.current_snapshot().clone()
    }

    pub fn playback(&self) -> Playback {
        Playback::of(&self.shared.lock().engine)
    }

    pub fn subscribe(&self) -> watch::Receiver<Playback> {
        self.shared.tx.subscribe()
    }

    /// Resolves once playback reaches the end.
    pub async fn until_complete(&self) -> Playback {
        let mut rx = self.subscribe();
        let done = rx
            .wait_for(|p| p.state == ReplayState::Complete)
            .await
            .map(|p| p.clone());
        match done {
            Ok(playback) => playback,
            Err(_) => self.playback(),
        }
    }
}

impl Drop for ReplayPlayer {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.engine.cancel();
        disarm(&mut inner);
        tracing::debug!(position = inner.engine.position(), "replay player dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn empty_player_completes_on_play() {
        let player = ReplayPlayer::spawn(Vec::new());
        assert_eq!(player.state(), ReplayState::Complete);
        player.play();
        let end = player.until_complete().await;
        assert_eq!(end.len, 0);
        assert_eq!(end.position, 0);
    }
}
