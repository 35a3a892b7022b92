//! Drivers that call [`Engine::step`] at a fixed cadence between
//! [`Engine::play`] and [`Engine::stop`].

use crate::{Engine, Result, StepLimiter};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

fn lock(engine: &Mutex<Engine>) -> MutexGuard<'_, Engine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Steps an engine on the calling thread, sleeping between steps.
pub struct BlockingScheduler {
    limiter: StepLimiter,
}

impl BlockingScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            limiter: StepLimiter::new(interval),
        }
    }

    /// Plays `engine` until `done` returns `true`, then stops it.
    ///
    /// `done` is checked before every step. Returns the number of steps made.
    pub fn run_until(
        &mut self,
        engine: &mut Engine,
        mut done: impl FnMut(&Engine) -> bool,
    ) -> Result<u64> {
        let session = engine.play()?;
        let mut steps = 0;
        while !done(engine) {
            self.limiter.delay();
            engine.step();
            steps += 1;
        }
        engine.stop(session)?;
        debug!(
            steps,
            steps_per_second = ?self.limiter.steps_per_second(),
            "blocking run finished"
        );
        Ok(steps)
    }

    /// Plays `engine` for exactly `generations` steps.
    pub fn run_for(&mut self, engine: &mut Engine, generations: u64) -> Result<u64> {
        let mut left = generations;
        self.run_until(engine, |_| {
            if left == 0 {
                return true;
            }
            left -= 1;
            false
        })
    }
}

/// Handle to a tokio task stepping a shared engine.
///
/// Dropping it cancels the task as well; [`Ticker::stop`] additionally
/// waits for the task to hand the session back.
pub struct Ticker {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<u64>,
}

/// Plays `engine` on the current tokio runtime, one step every `interval`.
///
/// The engine lock is held only for the duration of a step, so the host can
/// toggle cells, switch topology or reset the grid between ticks.
pub fn spawn_ticker(engine: Arc<Mutex<Engine>>, interval: Duration) -> Result<Ticker> {
    let session = lock(&engine).play()?;
    let (cancel, mut cancelled) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticks = time::interval(interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticks.tick().await;

        let mut steps = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut cancelled => break,
                _ = ticks.tick() => {
                    lock(&engine).step();
                    steps += 1;
                }
            }
        }
        if let Err(err) = lock(&engine).stop(session) {
            warn!(%err, "ticker could not hand its session back");
        }
        steps
    });

    Ok(Ticker { cancel, task })
}

impl Ticker {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels further ticks. A step already in progress runs to completion.
    ///
    /// Returns the number of steps made by this ticker.
    pub async fn stop(self) -> u64 {
        // fails only if the task is already gone
        let _ = self.cancel.send(());
        match self.task.await {
            Ok(steps) => steps,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LifeError, Topology};

    fn blinker() -> Engine {
        let mut engine = Engine::new(5, 5, Topology::Bounded).unwrap();
        for index in [11, 12, 13] {
            engine.set(index, true).unwrap();
        }
        engine
    }

    #[test]
    fn test_blocking_run_for() {
        let mut engine = blinker();
        let mut scheduler = BlockingScheduler::new(Duration::from_millis(1));
        assert_eq!(scheduler.run_for(&mut engine, 3).unwrap(), 3);
        assert_eq!(engine.generation(), 3);
        assert!(!engine.is_playing());
        // odd number of steps: vertical phase
        assert_eq!(engine.grid().get(7), Ok(true));
        assert_eq!(engine.grid().get(11), Ok(false));
    }

    #[test]
    fn test_blocking_run_for_zero() {
        let mut engine = blinker();
        let mut scheduler = BlockingScheduler::new(Duration::ZERO);
        assert_eq!(scheduler.run_for(&mut engine, 0), Ok(0));
        assert_eq!(scheduler.limiter.steps_per_second(), None);
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_blocking_run_until_population() {
        let mut engine = Engine::new(5, 5, Topology::Bounded).unwrap();
        engine.set(12, true).unwrap();
        let mut scheduler = BlockingScheduler::new(Duration::ZERO);
        let steps = scheduler
            .run_until(&mut engine, |e| e.grid().population() == 0)
            .unwrap();
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_blocking_run_rejects_active_session() {
        let mut engine = blinker();
        let session = engine.play().unwrap();
        let mut scheduler = BlockingScheduler::new(Duration::ZERO);
        assert_eq!(
            scheduler.run_for(&mut engine, 1),
            Err(LifeError::AlreadyPlaying)
        );
        engine.stop(session).unwrap();
        assert_eq!(engine.generation(), 0);
    }

    #[tokio::test]
    async fn test_ticker_steps_until_stopped() {
        let engine = Arc::new(Mutex::new(blinker()));
        let ticker = spawn_ticker(engine.clone(), Duration::from_millis(1)).unwrap();
        assert!(engine.lock().unwrap().is_playing());

        time::sleep(Duration::from_millis(30)).await;
        let steps = ticker.stop().await;
        assert!(steps > 0);

        let generation = engine.lock().unwrap().generation();
        assert_eq!(generation, steps);
        assert!(!engine.lock().unwrap().is_playing());

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(engine.lock().unwrap().generation(), generation);
    }

    #[tokio::test]
    async fn test_second_ticker_rejected() {
        let engine = Arc::new(Mutex::new(blinker()));
        let ticker = spawn_ticker(engine.clone(), Duration::from_millis(1)).unwrap();
        assert!(matches!(
            spawn_ticker(engine.clone(), Duration::from_millis(1)),
            Err(LifeError::AlreadyPlaying)
        ));
        ticker.stop().await;
        let ticker = spawn_ticker(engine.clone(), Duration::from_millis(1)).unwrap();
        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_dropped_ticker_releases_session() {
        let engine = Arc::new(Mutex::new(blinker()));
        drop(spawn_ticker(engine.clone(), Duration::from_millis(1)).unwrap());
        time::sleep(Duration::from_millis(20)).await;
        assert!(!engine.lock().unwrap().is_playing());
    }

    #[tokio::test]
    async fn test_reset_between_ticks() {
        let engine = Arc::new(Mutex::new(blinker()));
        let ticker = spawn_ticker(engine.clone(), Duration::from_millis(1)).unwrap();
        time::sleep(Duration::from_millis(5)).await;
        engine.lock().unwrap().reset(8, 9).unwrap();
        time::sleep(Duration::from_millis(5)).await;
        ticker.stop().await;

        let engine = engine.lock().unwrap();
        assert_eq!(engine.grid().len(), 72);
        assert_eq!(engine.grid().population(), 0);
    }
}
