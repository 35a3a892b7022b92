use crate::{neighbor_indices, Config, Grid, LifeError, NiceInt, Result, Topology};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, trace};


/// Birth/survival rule B3/S23.
pub fn next_state(alive: bool, alive_count: usize) -> bool {
    if alive {
        alive_count == 2 || alive_count == 3
    } else {
        alive_count == 3
    }
}

/// Gets told when the engine replaces its grid, so that any view built
/// over the old cells can be rebuilt.
pub trait GridObserver: Send {
    fn grid_rebuilt(&mut self, rows: usize, cols: usize);
}

impl<F> GridObserver for F
where
    F: FnMut(usize, usize) + Send,
{
    fn grid_rebuilt(&mut self, rows: usize, cols: usize) {
        self(rows, cols)
    }
}

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(0);

/// Proof that a play session is active; handed back to [`Engine::stop`]
/// of the engine that issued it.
#[must_use = "a play session must be handed back to `Engine::stop`"]
#[derive(Debug)]
pub struct PlaySession {
    engine_id: u64,
}

/// Returned by [`Engine::stop`] when the session was issued by another
/// engine. Carries the session so it can still be handed to its owner.
#[derive(Debug, Error)]
#[error("play session was issued by another engine")]
pub struct ForeignSession(pub PlaySession);

impl From<ForeignSession> for LifeError {
    fn from(_: ForeignSession) -> Self {
        LifeError::ForeignSession
    }
}

/// Owns one grid and advances it generation by generation.
pub struct Engine {
    id: u64,
    grid: Grid,
    topology: Topology,
    generation: u64,
    playing: bool,
    observers: Vec<Box<dyn GridObserver>>,
}

impl Engine {
    pub fn new(rows: usize, cols: usize, topology: Topology) -> Result<Self> {
        Ok(Self::with_grid(Grid::new(rows, cols)?, topology))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.rows, config.cols, config.topology())
    }

    /// Starts from a given pattern instead of a dead field.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: &[bool],
        topology: Topology,
    ) -> Result<Self> {
        Ok(Self::with_grid(Grid::from_cells(rows, cols, cells)?, topology))
    }

    fn with_grid(grid: Grid, topology: Topology) -> Self {
        Self {
            id: NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed),
            grid,
            topology,
            generation: 0,
            playing: false,
            observers: vec![],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Takes effect from the next step on.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Number of steps since creation or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subscribe(&mut self, observer: impl GridObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.grid.toggle(index)
    }

    pub fn set(&mut self, index: usize, state: bool) -> Result<()> {
        self.grid.set(index, state)
    }

    /// Advances the field by one generation.
    ///
    /// Every cell is decided from the previous generation only; the result
    /// is staged and committed for all cells at once.
    pub fn step(&mut self) {
        let (rows, cols, topology) = (self.grid.rows(), self.grid.cols(), self.topology);
        let (curr, next) = self.grid.buffers_mut();
        for (index, staged) in next.iter_mut().enumerate() {
            let alive_count = neighbor_indices(index, rows, cols, topology)
                .iter()
                .filter(|&&i| curr[i])
                .count();
            *staged = next_state(curr[index], alive_count);
        }
        self.grid.commit();
        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.grid.population(),
            "step"
        );
    }

    /// Runs `n` steps.
    pub fn update(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Replaces the grid with a dead `rows x cols` one and notifies observers.
    ///
    /// Does not touch the play state: an active session keeps stepping the
    /// new grid.
    pub fn reset(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.grid.resize(rows, cols)?;
        self.generation = 0;
        debug!(rows, cols, cells = %NiceInt::from_usize(self.grid.len()), "grid reset");
        for observer in self.observers.iter_mut() {
            observer.grid_rebuilt(rows, cols);
        }
        Ok(())
    }

    /// Sets every cell alive or dead with equal probability.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn randomize(&mut self, seed: Option<u64>) {
        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        self.randomize_with(&mut rng);
    }

    /// Same as [`Engine::randomize`], drawing from the given source.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.randomize_with_rate(rng, 0.5);
    }

    /// Sets every cell alive independently with probability `fill_rate`.
    ///
    /// Panics if `fill_rate` is not in `[0, 1]`.
    pub fn randomize_with_rate<R: Rng + ?Sized>(&mut self, rng: &mut R, fill_rate: f64) {
        for cell in self.grid.cells_mut() {
            *cell = rng.gen_bool(fill_rate);
        }
        debug!(
            fill_rate,
            population = %NiceInt::from_usize(self.grid.population()),
            "grid randomized"
        );
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Marks the start of repeated stepping.
    ///
    /// The engine keeps no timer of its own: whoever holds the returned
    /// session is expected to call [`Engine::step`] at a fixed cadence
    /// until it hands the session back to [`Engine::stop`].
    pub fn play(&mut self) -> Result<PlaySession> {
        if self.playing {
            return Err(LifeError::AlreadyPlaying);
        }
        self.playing = true;
        debug!(generation = self.generation, topology = ?self.topology, "play");
        Ok(PlaySession { engine_id: self.id })
    }

    /// Ends the play session. A session issued by another engine is
    /// rejected and returned untouched.
    pub fn stop(&mut self, session: PlaySession) -> std::result::Result<(), ForeignSession> {
        if session.engine_id != self.id {
            return Err(ForeignSession(session));
        }
        self.playing = false;
        debug!(generation = self.generation, "stop");
        Ok(())
    }
}
