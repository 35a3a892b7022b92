#![warn(clippy::all)]

mod engine;
mod grid;
mod neighborhood;
mod scheduler;
mod utils;

pub use engine::{next_state, Engine, ForeignSession, GridObserver, PlaySession};
pub use grid::Grid;
pub use neighborhood::{neighbor_indices, Neighbors};
pub use scheduler::{spawn_ticker, BlockingScheduler, Ticker};
pub use utils::{Config, LifeError, NiceInt, Result, StepLimiter, Topology};
