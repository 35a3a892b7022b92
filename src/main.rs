#![warn(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use life_engine::{spawn_ticker, BlockingScheduler, Config, Engine, NiceInt};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless Game of Life runner.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = Config::DEFAULT_SIDE)]
    rows: usize,

    #[arg(long, default_value_t = Config::DEFAULT_SIDE)]
    cols: usize,

    /// Stitch opposite edges of the field together.
    #[arg(long)]
    toroidal: bool,

    /// Minimum delay between two steps, in milliseconds.
    #[arg(long, default_value_t = Config::DEFAULT_STEP_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Seed for the initial random field.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many generations; without it, run until Ctrl-C.
    #[arg(long)]
    generations: Option<u64>,

    /// Dump the final field to stdout.
    #[arg(long)]
    print: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            rows: self.rows,
            cols: self.cols,
            toroidal: self.toroidal,
            step_interval: Duration::from_millis(self.interval_ms),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.config();
    let mut engine = Engine::from_config(&config).context("invalid field configuration")?;
    engine.randomize(config.seed);
    info!(
        rows = config.rows,
        cols = config.cols,
        topology = ?config.topology(),
        population = %NiceInt::from_usize(engine.grid().population()),
        "field initialized"
    );

    let engine = match args.generations {
        Some(generations) => {
            BlockingScheduler::new(config.step_interval).run_for(&mut engine, generations)?;
            engine
        }
        None => run_until_interrupted(engine, config.step_interval)?,
    };

    info!(
        generation = %NiceInt::from(engine.generation()),
        population = %NiceInt::from_usize(engine.grid().population()),
        "finished"
    );
    if args.print {
        print!("{}", engine.grid());
    }
    Ok(())
}

fn run_until_interrupted(engine: Engine, interval: Duration) -> Result<Engine> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let engine = Arc::new(Mutex::new(engine));
    runtime.block_on(async {
        let ticker = spawn_ticker(engine.clone(), interval)?;
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl-C")?;
        let steps = ticker.stop().await;
        info!(steps = %NiceInt::from(steps), "interrupted");
        anyhow::Ok(())
    })?;

    let engine = Arc::try_unwrap(engine)
        .map_err(|_| anyhow::anyhow!("engine is still shared after the ticker stopped"))?;
    Ok(engine.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner))
}
