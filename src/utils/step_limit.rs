use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Keeps consecutive steps at least `interval` apart.
pub struct StepLimiter {
    interval: Duration,
    last_step: Instant,
    /// Exponential moving average of the period between steps, in seconds.
    mean_period: f64,
}

impl StepLimiter {
    const SMOOTHING: f64 = 0.1;

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_step: Instant::now(),
            mean_period: interval.as_secs_f64(),
        }
    }

    /// Observed stepping rate; `None` while no period has been measured and
    /// the interval is zero.
    pub fn steps_per_second(&self) -> Option<f64> {
        (self.mean_period > 0.).then(|| 1. / self.mean_period)
    }

    /// Blocks until `interval` has passed since the previous call.
    pub fn delay(&mut self) {
        if let Some(rest) = self.interval.checked_sub(self.last_step.elapsed()) {
            sleep(rest);
        }
        let period = self.last_step.elapsed().as_secs_f64();
        self.mean_period += (period - self.mean_period) * Self::SMOOTHING;
        self.last_step = Instant::now();
    }
}
