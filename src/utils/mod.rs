mod config;
mod error;
mod format_int;
mod step_limit;
mod topology;

pub use config::Config;
pub use error::{LifeError, Result};
pub use format_int::NiceInt;
pub use step_limit::StepLimiter;
pub use topology::Topology;
