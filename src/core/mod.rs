pub mod config;
pub use config::*;

pub mod throttle;
pub use throttle::{FixedDelay, NoDelay, Throttle};
