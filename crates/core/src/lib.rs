pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{RevPulseError, RevPulseResult};
