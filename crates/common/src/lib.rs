pub mod config;
pub mod error;
pub mod limits;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use limits::{LimitsConfig, SymbolLimits};
pub use types::*;
