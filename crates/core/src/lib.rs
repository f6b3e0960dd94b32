pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, EngineConfig, GatewayConfig};
pub use error::{Error, Result};
pub use types::{FlightDetails, FoodDetails, RunHistory, RunResult, StepUpdate, TaskRequest};
