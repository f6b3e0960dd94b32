pub mod bridge;
pub mod engine;
pub mod remote;

pub use bridge::run_task;
pub use engine::AutomationEngine;
pub use remote::RemoteEngine;
