pub mod dispatch;
pub mod templates;

pub use dispatch::render_task;
