mod handler;
mod log;
mod alert;

pub use handler::{ActionHandler, ActionPipeline};
pub use log::LogAction;
pub use alert::AlertAction;
