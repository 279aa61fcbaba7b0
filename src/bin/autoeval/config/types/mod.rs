mod app;
mod batch;
mod logging;
mod responder;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
pub use batch::BatchSection;
pub use logging::LoggingConfig;
pub use responder::ResponderSection;
