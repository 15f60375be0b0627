pub mod clock;
pub mod handler;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use handler::reposition;
pub use types::{
    DEFAULT_RETRY_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_TOLERANCE, RepositionOptions,
    RepositionSummary, RepositionTask, TaskOutcome, TaskStatus,
};
