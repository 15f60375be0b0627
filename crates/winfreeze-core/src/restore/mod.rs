pub mod errors;
pub mod handler;
pub mod types;

pub use errors::RestoreError;
pub use handler::{reconcile_and_reposition, restore_from_file};
pub use types::{OutcomeStatus, RestoreReport, WindowOutcome};
