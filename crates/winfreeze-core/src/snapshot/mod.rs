pub mod errors;
pub mod persistence;
pub mod types;

pub use errors::SnapshotError;
pub use persistence::{default_snapshot_path, load_snapshots, save_snapshots};
pub use types::WindowSnapshot;
