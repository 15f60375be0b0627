pub mod handler;
pub mod types;

pub use handler::{find_anchor, match_by_geometry, match_by_id, match_by_title, reconcile};
pub use types::{MatchResult, MatchTier};
