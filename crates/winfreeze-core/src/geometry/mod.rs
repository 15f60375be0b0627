pub mod score;
pub mod types;

pub use score::{Closest, closest, distance, within_tolerance};
pub use types::{Point, Rect, Size};
