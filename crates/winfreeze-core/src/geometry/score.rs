//! Geometry similarity scoring.
//!
//! The two window views (the system window list and the per-process
//! accessibility windows) share no identifiers, so every bridge between them
//! goes through [`distance`] and [`closest`].

use super::types::{Point, Rect};

/// Squared-difference distance between two frames.
///
/// Sum of the squared differences of x, y, width and height. Unweighted and
/// unnormalized. Zero exactly when both frames are identical.
pub fn distance(a: &Rect, b: &Rect) -> f64 {
    let dx = a.origin.x - b.origin.x;
    let dy = a.origin.y - b.origin.y;
    let dw = a.size.width - b.size.width;
    let dh = a.size.height - b.size.height;
    dx * dx + dy * dy + dw * dw + dh * dh
}

/// Winning candidate of a [`closest`] reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Closest<T> {
    pub item: T,
    pub distance: f64,
}

/// Pick the candidate whose frame is closest to `target`.
///
/// Candidates for which `frame_of` returns `None` are skipped. The running
/// best is replaced only when a later candidate is strictly closer, so ties
/// go to the first candidate in iteration order. A candidate must also be
/// strictly closer than infinity, so a NaN or infinite distance never wins.
pub fn closest<T, I, F>(target: &Rect, candidates: I, mut frame_of: F) -> Option<Closest<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<Rect>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<Closest<T>>, candidate| {
            let Some(frame) = frame_of(&candidate) else {
                return best;
            };
            let score = distance(target, &frame);
            let best_score = best.as_ref().map_or(f64::INFINITY, |b| b.distance);
            if score < best_score {
                Some(Closest {
                    item: candidate,
                    distance: score,
                })
            } else {
                best
            }
        })
}

/// Whether `actual` is within `tolerance` of `target` on each axis
/// independently. The boundary is inclusive.
pub fn within_tolerance(actual: Point, target: Point, tolerance: f64) -> bool {
    (actual.x - target.x).abs() <= tolerance && (actual.y - target.y).abs() <= tolerance
}
