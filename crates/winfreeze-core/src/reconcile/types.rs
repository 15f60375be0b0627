use std::fmt;

use serde::Serialize;

/// Which stage of the matching cascade produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Same `(window_id, pid)` still on screen; located via its current frame.
    ById,
    /// Exact title equality.
    ByTitle,
    /// Closest frame to the recorded one.
    ByGeometry,
    Unmatched,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::ById => "id",
            MatchTier::ByTitle => "title",
            MatchTier::ByGeometry => "geometry",
            MatchTier::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reconciling one snapshot: at most one live handle, tagged with
/// the tier that found it. A handle is present exactly when the tier is not
/// [`MatchTier::Unmatched`].
#[derive(Debug)]
pub struct MatchResult<H> {
    tier: MatchTier,
    handle: Option<H>,
}

impl<H> MatchResult<H> {
    pub(crate) fn matched(tier: MatchTier, handle: H) -> Self {
        debug_assert!(tier != MatchTier::Unmatched);
        Self {
            tier,
            handle: Some(handle),
        }
    }

    pub(crate) fn unmatched() -> Self {
        Self {
            tier: MatchTier::Unmatched,
            handle: None,
        }
    }

    pub fn tier(&self) -> MatchTier {
        self.tier
    }

    pub fn is_matched(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn into_parts(self) -> (MatchTier, Option<H>) {
        (self.tier, self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_has_no_handle() {
        let result: MatchResult<u32> = MatchResult::unmatched();
        assert_eq!(result.tier(), MatchTier::Unmatched);
        assert!(!result.is_matched());
        assert!(result.handle().is_none());
    }

    #[test]
    fn test_matched_carries_handle() {
        let result = MatchResult::matched(MatchTier::ByTitle, 9u32);
        assert!(result.is_matched());
        assert_eq!(result.into_parts(), (MatchTier::ByTitle, Some(9)));
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MatchTier::ById).unwrap(), r#""by_id""#);
        assert_eq!(MatchTier::ByGeometry.to_string(), "geometry");
    }
}
