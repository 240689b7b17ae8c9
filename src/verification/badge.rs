//! Badge descriptor for verified addresses

use serde::Serialize;

/// Badge size used when the caller has no preference
pub const DEFAULT_BADGE_SIZE: &str = "small";

/// Presentation hints for the "verified entity" badge
///
/// Only produced for addresses the cache already knows to be verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationBadge {
    /// Material Design icon name
    pub icon: &'static str,
    /// Theme color
    pub color: &'static str,
    /// Requested size, passed through untouched
    pub size: String,
    /// Hover text
    pub tooltip: &'static str,
}

impl VerificationBadge {
    pub(crate) fn verified(size: &str) -> Self {
        Self {
            icon: "mdi-check-decagram",
            color: "success",
            size: size.to_string(),
            tooltip: "Verified Entity",
        }
    }
}
