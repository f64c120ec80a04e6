//! Review platforms: where a finished book's reviews get posted.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A place a review is owed.
///
/// Independent of the deadline lifecycle; only consulted while the
/// deadline sits in `to_review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPlatform {
    pub id: String,
    pub platform_name: String,
    pub posted: bool,
    pub posted_date: Option<Timestamp>,
    pub review_url: Option<String>,
}

/// What the review data source returned for a deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    pub platforms: Vec<ReviewPlatform>,

    /// The source is still fetching; `platforms` may be incomplete.
    #[serde(default)]
    pub is_loading: bool,
}

impl ReviewData {
    /// Names of platforms whose review is not yet posted.
    pub fn unposted(&self) -> Vec<String> {
        unposted_names(&self.platforms)
    }
}

pub(crate) fn unposted_names(platforms: &[ReviewPlatform]) -> Vec<String> {
    platforms
        .iter()
        .filter(|p| !p.posted)
        .map(|p| p.platform_name.clone())
        .collect()
}
