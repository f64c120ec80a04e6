//! Deciding where a finished book lands: `complete` or `did_not_finish`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ReviewPlatform, Status, unposted_names};

/// Whether the reader got to the end. Reading past the total still counts.
pub fn is_fully_complete(progress: u32, total: u32) -> Result<bool> {
    if total == 0 {
        return Err(Error::InvalidConfiguration(
            "total quantity must be positive to decide completion".into(),
        ));
    }
    Ok(progress >= total)
}

/// The terminal status for a book finalized straight from reading or paused.
pub fn resolve_direct(progress: u32, total: u32) -> Result<Status> {
    Ok(terminal_for(is_fully_complete(progress, total)?))
}

/// Outcome of finalizing out of `to_review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// Write this terminal status.
    Finalize(Status),

    /// Some reviews are unposted. Ask, then call again with `acknowledged`.
    NeedsConfirmation { unposted: Vec<String> },
}

/// Resolves the terminal status when leaving `to_review`.
///
/// Never finalizes past unposted reviews unless the reader acknowledged them.
pub fn resolve_from_review(
    progress: u32,
    total: u32,
    platforms: &[ReviewPlatform],
    acknowledged: bool,
) -> Result<Resolution> {
    let complete = is_fully_complete(progress, total)?;

    let unposted = unposted_names(platforms);
    if !unposted.is_empty() && !acknowledged {
        debug!("finalize held back by {} unposted review(s)", unposted.len());
        return Ok(Resolution::NeedsConfirmation { unposted });
    }

    Ok(Resolution::Finalize(terminal_for(complete)))
}

fn terminal_for(fully_complete: bool) -> Status {
    if fully_complete {
        Status::Complete
    } else {
        Status::DidNotFinish
    }
}
