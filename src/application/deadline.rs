//! Shared end-to-end deadline check for the query pipeline (spec §5
//! "Queries carry a separate end-to-end deadline... propagated across
//! stages via a field on the search record").

use crate::domain::error::{Error, Result};
use crate::domain::types::SearchRequest;
use chrono::Utc;

/// Returns `Err(Timeout)` if `search.deadline` has already passed. Callers
/// that observe this must mark the search `failed(timeout)` and not enqueue
/// a successor stage.
pub fn check_deadline(search: &SearchRequest) -> Result<()> {
    if Utc::now() > search.deadline {
        return Err(Error::timeout(format!(
            "search request {} exceeded its deadline",
            search.id
        )));
    }
    Ok(())
}
