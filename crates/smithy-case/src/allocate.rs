//! Identifier allocation.

use tracing::debug;

use crate::{ArtifactLayout, CaseError, Language, Result};

/// Find the smallest ID `>= start` whose source file `{id}.{ext}` does not exist.
///
/// This never hands out an ID that would overwrite an existing source.
///
/// # Errors
/// Returns an error if the filesystem cannot be probed, or `IdsExhausted` if
/// every ID up to `u64::MAX` is taken.
pub fn allocate_id(layout: &ArtifactLayout, lang: Language, start: u64) -> Result<u64> {
    let mut id = start;
    while layout.source(id, lang).try_exists()? {
        id = id.checked_add(1).ok_or(CaseError::IdsExhausted(start))?;
    }
    debug!(start, id, lang = %lang, "allocated test case id");
    Ok(id)
}
