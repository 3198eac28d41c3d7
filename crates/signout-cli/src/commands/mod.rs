pub mod init;
pub mod score;
pub mod serve;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use signout_core::model::{HandoffDraft, HandoffSubmission};

/// Read and validate a submission file.
pub(crate) fn load_submission(path: &Path) -> Result<HandoffDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission {}", path.display()))?;
    let draft = HandoffSubmission::from_json_str(&content)
        .and_then(HandoffSubmission::validate)
        .with_context(|| format!("invalid submission {}", path.display()))?;
    Ok(draft)
}
